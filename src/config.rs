//! Application configuration.
//!
//! The dashboard takes no flags or environment variables (apart from
//! `RUST_LOG` for the logger); everything tunable lives here.

/// Sales extract loaded at startup, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "sales_data.csv";

/// Cost is assumed to be a fixed share of revenue; the extract carries no
/// cost data of its own.
pub const COST_RATIO: f64 = 0.70;

/// How many products the "Top Products" chart keeps.
pub const TOP_PRODUCTS: usize = 5;

/// Window title.
pub const APP_TITLE: &str = "Sales Data Analysis Dashboard";

/// Initial and minimum window size in points.
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 900.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

/// File extensions offered by the open dialog.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "json", "parquet", "pq"];
