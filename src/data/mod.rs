/// Data layer: core types, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → RawTable (text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  headers, Date, Cost/Profit, City, Region, Category, dedup
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset  │  Vec<SalesRecord>, memoised by `cache`
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Region × Category selection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  totals, monthly trend, groupings, correlation
///   └──────────┘
/// ```

pub mod cache;
pub mod classify;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
