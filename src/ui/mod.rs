pub mod dashboard;
pub mod donut;
pub mod heatmap;
pub mod panels;
pub mod plot;
