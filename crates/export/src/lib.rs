//! Swingman session export: swing CSV and rendered heatmap PNG.

pub mod csv;
pub mod exporter;
pub mod heatmap_image;

pub use csv::session_csv;
pub use exporter::FilesystemExporter;
pub use heatmap_image::{heatmap_image, write_heatmap_png};
