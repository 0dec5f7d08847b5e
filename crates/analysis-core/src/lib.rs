//! Swingman Analysis Core
//!
//! Turns noisy per-frame bat detections into structured swing analysis:
//! - **Trajectory Tracker:** smooth raw detections into a stable swing path
//! - **Impact Detector:** find the impact instant inside a finished path
//! - **Swing Scorer:** compute bounded efficiency/power/speed metrics
//! - **Grid Classifier:** map points into discrete frame zones
//! - **Heatmap Aggregator:** accumulate weighted impacts into a density grid
//!
//! This crate is pure computation: no I/O, no platform dependencies.
//! All inputs are data; all outputs are data. Identical inputs always
//! produce identical outputs.

pub mod grid;
pub mod heatmap;
pub mod impact;
pub mod scorer;
pub mod trajectory;

pub use grid::{GridConfig, GridZone};
pub use heatmap::{HeatmapAccumulator, HeatmapConfig, HeatmapRaster};
pub use impact::{detect_impact, ImpactConfig};
pub use scorer::{score_swing, ScorerConfig};
pub use trajectory::{TrackerConfig, TrajectoryTracker};
