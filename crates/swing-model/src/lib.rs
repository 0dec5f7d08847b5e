//! Swingman data model.
//!
//! Pure data types shared by the analysis, session, and export crates:
//! swing paths, derived metrics, per-session records, the detection-stream
//! JSONL format, and the transport-facing message enums. No I/O beyond
//! (de)serialization.

pub mod message;
pub mod metrics;
pub mod path;
pub mod record;

pub use message::{ClientCommand, DetectionEvent, DetectionKind, FinalArtifacts, ServerMessage};
pub use metrics::{ImpactEvent, LiveMetrics, SwingMetrics};
pub use path::{PathPoint, SwingPath};
pub use record::{SessionRecord, SwingRecord};
