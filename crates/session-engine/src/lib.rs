//! Swingman session engine: the per-session state machine, collaborator
//! boundaries, session registry, and the channel-based service loop.

pub mod detector;
pub mod engine;
pub mod registry;
pub mod service;

pub use detector::{
    detect_or_miss, estimate_or_none, BoundingBox, NullDetector, ObjectDetector, PoseEstimator,
    ScriptedDetector,
};
pub use engine::{EngineConfig, SessionState, SessionSummary, SwingSession};
pub use registry::SessionRegistry;
pub use service::{run_session, FramePayload, SessionContext, SessionExporter, SessionInput};
