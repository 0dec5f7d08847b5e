//! Collaborator boundaries: object detection and pose estimation.
//!
//! The engine never talks to a vision model directly; it consumes these
//! traits. A failing or panicking implementation is absorbed at the boundary
//! and reported as "no detection this frame", so one bad collaborator frame
//! degrades tracking quality without ever taking the session down.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

use swingman_common::error::SwingmanResult;
use swingman_model::message::PoseSnapshot;

/// An axis-aligned detection box in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Box centered on a point.
    pub fn around(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Center of the box, the tracked bat position.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Locates the bat in a raw frame payload.
pub trait ObjectDetector: Send {
    fn detect(&mut self, frame: &[u8]) -> SwingmanResult<Option<BoundingBox>>;
}

/// Extracts a skeletal pose snapshot from a raw frame payload.
pub trait PoseEstimator: Send {
    fn estimate(&mut self, frame: &[u8]) -> SwingmanResult<Option<PoseSnapshot>>;
}

/// Run a detector with the boundary absorber applied: errors and panics
/// become a miss for this frame.
pub fn detect_or_miss(detector: &mut dyn ObjectDetector, frame: &[u8]) -> Option<BoundingBox> {
    match catch_unwind(AssertUnwindSafe(|| detector.detect(frame))) {
        Ok(Ok(detection)) => detection,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Detector failed; treating frame as a miss");
            None
        }
        Err(_) => {
            tracing::warn!("Detector panicked; treating frame as a miss");
            None
        }
    }
}

/// Run a pose estimator with the boundary absorber applied.
pub fn estimate_or_none(
    estimator: &mut dyn PoseEstimator,
    frame: &[u8],
) -> Option<PoseSnapshot> {
    match catch_unwind(AssertUnwindSafe(|| estimator.estimate(frame))) {
        Ok(Ok(pose)) => pose,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Pose estimator failed; skipping pose for this frame");
            None
        }
        Err(_) => {
            tracing::warn!("Pose estimator panicked; skipping pose for this frame");
            None
        }
    }
}

/// A detector that never finds anything. Placeholder for sessions run
/// without a vision backend attached.
#[derive(Debug, Default)]
pub struct NullDetector;

impl ObjectDetector for NullDetector {
    fn detect(&mut self, _frame: &[u8]) -> SwingmanResult<Option<BoundingBox>> {
        Ok(None)
    }
}

/// A detector that replays a pre-recorded sequence of positions, one per
/// `detect` call. Used to drive the full engine from a recorded detection
/// stream; frame payloads are ignored.
#[derive(Debug)]
pub struct ScriptedDetector {
    positions: VecDeque<Option<(f64, f64)>>,
    box_size: f64,
}

impl ScriptedDetector {
    pub fn new(positions: Vec<Option<(f64, f64)>>) -> Self {
        Self {
            positions: positions.into(),
            box_size: 40.0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.positions.len()
    }
}

impl ObjectDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &[u8]) -> SwingmanResult<Option<BoundingBox>> {
        let next = self.positions.pop_front().flatten();
        Ok(next.map(|(x, y)| BoundingBox::around(x, y, self.box_size, self.box_size)))
    }
}
