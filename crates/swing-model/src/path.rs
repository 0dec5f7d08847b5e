//! Swing path types.
//!
//! A swing path is the ordered, append-only sequence of smoothed bat
//! positions for exactly one swing attempt. Points are stored in arrival
//! order; no reordering is permitted. Coordinates are pixels in the
//! detector's frame space.

use serde::{Deserialize, Serialize};

/// Minimum number of path points required for impact and score analysis.
pub const MIN_ANALYSIS_POINTS: usize = 2;

/// A single stabilized position on a swing path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// X coordinate in frame pixels.
    pub x: f64,

    /// Y coordinate in frame pixels.
    pub y: f64,

    /// Sequence number of the frame that produced this point.
    pub frame_seq: u64,

    /// Fractional seconds since the session epoch.
    pub timestamp: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, frame_seq: u64, timestamp: f64) -> Self {
        Self {
            x,
            y,
            frame_seq,
            timestamp,
        }
    }

    /// Position as a plain tuple.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &PathPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// An append-only sequence of path points belonging to one swing attempt.
///
/// Owned exclusively by the session engine for the lifetime of the swing and
/// replaced (never reused) once the swing is finalized or discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwingPath {
    points: Vec<PathPoint>,
}

impl SwingPath {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a point. Arrival order is preserved.
    pub fn push(&mut self, point: PathPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether this path carries enough points for analysis.
    pub fn is_analyzable(&self) -> bool {
        self.points.len() >= MIN_ANALYSIS_POINTS
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&PathPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PathPoint> {
        self.points.last()
    }

    pub fn get(&self, index: usize) -> Option<&PathPoint> {
        self.points.get(index)
    }

    /// Iterate consecutive point pairs (the path's segments).
    pub fn segments(&self) -> impl Iterator<Item = (&PathPoint, &PathPoint)> {
        self.points.iter().zip(self.points.iter().skip(1))
    }

    /// Total arc length: sum of Euclidean distances between consecutive points.
    pub fn total_length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_to(b)).sum()
    }

    /// Straight-line distance from the first point to the last.
    pub fn net_displacement(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.distance_to(last),
            _ => 0.0,
        }
    }

    /// Elapsed time from the first point to the last, in seconds.
    pub fn duration_secs(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }
}

impl From<Vec<PathPoint>> for SwingPath {
    fn from(points: Vec<PathPoint>) -> Self {
        Self { points }
    }
}
