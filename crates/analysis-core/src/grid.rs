//! Spatial grid classification.
//!
//! Partitions frame space into a fixed N×M grid and maps points to cells.
//! Points outside the configured extents clamp to the nearest edge zone;
//! frame-edge detections are common and must never fail classification.

use serde::{Deserialize, Serialize};

/// Grid configuration: pixel extents and cell counts.
///
/// Must stay constant for the lifetime of a session; changing it mid-session
/// invalidates prior zone accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            cols: 8,
            rows: 8,
        }
    }
}

/// One cell of the grid partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridZone {
    pub col: usize,
    pub row: usize,
}

impl GridConfig {
    /// Classify a point into its grid zone. Pure, no failure mode:
    /// out-of-extent points clamp to the nearest edge zone.
    pub fn zone_of(&self, x: f64, y: f64) -> GridZone {
        let cols = self.cols.max(1);
        let rows = self.rows.max(1);

        let fx = (x / self.width.max(1.0)).clamp(0.0, 0.999_999);
        let fy = (y / self.height.max(1.0)).clamp(0.0, 0.999_999);

        GridZone {
            col: (fx * cols as f64).floor() as usize,
            row: (fy * rows as f64).floor() as usize,
        }
    }

    /// Flat cell index for a zone (row-major).
    pub fn index_of(&self, zone: GridZone) -> usize {
        zone.row * self.cols.max(1) + zone.col
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.cols.max(1) * self.rows.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_of_is_deterministic() {
        let config = GridConfig::default();
        let a = config.zone_of(960.0, 540.0);
        let b = config.zone_of(960.0, 540.0);
        assert_eq!(a, b);
        assert_eq!(a, GridZone { col: 4, row: 4 });
    }

    #[test]
    fn test_corners() {
        let config = GridConfig {
            width: 100.0,
            height: 100.0,
            cols: 10,
            rows: 10,
        };
        assert_eq!(config.zone_of(0.0, 0.0), GridZone { col: 0, row: 0 });
        assert_eq!(config.zone_of(99.9, 99.9), GridZone { col: 9, row: 9 });
    }

    #[test]
    fn test_out_of_extent_clamps_to_edge_zone() {
        let config = GridConfig {
            width: 100.0,
            height: 100.0,
            cols: 10,
            rows: 10,
        };
        assert_eq!(config.zone_of(-50.0, 50.0), GridZone { col: 0, row: 5 });
        assert_eq!(config.zone_of(250.0, 50.0), GridZone { col: 9, row: 5 });
        assert_eq!(config.zone_of(50.0, -1.0), GridZone { col: 5, row: 0 });
        assert_eq!(config.zone_of(50.0, 1e9), GridZone { col: 5, row: 9 });

        // Clamped result equals the nearest in-bounds zone
        assert_eq!(config.zone_of(-50.0, 50.0), config.zone_of(0.0, 50.0));
    }

    #[test]
    fn test_index_is_row_major_and_in_range() {
        let config = GridConfig {
            width: 100.0,
            height: 100.0,
            cols: 4,
            rows: 3,
        };
        let zone = config.zone_of(99.0, 99.0);
        assert_eq!(config.index_of(zone), config.cell_count() - 1);
        assert_eq!(config.index_of(GridZone { col: 1, row: 2 }), 9);
    }
}
