//! Impact heatmap accumulation.
//!
//! Accumulates weighted impact locations across a session into a fixed-size
//! density grid. Each impact deposits an anisotropic splat oriented along
//! the bat angle through the bat center, representing impact-surface extent
//! rather than a single pixel. Accumulation stays unnormalized; the render
//! step maps the running sums to 0–255 at generation time, so rendering with
//! zero impacts is well defined (an all-zero raster). Memory is O(grid
//! cells), independent of the impact count.

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;

/// Heatmap grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// Grid resolution.
    pub cols: usize,
    pub rows: usize,
    /// Half-length of the bat splat along the bat angle, pixels.
    pub splat_half_len_px: f64,
    /// Samples deposited on each side of the splat center.
    pub splat_samples: usize,
}

impl HeatmapConfig {
    /// The grid partition this heatmap accumulates over.
    pub fn grid(&self) -> GridConfig {
        GridConfig {
            width: self.width,
            height: self.height,
            cols: self.cols,
            rows: self.rows,
        }
    }
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            cols: 96,
            rows: 54,
            splat_half_len_px: 60.0,
            splat_samples: 6,
        }
    }
}

/// A rendered, normalized heatmap (0 = cold, 255 = hottest cell).
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRaster {
    pub cols: usize,
    pub rows: usize,
    /// Row-major cell intensities.
    pub cells: Vec<u8>,
}

impl HeatmapRaster {
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }
}

/// Running density of weighted impact contributions for one session.
///
/// Exclusive to a single session; state grows only in accumulated weight,
/// never in memory.
#[derive(Debug, Clone)]
pub struct HeatmapAccumulator {
    config: HeatmapConfig,
    cells: Vec<f64>,
    impacts: usize,
}

impl HeatmapAccumulator {
    pub fn new(config: HeatmapConfig) -> Self {
        let cells = vec![0.0; config.cols.max(1) * config.rows.max(1)];
        Self {
            config,
            cells,
            impacts: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(HeatmapConfig::default())
    }

    /// Number of impacts accumulated so far.
    pub fn impact_count(&self) -> usize {
        self.impacts
    }

    /// Raw accumulated weight of one cell.
    pub fn cell_weight(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.config.cols || row >= self.config.rows {
            return None;
        }
        Some(self.cells[row * self.config.cols + col])
    }

    /// Accumulate one impact.
    ///
    /// The full `weight` lands at `point`; additional falloff contributions
    /// are smeared along `bat_angle_deg` through `bat_center`. Out-of-extent
    /// positions clamp to edge cells, matching the grid classifier.
    pub fn add_impact(
        &mut self,
        point: (f64, f64),
        bat_center: (f64, f64),
        bat_angle_deg: f64,
        weight: f64,
    ) {
        let weight = weight.max(0.0);
        self.deposit(point.0, point.1, weight);

        let samples = self.config.splat_samples;
        if samples > 0 && self.config.splat_half_len_px > 0.0 {
            let angle = bat_angle_deg.to_radians();
            let (dir_x, dir_y) = (angle.cos(), angle.sin());
            for i in 1..=samples {
                let frac = i as f64 / samples as f64;
                let offset = frac * self.config.splat_half_len_px;
                // Linear falloff toward the bat tips
                let contribution = weight * (1.0 - frac);
                self.deposit(
                    bat_center.0 + dir_x * offset,
                    bat_center.1 + dir_y * offset,
                    contribution,
                );
                self.deposit(
                    bat_center.0 - dir_x * offset,
                    bat_center.1 - dir_y * offset,
                    contribution,
                );
            }
        }

        self.impacts += 1;
    }

    fn deposit(&mut self, x: f64, y: f64, weight: f64) {
        let grid = self.config.grid();
        let index = grid.index_of(grid.zone_of(x, y));
        self.cells[index] += weight;
    }

    /// Render the accumulated density to a normalized raster.
    ///
    /// Zero accumulated impacts produce an all-zero raster rather than
    /// failing.
    pub fn render(&self) -> HeatmapRaster {
        let max = self.cells.iter().copied().fold(0.0_f64, f64::max);
        let cells = if max > 0.0 {
            self.cells
                .iter()
                .map(|value| ((value / max) * 255.0).round() as u8)
                .collect()
        } else {
            vec![0u8; self.cells.len()]
        };

        HeatmapRaster {
            cols: self.config.cols.max(1),
            rows: self.config.rows.max(1),
            cells,
        }
    }
}
