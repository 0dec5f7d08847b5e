//! Heatmap raster to PNG rendering.

use std::path::Path;

use image::{Rgb, RgbImage};

use swingman_common::error::{SwingmanError, SwingmanResult};
use swingman_analysis::HeatmapRaster;

/// Pixels per heatmap cell in the rendered image.
const CELL_PX: u32 = 8;

/// Thermal ramp: black through red and yellow to white.
fn thermal(value: u8) -> Rgb<u8> {
    let t = value as f64 / 255.0;
    let r = (t * 3.0).clamp(0.0, 1.0);
    let g = ((t - 1.0 / 3.0) * 3.0).clamp(0.0, 1.0);
    let b = ((t - 2.0 / 3.0) * 3.0).clamp(0.0, 1.0);
    Rgb([
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ])
}

/// Render a normalized heatmap raster to an RGB image, one CELL_PX square
/// per cell.
pub fn heatmap_image(raster: &HeatmapRaster) -> RgbImage {
    let width = raster.cols as u32 * CELL_PX;
    let height = raster.rows as u32 * CELL_PX;
    let mut img = RgbImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let col = (x / CELL_PX) as usize;
        let row = (y / CELL_PX) as usize;
        let value = raster.cell(col, row).unwrap_or(0);
        *pixel = thermal(value);
    }

    img
}

/// Render and write the heatmap PNG.
pub fn write_heatmap_png(raster: &HeatmapRaster, path: &Path) -> SwingmanResult<()> {
    let img = heatmap_image(raster);
    img.save(path)
        .map_err(|e| SwingmanError::export(format!("Failed to write heatmap {path:?}: {e}")))
}
