//! Filesystem session exporter.
//!
//! Writes `<output>/<session_id>/swings.csv` and `heatmap.png` for a
//! finished session. Disk writes run on the blocking pool so the ingestion
//! path never waits on I/O; the caller still awaits the result, keeping the
//! session-end message sequenced after its own export. A failed write
//! degrades to a warning, with the CSV content surviving in-band.

use std::path::PathBuf;

use async_trait::async_trait;

use swingman_common::error::{SwingmanError, SwingmanResult};
use swingman_analysis::HeatmapRaster;
use swingman_model::message::FinalArtifacts;
use swingman_model::record::SessionRecord;
use swingman_session::SessionExporter;

use crate::csv::session_csv;
use crate::heatmap_image::write_heatmap_png;

/// Exports finished sessions under a fixed output directory.
#[derive(Debug, Clone)]
pub struct FilesystemExporter {
    output_dir: PathBuf,
}

impl FilesystemExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    fn write_artifacts(
        session_dir: PathBuf,
        csv: String,
        heatmap: HeatmapRaster,
    ) -> FinalArtifacts {
        let mut heatmap_path = None;

        if let Err(e) = std::fs::create_dir_all(&session_dir) {
            tracing::warn!(dir = ?session_dir, error = %e, "Failed to create session directory");
            return FinalArtifacts {
                session_csv: csv,
                heatmap_path,
            };
        }

        let csv_path = session_dir.join("swings.csv");
        if let Err(e) = std::fs::write(&csv_path, &csv) {
            tracing::warn!(path = ?csv_path, error = %e, "Failed to write swing CSV");
        } else {
            tracing::info!(path = ?csv_path, "Swing CSV written");
        }

        let png_path = session_dir.join("heatmap.png");
        match write_heatmap_png(&heatmap, &png_path) {
            Ok(()) => {
                tracing::info!(path = ?png_path, "Heatmap written");
                heatmap_path = Some(png_path.to_string_lossy().into_owned());
            }
            Err(e) => {
                tracing::warn!(path = ?png_path, error = %e, "Failed to write heatmap");
            }
        }

        FinalArtifacts {
            session_csv: csv,
            heatmap_path,
        }
    }
}

#[async_trait]
impl SessionExporter for FilesystemExporter {
    async fn export(
        &self,
        record: &SessionRecord,
        heatmap: &HeatmapRaster,
    ) -> SwingmanResult<FinalArtifacts> {
        let session_dir = self.output_dir.join(&record.session_id);
        let csv = session_csv(record);
        let heatmap = heatmap.clone();

        tokio::task::spawn_blocking(move || Self::write_artifacts(session_dir, csv, heatmap))
            .await
            .map_err(|e| SwingmanError::export(format!("Export task failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use swingman_model::metrics::SwingMetrics;

    fn sample_record() -> SessionRecord {
        let mut record = SessionRecord::new("test");
        record.add_swing(SwingMetrics {
            efficiency_score: 90.0,
            power_score: 55.0,
            peak_speed: 1100.0,
            path_length: 420.0,
            duration_s: 0.4,
            impact_point: Some((640.0, 480.0)),
        });
        record
    }

    fn sample_raster() -> HeatmapRaster {
        HeatmapRaster {
            cols: 4,
            rows: 4,
            cells: vec![0; 16],
        }
    }

    #[tokio::test]
    async fn test_export_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FilesystemExporter::new(dir.path());
        let record = sample_record();

        let artifacts = exporter.export(&record, &sample_raster()).await.unwrap();

        let session_dir = dir.path().join(&record.session_id);
        assert!(session_dir.join("swings.csv").exists());
        assert!(session_dir.join("heatmap.png").exists());
        assert_eq!(
            artifacts.heatmap_path.as_deref(),
            session_dir.join("heatmap.png").to_str()
        );

        let on_disk = std::fs::read_to_string(session_dir.join("swings.csv")).unwrap();
        assert_eq!(on_disk, artifacts.session_csv);
        assert_eq!(on_disk.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_unwritable_target_still_returns_csv_in_band() {
        // A file where the output directory should be makes every write fail
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"x").unwrap();

        let exporter = FilesystemExporter::new(&blocker);
        let record = sample_record();
        let artifacts = exporter.export(&record, &sample_raster()).await.unwrap();

        assert!(artifacts.heatmap_path.is_none());
        assert!(artifacts.session_csv.contains("efficiency_score"));
    }
}
