//! Replay a recorded detection stream through the full session engine.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use swingman_common::config::AppConfig;
use swingman_model::message::{parse_detections, DetectionKind, ServerMessage, SwingOutcome};
use swingman_session::{
    run_session, EngineConfig, FramePayload, ScriptedDetector, SessionContext, SessionInput,
    SessionRegistry,
};
use swingman_export::FilesystemExporter;

pub async fn run(path: PathBuf, name: String, output: Option<PathBuf>) -> anyhow::Result<()> {
    let jsonl = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read detection stream {path:?}"))?;
    let events = parse_detections(&jsonl)
        .with_context(|| format!("Failed to parse detection stream {path:?}"))?;

    let config = AppConfig::load();
    let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

    tracing::info!(events = events.len(), ?output_dir, "Replaying detection stream");

    // Frames feed the scripted detector in event order
    let positions: Vec<Option<(f64, f64)>> = events
        .iter()
        .filter_map(|event| match event.kind {
            DetectionKind::Detection { x, y } => Some(Some((x, y))),
            DetectionKind::Miss => Some(None),
            DetectionKind::Command { .. } => None,
        })
        .collect();

    let ctx = SessionContext {
        config: EngineConfig::from_defaults(&config.tracking),
        detector: Box::new(ScriptedDetector::new(positions)),
        pose_estimator: None,
        registry: Arc::new(SessionRegistry::new()),
        exporter: Arc::new(FilesystemExporter::new(output_dir)),
    };

    let (input_tx, input_rx) = mpsc::channel(256);
    let (output_tx, mut output_rx) = mpsc::channel(256);
    let session = tokio::spawn(async move { run_session(&name, ctx, input_rx, output_tx).await });

    for event in &events {
        let input = match &event.kind {
            DetectionKind::Detection { .. } | DetectionKind::Miss => {
                SessionInput::Frame(FramePayload::recorded(Vec::new(), event.timestamp))
            }
            DetectionKind::Command { action } => SessionInput::Command(*action),
        };
        input_tx.send(input).await?;
    }
    drop(input_tx);

    let mut swing_number = 0;
    while let Some(message) = output_rx.recv().await {
        match message {
            ServerMessage::TrackingUpdate(_) => {}
            ServerMessage::SwingAnalysis(SwingOutcome::Metrics(metrics)) => {
                swing_number += 1;
                println!("Swing {swing_number}:");
                println!("  efficiency: {:>6.1}", metrics.efficiency_score);
                println!("  power:      {:>6.1}", metrics.power_score);
                println!("  peak speed: {:>8.1} px/s", metrics.peak_speed);
                println!("  duration:   {:>8.3} s", metrics.duration_s);
                match metrics.impact_point {
                    Some((x, y)) => println!("  impact:     ({x:.1}, {y:.1})"),
                    None => println!("  impact:     none"),
                }
            }
            ServerMessage::SwingAnalysis(SwingOutcome::Error { error }) => {
                println!("Swing discarded: {error}");
            }
            ServerMessage::SessionEnd(artifacts) => {
                println!();
                println!(
                    "Session complete: {} CSV row(s)",
                    artifacts.session_csv.lines().count().saturating_sub(1)
                );
                match artifacts.heatmap_path {
                    Some(path) => println!("Heatmap written to {path}"),
                    None => println!("Heatmap not written (see warnings above)"),
                }
            }
        }
    }

    let record = session.await??;
    println!("Session id: {}", record.session_id);

    Ok(())
}
