//! Score a detection stream as one swing, offline.

use std::path::PathBuf;

use anyhow::Context;

use swingman_common::config::AppConfig;
use swingman_analysis::{
    detect_impact, score_swing, ImpactConfig, ScorerConfig, TrackerConfig, TrajectoryTracker,
};
use swingman_model::message::{parse_detections, DetectionKind};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let jsonl = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read detection stream {path:?}"))?;
    let events = parse_detections(&jsonl)
        .with_context(|| format!("Failed to parse detection stream {path:?}"))?;

    let defaults = AppConfig::load().tracking;
    let mut tracker = TrajectoryTracker::new(TrackerConfig {
        smoothing_window: defaults.smoothing_window,
        max_jump_px: defaults.max_jump_px,
    });
    tracker.begin_swing();

    // Every detection in the stream belongs to the one swing; commands and
    // misses are skipped
    let mut frame_seq: u64 = 0;
    for event in &events {
        if let DetectionKind::Detection { x, y } = event.kind {
            tracker.observe(x, y, frame_seq, event.timestamp);
        }
        frame_seq += 1;
    }

    let swing_path = tracker.take_path();
    if !swing_path.is_analyzable() {
        anyhow::bail!(
            "Stream contains {} usable point(s); scoring needs at least 2",
            swing_path.len()
        );
    }

    let impact = detect_impact(&swing_path, ImpactConfig::default());
    let metrics = score_swing(
        &swing_path,
        impact.as_ref(),
        ScorerConfig {
            max_expected_speed: defaults.max_expected_speed,
        },
    );

    println!("Points:      {}", swing_path.len());
    println!("Efficiency:  {:.1}", metrics.efficiency_score);
    println!("Power:       {:.1}", metrics.power_score);
    println!("Peak speed:  {:.1} px/s", metrics.peak_speed);
    println!("Path length: {:.1} px", metrics.path_length);
    println!("Duration:    {:.3} s", metrics.duration_s);
    match &impact {
        Some(impact) => println!(
            "Impact:      ({:.1}, {:.1}) at {:.1} deg (point {})",
            impact.point.0, impact.point.1, impact.bat_angle_deg, impact.path_index
        ),
        None => println!("Impact:      none"),
    }

    Ok(())
}
