//! The per-session tracking state machine.
//!
//! One `SwingSession` owns everything a session needs: the trajectory
//! tracker, the heatmap accumulator, the accumulated swing record, and the
//! state enum gating each operation. There is exactly one logical thread of
//! control per session; nothing here is shared across sessions.

use swingman_common::config::TrackingDefaults;
use swingman_common::error::{SwingmanError, SwingmanResult};
use swingman_analysis::{
    detect_impact, score_swing, HeatmapAccumulator, HeatmapConfig, HeatmapRaster, ImpactConfig,
    ScorerConfig, TrackerConfig, TrajectoryTracker,
};
use swingman_model::metrics::{LiveMetrics, SwingMetrics};
use swingman_model::path::MIN_ANALYSIS_POINTS;
use swingman_model::record::SessionRecord;

/// Impacts from swings with zero efficiency still register faintly on the
/// heatmap rather than vanishing.
const MIN_HEATMAP_WEIGHT: f64 = 0.05;

/// State of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No swing in progress; frames are observed but not accumulated.
    Idle,
    /// A swing is in progress; detections extend the current path.
    Tracking,
    /// A swing is being finalized (synchronous, internal to `stop_swing`).
    Finalizing,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Tracking => "tracking",
            SessionState::Finalizing => "finalizing",
        }
    }
}

/// Tunable parameters for one session's analysis pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    pub tracker: TrackerConfig,
    pub impact: ImpactConfig,
    pub scorer: ScorerConfig,
    pub heatmap: HeatmapConfig,
}

impl EngineConfig {
    /// Build a config from the application-level tracking defaults.
    pub fn from_defaults(defaults: &TrackingDefaults) -> Self {
        Self {
            tracker: TrackerConfig {
                smoothing_window: defaults.smoothing_window,
                max_jump_px: defaults.max_jump_px,
            },
            impact: ImpactConfig::default(),
            scorer: ScorerConfig {
                max_expected_speed: defaults.max_expected_speed,
            },
            heatmap: HeatmapConfig {
                width: defaults.frame_width,
                height: defaults.frame_height,
                cols: defaults.heatmap_cols,
                rows: defaults.heatmap_rows,
                ..HeatmapConfig::default()
            },
        }
    }
}

/// Everything produced by a finished session: the accumulated record plus
/// the rendered heatmap, ready for the export collaborator.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub record: SessionRecord,
    pub heatmap: HeatmapRaster,
}

/// One tracking session's complete mutable state.
pub struct SwingSession {
    config: EngineConfig,
    state: SessionState,
    tracker: TrajectoryTracker,
    heatmap: HeatmapAccumulator,
    record: SessionRecord,
    frames_processed: u64,
    ended: bool,
}

impl SwingSession {
    pub fn new(name: &str, config: EngineConfig) -> Self {
        let record = SessionRecord::new(name);
        tracing::info!(session_id = %record.session_id, "Session created");
        Self {
            config,
            state: SessionState::Idle,
            tracker: TrajectoryTracker::new(config.tracker),
            heatmap: HeatmapAccumulator::new(config.heatmap),
            record,
            frames_processed: 0,
            ended: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session_id(&self) -> &str {
        &self.record.session_id
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Begin a new swing attempt. Repeating the command while a swing is
    /// already in progress keeps the current path.
    pub fn start_swing(&mut self) -> SwingmanResult<()> {
        if self.ended {
            return Err(SwingmanError::invalid_transition("ended", "start_swing"));
        }
        if self.state == SessionState::Tracking {
            tracing::warn!(
                session_id = %self.record.session_id,
                "start_swing while already tracking; keeping the in-progress path"
            );
            return Ok(());
        }

        self.tracker.begin_swing();
        self.state = SessionState::Tracking;
        tracing::info!(session_id = %self.record.session_id, "Swing started");
        Ok(())
    }

    /// Ingest one frame's detection outcome. Always returns a live snapshot;
    /// a miss or an outlier simply leaves the path unchanged.
    pub fn ingest_frame(
        &mut self,
        detection: Option<(f64, f64)>,
        frame_seq: u64,
        timestamp: f64,
    ) -> LiveMetrics {
        if self.ended {
            tracing::debug!(
                session_id = %self.record.session_id,
                frame_seq,
                "Frame ignored after session end"
            );
            return self.live_metrics();
        }

        self.frames_processed += 1;

        if self.state == SessionState::Tracking {
            if let Some((x, y)) = detection {
                self.tracker.observe(x, y, frame_seq, timestamp);
            }
        }

        self.live_metrics()
    }

    /// Finalize the in-progress swing: detect impact, score, fold into the
    /// heatmap, and record. The path is cleared only after successful
    /// hand-off to the record; an insufficient path is discarded and the
    /// session returns to Idle either way.
    pub fn stop_swing(&mut self) -> SwingmanResult<SwingMetrics> {
        if self.state != SessionState::Tracking {
            return Err(SwingmanError::invalid_transition(
                self.state.as_str(),
                "stop_swing",
            ));
        }
        self.state = SessionState::Finalizing;

        let path = self.tracker.take_path();
        if !path.is_analyzable() {
            self.state = SessionState::Idle;
            return Err(SwingmanError::insufficient_data(
                path.len(),
                MIN_ANALYSIS_POINTS,
            ));
        }

        let impact = detect_impact(&path, self.config.impact);
        let metrics = score_swing(&path, impact.as_ref(), self.config.scorer);

        if let Some(impact) = &impact {
            let weight = (metrics.efficiency_score / 100.0).max(MIN_HEATMAP_WEIGHT);
            self.heatmap
                .add_impact(impact.point, impact.point, impact.bat_angle_deg, weight);
        }

        let swing_index = self.record.add_swing(metrics.clone()).index;
        tracing::info!(
            session_id = %self.record.session_id,
            swing = swing_index,
            efficiency = metrics.efficiency_score,
            power = metrics.power_score,
            "Swing finalized"
        );

        self.state = SessionState::Idle;
        Ok(metrics)
    }

    /// Terminate the session. Valid from any state; an in-progress swing is
    /// finalized best-effort first. Returns the summary for export.
    pub fn end_session(&mut self) -> SessionSummary {
        if self.state == SessionState::Tracking {
            match self.stop_swing() {
                Ok(_) => {}
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(
                        session_id = %self.record.session_id,
                        error = %e,
                        "In-progress swing discarded at session end"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.record.session_id,
                        error = %e,
                        "Failed to finalize in-progress swing at session end"
                    );
                }
            }
        }

        if !self.ended {
            self.ended = true;
            tracing::info!(
                session_id = %self.record.session_id,
                swings = self.record.swing_count(),
                frames = self.frames_processed,
                "Session ended"
            );
        }

        SessionSummary {
            record: self.record.clone(),
            heatmap: self.heatmap.render(),
        }
    }

    /// Current live snapshot, valid in any state.
    pub fn live_metrics(&self) -> LiveMetrics {
        let tracking = self.state == SessionState::Tracking;
        LiveMetrics {
            state: self.state.as_str().to_string(),
            frames_processed: self.frames_processed,
            swing_points: if tracking { self.tracker.path().len() } else { 0 },
            last_point: if tracking {
                self.tracker.path().last().map(|p| p.position())
            } else {
                None
            },
            swings_recorded: self.record.swing_count(),
        }
    }
}
