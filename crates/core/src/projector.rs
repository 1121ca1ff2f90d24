//! The status projector: pure mapping from snapshots to display decisions.
//!
//! Every function here is total over its input. Read failures never reach
//! this module; callers substitute fallback values before building the
//! snapshot.

use crate::config::ProjectionConfig;
use crate::decision::{DisplayDecision, RangedValue, Shown, TapTarget};
use crate::format::format_hours_minutes;
use crate::id::InstanceId;
use crate::snapshot::{HeartbeatSnapshot, ProgressSnapshot, StatusSnapshot, WeekGate, WornSnapshot};

/// Label of the exercise shortcut.
pub const EXERCISE_LABEL: &str = "💪🏽";

/// Accessibility text of the live exercise shortcut.
pub const EXERCISE_DESCRIPTION: &str = "Open exercise";

/// Accessibility text of the exercise shortcut preview.
pub const EXERCISE_PREVIEW_DESCRIPTION: &str = "emoji";

/// Label of the restart prompt.
pub const RESTART_LABEL: &str = "App!";

/// Accessibility text of the restart prompt.
pub const RESTART_DESCRIPTION: &str = "Resume foreground service";

/// Progress shown by the daily progress preview.
pub const PROGRESS_PREVIEW_MINUTES: i64 = 10;

/// Worn time shown by the wear-time preview.
pub const WORN_PREVIEW_MINUTES: i64 = 150;

/// Pure projector parameterised by a [`ProjectionConfig`].
#[derive(Debug, Clone, Default)]
pub struct StatusProjector {
    config: ProjectionConfig,
}

impl StatusProjector {
    /// Create a projector.
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Whether gated complications are visible in this week.
    ///
    /// Hidden during the onboarding week and from the inactive week onwards.
    pub fn is_week_visible(&self, gate: WeekGate) -> bool {
        gate.week_id != self.config.onboarding_week && gate.week_id < self.config.inactive_from_week
    }

    /// Exercise shortcut: emoji opening the exercise screen, gated by week.
    pub fn exercise_shortcut(&self, gate: WeekGate, instance: InstanceId) -> DisplayDecision {
        if !self.is_week_visible(gate) {
            return DisplayDecision::Hidden;
        }
        DisplayDecision::Shown(
            Shown::new(EXERCISE_LABEL, EXERCISE_DESCRIPTION)
                .with_tap_target(TapTarget::open_exercise(instance)),
        )
    }

    /// Daily progress ring, gated by week.
    pub fn daily_progress(&self, gate: WeekGate, progress: ProgressSnapshot) -> DisplayDecision {
        if !self.is_week_visible(gate) {
            return DisplayDecision::Hidden;
        }
        self.progress_ring(progress)
    }

    /// Progress ring with overflow label.
    ///
    /// The ring caps at the goal; past the goal the label switches to the
    /// overflow, e.g. `+1h00'`.
    pub fn progress_ring(&self, progress: ProgressSnapshot) -> DisplayDecision {
        let p = progress.progress_minutes();
        let g = progress.goal_minutes();
        let label = if p <= g {
            format_hours_minutes(p)
        } else {
            format!("+{}", format_hours_minutes(p - g))
        };
        let ranged = RangedValue::new(p.min(g) as f32, 0.0, g as f32);
        tracing::debug!(progress = p, goal = g, %label, "projected progress ring");

        DisplayDecision::Shown(
            Shown::new(label.clone(), format!("Watch progress {} today", label))
                .with_title(label)
                .with_ranged_value(ranged),
        )
    }

    /// Worn-time ring against the configured wear goal.
    ///
    /// The ring clamps to the goal, the label always shows the real time.
    pub fn worn_ring(&self, worn: WornSnapshot) -> DisplayDecision {
        let w = worn.worn_minutes();
        let goal = self.config.wear_goal_minutes.max(1);
        let label = format_hours_minutes(w);
        let ranged = RangedValue::new(w.min(goal) as f32, 0.0, goal as f32);

        DisplayDecision::Shown(
            Shown::new(label.clone(), format!("Watch worn {} today", label)).with_ranged_value(ranged),
        )
    }

    /// Whether the heartbeat is recent enough to count as alive.
    ///
    /// A heartbeat of 0 means the service was never seen.
    pub fn is_alive(&self, heartbeat: HeartbeatSnapshot) -> bool {
        heartbeat.last_beat_epoch_millis() > 0 && heartbeat.age_millis() < self.config.fresh_window_ms
    }

    /// Restart prompt, hidden while the service is alive.
    pub fn liveness(&self, heartbeat: HeartbeatSnapshot, instance: InstanceId) -> DisplayDecision {
        if self.is_alive(heartbeat) {
            return DisplayDecision::Hidden;
        }
        DisplayDecision::Shown(
            Shown::new(RESTART_LABEL, RESTART_DESCRIPTION)
                .with_tap_target(TapTarget::resume_service(instance)),
        )
    }

    /// Project any snapshot.
    ///
    /// `instance` only parameterises tap targets.
    pub fn project(&self, snapshot: StatusSnapshot, instance: InstanceId) -> DisplayDecision {
        match snapshot {
            StatusSnapshot::WeekGate(gate) => self.exercise_shortcut(gate, instance),
            StatusSnapshot::Progress { gate, progress } => self.daily_progress(gate, progress),
            StatusSnapshot::Worn(worn) => self.worn_ring(worn),
            StatusSnapshot::Heartbeat(heartbeat) => self.liveness(heartbeat, instance),
        }
    }

    // === Editor previews ===

    /// Preview of the exercise shortcut, without tap target.
    pub fn exercise_preview(&self) -> DisplayDecision {
        DisplayDecision::Shown(Shown::new(EXERCISE_LABEL, EXERCISE_PREVIEW_DESCRIPTION))
    }

    /// Preview of the daily progress ring against the default goal.
    pub fn progress_preview(&self) -> DisplayDecision {
        self.progress_ring(ProgressSnapshot::new(
            PROGRESS_PREVIEW_MINUTES,
            i64::from(self.config.default_goal_minutes),
        ))
    }

    /// Preview of the wear-time ring.
    pub fn worn_preview(&self) -> DisplayDecision {
        self.worn_ring(WornSnapshot::new(WORN_PREVIEW_MINUTES))
    }

    /// Preview of the restart prompt, without tap target.
    pub fn liveness_preview(&self) -> DisplayDecision {
        DisplayDecision::Shown(Shown::new(RESTART_LABEL, RESTART_DESCRIPTION))
    }
}
