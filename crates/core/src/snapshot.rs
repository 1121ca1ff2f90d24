//! Status snapshots: one immutable read of external state per request.
//!
//! Constructors coerce raw store values into the ranges the projector
//! relies on, so a snapshot is always valid input.

use serde::{Deserialize, Serialize};

/// Study week read from preferences, gates visibility of two providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGate {
    /// Current study week
    pub week_id: i64,
}

impl WeekGate {
    /// Wrap a week id.
    pub fn new(week_id: i64) -> Self {
        Self { week_id }
    }
}

/// Today's cumulative progress and the goal it is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProgress")]
pub struct ProgressSnapshot {
    progress_minutes: u32,
    goal_minutes: u32,
}

#[derive(Deserialize)]
struct RawProgress {
    progress_minutes: i64,
    goal_minutes: i64,
}

impl From<RawProgress> for ProgressSnapshot {
    fn from(raw: RawProgress) -> Self {
        Self::new(raw.progress_minutes, raw.goal_minutes)
    }
}

impl ProgressSnapshot {
    /// Build from raw store values; progress is floored at 0 and goal at 1.
    pub fn new(progress_minutes: i64, goal_minutes: i64) -> Self {
        Self {
            progress_minutes: clamp_minutes(progress_minutes, 0),
            goal_minutes: clamp_minutes(goal_minutes, 1),
        }
    }

    /// Progress minutes, never negative.
    pub fn progress_minutes(&self) -> u32 {
        self.progress_minutes
    }

    /// Goal minutes, at least 1.
    pub fn goal_minutes(&self) -> u32 {
        self.goal_minutes
    }
}

/// Minutes the watch has been worn today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WornSnapshot {
    worn_minutes: u32,
}

impl WornSnapshot {
    /// Build from a raw store value; negatives become 0.
    pub fn new(worn_minutes: i64) -> Self {
        Self {
            worn_minutes: clamp_minutes(worn_minutes, 0),
        }
    }

    /// Worn minutes, never negative.
    pub fn worn_minutes(&self) -> u32 {
        self.worn_minutes
    }
}

/// Last heartbeat of the background service and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatSnapshot {
    last_beat_epoch_millis: i64,
    now_epoch_millis: i64,
}

impl HeartbeatSnapshot {
    /// Build from a stored timestamp (0 when never seen) and the current time.
    pub fn new(last_beat_epoch_millis: i64, now_epoch_millis: i64) -> Self {
        Self {
            last_beat_epoch_millis: last_beat_epoch_millis.max(0),
            now_epoch_millis,
        }
    }

    /// Last heartbeat, 0 when none was recorded.
    pub fn last_beat_epoch_millis(&self) -> i64 {
        self.last_beat_epoch_millis
    }

    /// Time of the evaluation.
    pub fn now_epoch_millis(&self) -> i64 {
        self.now_epoch_millis
    }

    /// Age of the last heartbeat. Negative if the clock moved backwards.
    pub fn age_millis(&self) -> i64 {
        self.now_epoch_millis.saturating_sub(self.last_beat_epoch_millis)
    }
}

/// Any snapshot a provider can hand to the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusSnapshot {
    /// Visibility gate only
    WeekGate(WeekGate),
    /// Gate plus progress ring
    Progress {
        /// Visibility gate
        gate: WeekGate,
        /// Progress against goal
        progress: ProgressSnapshot,
    },
    /// Worn-time ring
    Worn(WornSnapshot),
    /// Liveness indicator
    Heartbeat(HeartbeatSnapshot),
}

fn clamp_minutes(raw: i64, floor: u32) -> u32 {
    u32::try_from(raw.max(i64::from(floor))).unwrap_or(u32::MAX)
}
