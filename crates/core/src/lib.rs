//! Glance core data models.
//!
//! This crate defines the snapshots, display decisions and the pure
//! projector shared by every watch-face complication provider.

#![warn(missing_docs)]

// Identities
mod id;

// Inputs and outputs of a projection
mod snapshot;
mod decision;

// Projection
mod format;
mod projector;
mod config;

// Time
mod clock;

// Re-exports
pub use id::{InstanceId, ComplicationType, ProviderId, ParseIdError};

pub use snapshot::{StatusSnapshot, WeekGate, ProgressSnapshot, WornSnapshot, HeartbeatSnapshot};
pub use decision::{
    DisplayDecision, Shown, RangedValue, TapTarget, EntryPoint, Evaluation,
    EXTRA_LAUNCH_SOURCE, SOURCE_COMPLICATION, ACTION_RESUME_FROM_COMPLICATION,
};

pub use format::format_hours_minutes;
pub use projector::{
    StatusProjector, EXERCISE_LABEL, EXERCISE_DESCRIPTION, EXERCISE_PREVIEW_DESCRIPTION,
    RESTART_LABEL, RESTART_DESCRIPTION, PROGRESS_PREVIEW_MINUTES, WORN_PREVIEW_MINUTES,
};
pub use config::{ProjectionConfig, ConfigError, FRESH_WINDOW_MS, DEFAULT_GOAL_MINUTES, WEAR_GOAL_MINUTES};

pub use clock::{Clock, SystemClock, FixedClock, day_key_for, DAY_KEY_FORMAT};
