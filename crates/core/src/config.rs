//! Thresholds and fallback constants used by the projector and providers.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Heartbeats younger than this are considered fresh.
pub const FRESH_WINDOW_MS: i64 = 120_000;

/// Daily goal used when no adjusted goal can be read (14h).
pub const DEFAULT_GOAL_MINUTES: u32 = 840;

/// Fixed goal of the wear-time ring (14h).
pub const WEAR_GOAL_MINUTES: u32 = 840;

/// Projection configuration.
///
/// Every field has a default, so a config file only lists what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Maximum heartbeat age before the service counts as stale
    pub fresh_window_ms: i64,

    /// Goal used when the adjusted goal is missing, invalid or unreadable
    pub default_goal_minutes: u32,

    /// Goal of the wear-time ring
    pub wear_goal_minutes: u32,

    /// Week during which gated complications stay hidden
    pub onboarding_week: i64,

    /// First week from which gated complications stay hidden
    pub inactive_from_week: i64,

    /// Week assumed when preferences cannot tell
    pub default_week_id: i64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fresh_window_ms: FRESH_WINDOW_MS,
            default_goal_minutes: DEFAULT_GOAL_MINUTES,
            wear_goal_minutes: WEAR_GOAL_MINUTES,
            onboarding_week: 1,
            inactive_from_week: 6,
            default_week_id: 1,
        }
    }
}

impl ProjectionConfig {
    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded projection config");
        Ok(config)
    }

    /// Reject values the projector cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fresh_window_ms <= 0 {
            return Err(ConfigError::Invalid("fresh_window_ms must be positive".into()));
        }
        if self.default_goal_minutes == 0 {
            return Err(ConfigError::Invalid("default_goal_minutes must be at least 1".into()));
        }
        if self.wear_goal_minutes == 0 {
            return Err(ConfigError::Invalid("wear_goal_minutes must be at least 1".into()));
        }
        Ok(())
    }
}

/// Errors loading a [`ProjectionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for this config
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}
