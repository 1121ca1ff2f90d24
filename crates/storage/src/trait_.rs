//! Collaborator contracts for the external state the providers read.

use async_trait::async_trait;

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur reading or writing external state.
///
/// On read paths providers recover from every variant with a fallback value.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// The store is not reachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Key/value preferences holding small integers and timestamps.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read an integer, returning `default` when the key is absent.
    async fn get_i64(&self, key: &str, default: i64) -> Result<i64>;

    /// Write an integer.
    async fn put_i64(&self, key: &str, value: i64) -> Result<()>;
}

/// Daily aggregation store: rows keyed by calendar day.
#[async_trait]
pub trait DailyStore: Send + Sync {
    /// Key of the current calendar day.
    fn current_day_key(&self) -> String;

    /// Last cumulative progress entry recorded for `day_key`.
    async fn today_progress(&self, day_key: &str) -> Result<Option<i64>>;

    /// Last worn-minutes entry recorded for `day_key`.
    async fn today_worn(&self, day_key: &str) -> Result<Option<i64>>;

    /// Last adjusted daily goal.
    async fn adjusted_goal(&self) -> Result<Option<i64>>;

    /// Append a cumulative progress entry for `day_key`.
    async fn record_progress(&self, day_key: &str, cumulative_minutes: i64) -> Result<()>;

    /// Append a worn-minutes entry for `day_key`.
    async fn record_worn(&self, day_key: &str, worn_minutes: i64) -> Result<()>;

    /// Append an adjusted daily goal.
    async fn record_adjusted_goal(&self, goal_minutes: i64) -> Result<()>;
}
