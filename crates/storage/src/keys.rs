//! Preference keys shared by the providers and the writers.

/// Current study week (integer, 1-based).
pub const WEEK_ID: &str = "data.week_id";

/// Epoch millis of the last background service heartbeat.
pub const HEARTBEAT_TIME: &str = "heartbeat.time";
