//! Default-on-failure for collaborator reads.

use glance_core::{ProjectionConfig, ProviderId, WeekGate};
use glance_storage::{keys, PreferenceStore, Result};
use tracing::warn;

/// Unwrap a read, substituting `fallback` and logging the failure.
pub(crate) fn or_fallback<T: Copy + std::fmt::Debug>(
    result: Result<T>,
    fallback: T,
    provider: ProviderId,
    what: &'static str,
) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            warn!(%provider, what, %error, ?fallback, "read failed, using fallback");
            fallback
        }
    }
}

/// Read the study week gate, defaulting to the configured week.
pub(crate) async fn read_week_gate(
    prefs: &dyn PreferenceStore,
    config: &ProjectionConfig,
    provider: ProviderId,
) -> WeekGate {
    let default = config.default_week_id;
    let week_id = or_fallback(prefs.get_i64(keys::WEEK_ID, default).await, default, provider, "week id");
    WeekGate::new(week_id)
}
