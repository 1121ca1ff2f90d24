//! Write side: record state changes and ask the host to re-poll.

use std::sync::Arc;

use glance_core::{Clock, ProviderId};
use glance_storage::{keys, DailyStore, PreferenceStore, Result};
use tracing::info;

use crate::refresh::RefreshRequester;

/// Records external state changes and requests refreshes of the providers
/// that display them.
pub struct StatusUpdater {
    prefs: Arc<dyn PreferenceStore>,
    daily: Arc<dyn DailyStore>,
    clock: Arc<dyn Clock>,
    refresh: Arc<dyn RefreshRequester>,
}

impl StatusUpdater {
    /// Create an updater.
    pub fn new(
        prefs: Arc<dyn PreferenceStore>,
        daily: Arc<dyn DailyStore>,
        clock: Arc<dyn Clock>,
        refresh: Arc<dyn RefreshRequester>,
    ) -> Self {
        Self { prefs, daily, clock, refresh }
    }

    /// Store a heartbeat at the current time. Returns the stored timestamp.
    pub async fn record_heartbeat(&self) -> Result<i64> {
        let now = self.clock.now_epoch_millis();
        self.prefs.put_i64(keys::HEARTBEAT_TIME, now).await?;
        self.refresh.request_refresh_all(ProviderId::ServiceAlive);
        Ok(now)
    }

    /// Store the current study week.
    pub async fn set_week(&self, week_id: i64) -> Result<()> {
        self.prefs.put_i64(keys::WEEK_ID, week_id).await?;
        info!(week_id, "study week updated");
        self.refresh.request_refresh_all(ProviderId::ExerciseShortcut);
        self.refresh.request_refresh_all(ProviderId::DailyProgress);
        Ok(())
    }

    /// Append today's cumulative progress.
    pub async fn record_progress(&self, cumulative_minutes: i64) -> Result<()> {
        let day_key = self.daily.current_day_key();
        self.daily.record_progress(&day_key, cumulative_minutes).await?;
        self.refresh.request_refresh_all(ProviderId::DailyProgress);
        Ok(())
    }

    /// Append a new adjusted daily goal.
    pub async fn set_adjusted_goal(&self, goal_minutes: i64) -> Result<()> {
        self.daily.record_adjusted_goal(goal_minutes).await?;
        self.refresh.request_refresh_all(ProviderId::DailyProgress);
        Ok(())
    }

    /// Append today's worn minutes.
    pub async fn record_worn(&self, worn_minutes: i64) -> Result<()> {
        let day_key = self.daily.current_day_key();
        self.daily.record_worn(&day_key, worn_minutes).await?;
        self.refresh.request_refresh_all(ProviderId::WearTime);
        Ok(())
    }
}
