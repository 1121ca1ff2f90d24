//! Daily progress ring against the adjusted daily goal.

use std::sync::Arc;

use async_trait::async_trait;
use glance_core::{
    ComplicationType, DisplayDecision, InstanceId, ProgressSnapshot, ProviderId, StatusProjector, StatusSnapshot,
};
use glance_storage::{DailyStore, PreferenceStore};
use tracing::debug;

use crate::fallback::{or_fallback, read_week_gate};
use crate::provider::ComplicationProvider;

/// Ranged-value provider, hidden outside the active study weeks.
pub struct DailyProgressProvider {
    prefs: Arc<dyn PreferenceStore>,
    daily: Arc<dyn DailyStore>,
    projector: StatusProjector,
}

impl DailyProgressProvider {
    /// Create the provider.
    pub fn new(
        prefs: Arc<dyn PreferenceStore>,
        daily: Arc<dyn DailyStore>,
        projector: StatusProjector,
    ) -> Self {
        Self { prefs, daily, projector }
    }

    /// Load today's progress and goal.
    ///
    /// Missing progress reads as 0. A missing, non-positive or unreadable
    /// goal falls back to the configured default.
    async fn load_today(&self) -> ProgressSnapshot {
        let day_key = self.daily.current_day_key();
        let default_goal = i64::from(self.projector.config().default_goal_minutes);

        let progress = or_fallback(
            self.daily.today_progress(&day_key).await.map(|p| p.unwrap_or(0)),
            0,
            self.id(),
            "daily progress",
        );
        let goal = or_fallback(
            self.daily
                .adjusted_goal()
                .await
                .map(|g| g.filter(|g| *g > 0).unwrap_or(default_goal)),
            default_goal,
            self.id(),
            "adjusted goal",
        );

        debug!(%day_key, progress, goal, "loaded daily progress");
        ProgressSnapshot::new(progress, goal)
    }
}

#[async_trait]
impl ComplicationProvider for DailyProgressProvider {
    fn id(&self) -> ProviderId {
        ProviderId::DailyProgress
    }

    fn supported_type(&self) -> ComplicationType {
        ComplicationType::RangedValue
    }

    async fn decide(&self, instance: InstanceId) -> DisplayDecision {
        let gate = read_week_gate(self.prefs.as_ref(), self.projector.config(), self.id()).await;
        if !self.projector.is_week_visible(gate) {
            return DisplayDecision::Hidden;
        }
        let progress = self.load_today().await;
        self.projector.project(StatusSnapshot::Progress { gate, progress }, instance)
    }

    fn preview_decision(&self) -> DisplayDecision {
        self.projector.progress_preview()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ComplicationRequest;
    use glance_core::{FixedClock, RangedValue};
    use glance_storage::{keys, MemoryDailyStore, MemoryPreferenceStore};

    const TODAY: &str = "2026-10-16";

    async fn setup(week: i64) -> (Arc<MemoryPreferenceStore>, Arc<MemoryDailyStore>, DailyProgressProvider) {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.put_i64(keys::WEEK_ID, week).await.unwrap();
        let daily = Arc::new(MemoryDailyStore::with_clock(Arc::new(
            FixedClock::at(0).with_day_key(TODAY),
        )));
        let provider = DailyProgressProvider::new(prefs.clone(), daily.clone(), StatusProjector::default());
        (prefs, daily, provider)
    }

    fn request() -> ComplicationRequest {
        ComplicationRequest::new(ComplicationType::RangedValue, 4)
    }

    #[tokio::test]
    async fn test_progress_against_adjusted_goal() {
        let (_prefs, daily, provider) = setup(3).await;
        daily.record_progress(TODAY, 90).await.unwrap();
        daily.record_adjusted_goal(600).await.unwrap();

        let evaluation = provider.evaluate(&request()).await;
        let shown = evaluation.decision().unwrap().shown().unwrap().clone();
        assert_eq!(shown.label, "1h30'");
        assert_eq!(shown.ranged_value, Some(RangedValue::new(90.0, 0.0, 600.0)));
    }

    #[tokio::test]
    async fn test_overflow_label() {
        let (_prefs, daily, provider) = setup(2).await;
        daily.record_progress(TODAY, 900).await.unwrap();

        let evaluation = provider.evaluate(&request()).await;
        let shown = evaluation.decision().unwrap().shown().unwrap().clone();
        assert_eq!(shown.label, "+1h00'");
        assert_eq!(shown.ranged_value.unwrap().value(), 840.0);
    }

    #[tokio::test]
    async fn test_non_positive_goal_uses_default() {
        let (_prefs, daily, provider) = setup(3).await;
        daily.record_adjusted_goal(0).await.unwrap();

        let evaluation = provider.evaluate(&request()).await;
        let ranged = evaluation.decision().unwrap().shown().unwrap().ranged_value.unwrap();
        assert_eq!(ranged.max(), 840.0);
        assert_eq!(ranged.value(), 0.0);
    }

    #[tokio::test]
    async fn test_read_failure_uses_defaults() {
        let (_prefs, daily, provider) = setup(3).await;
        daily.record_progress(TODAY, 120).await.unwrap();
        daily.set_fail_reads(true);

        let evaluation = provider.evaluate(&request()).await;
        let shown = evaluation.decision().unwrap().shown().unwrap().clone();
        assert_eq!(shown.label, "0h00'");
        assert_eq!(shown.ranged_value, Some(RangedValue::new(0.0, 0.0, 840.0)));
    }

    #[tokio::test]
    async fn test_hidden_weeks_skip_daily_reads() {
        for week in [1, 6, 9] {
            let (_prefs, daily, provider) = setup(week).await;
            daily.set_fail_reads(true);
            let evaluation = provider.evaluate(&request()).await;
            assert!(evaluation.decision().unwrap().is_hidden(), "week {week}");
        }
    }

    #[tokio::test]
    async fn test_other_days_ignored() {
        let (_prefs, daily, provider) = setup(3).await;
        daily.record_progress("2026-10-15", 400).await.unwrap();

        let evaluation = provider.evaluate(&request()).await;
        assert_eq!(evaluation.decision().unwrap().shown().unwrap().label, "0h00'");
    }

    #[tokio::test]
    async fn test_short_text_unsupported() {
        let (_prefs, _daily, provider) = setup(3).await;
        let evaluation = provider
            .evaluate(&ComplicationRequest::new(ComplicationType::ShortText, 4))
            .await;
        assert!(evaluation.is_unsupported());
    }
}
