//! Wear-time ring: minutes the watch was worn today.

use std::sync::Arc;

use async_trait::async_trait;
use glance_core::{
    ComplicationType, DisplayDecision, InstanceId, ProviderId, StatusProjector, StatusSnapshot, WornSnapshot,
};
use glance_storage::DailyStore;

use crate::fallback::or_fallback;
use crate::provider::ComplicationProvider;

/// Ranged-value provider, always shown.
pub struct WearTimeProvider {
    daily: Arc<dyn DailyStore>,
    projector: StatusProjector,
}

impl WearTimeProvider {
    /// Create the provider.
    pub fn new(daily: Arc<dyn DailyStore>, projector: StatusProjector) -> Self {
        Self { daily, projector }
    }
}

#[async_trait]
impl ComplicationProvider for WearTimeProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WearTime
    }

    fn supported_type(&self) -> ComplicationType {
        ComplicationType::RangedValue
    }

    async fn decide(&self, instance: InstanceId) -> DisplayDecision {
        let day_key = self.daily.current_day_key();
        let worn = or_fallback(
            self.daily.today_worn(&day_key).await.map(|w| w.unwrap_or(0)),
            0,
            self.id(),
            "wear time",
        );
        self.projector.project(StatusSnapshot::Worn(WornSnapshot::new(worn)), instance)
    }

    fn preview_decision(&self) -> DisplayDecision {
        self.projector.worn_preview()
    }
}
