//! Service alive check: restart prompt while the heartbeat is stale.

use std::sync::Arc;

use async_trait::async_trait;
use glance_core::{
    Clock, ComplicationType, DisplayDecision, HeartbeatSnapshot, InstanceId, ProviderId, StatusProjector,
    StatusSnapshot,
};
use glance_storage::{keys, PreferenceStore};

use crate::fallback::or_fallback;
use crate::provider::ComplicationProvider;

/// Short-text provider, hidden while the background service beats.
pub struct ServiceAliveProvider {
    prefs: Arc<dyn PreferenceStore>,
    clock: Arc<dyn Clock>,
    projector: StatusProjector,
}

impl ServiceAliveProvider {
    /// Create the provider.
    pub fn new(prefs: Arc<dyn PreferenceStore>, clock: Arc<dyn Clock>, projector: StatusProjector) -> Self {
        Self { prefs, clock, projector }
    }
}

#[async_trait]
impl ComplicationProvider for ServiceAliveProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ServiceAlive
    }

    fn supported_type(&self) -> ComplicationType {
        ComplicationType::ShortText
    }

    async fn decide(&self, instance: InstanceId) -> DisplayDecision {
        // An unreadable heartbeat is treated like a service never seen.
        let last_beat = or_fallback(
            self.prefs.get_i64(keys::HEARTBEAT_TIME, 0).await,
            0,
            self.id(),
            "heartbeat",
        );
        let heartbeat = HeartbeatSnapshot::new(last_beat, self.clock.now_epoch_millis());
        self.projector.project(StatusSnapshot::Heartbeat(heartbeat), instance)
    }

    fn preview_decision(&self) -> DisplayDecision {
        self.projector.liveness_preview()
    }
}
