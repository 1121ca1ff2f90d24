//! Host-facing provider interface.

use async_trait::async_trait;
use glance_core::{ComplicationType, DisplayDecision, Evaluation, InstanceId, ProviderId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A request from the host for fresh complication content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplicationRequest {
    /// Capability the slot renders
    pub complication_type: ComplicationType,

    /// Slot being filled
    pub instance_id: InstanceId,
}

impl ComplicationRequest {
    /// Create a request.
    pub fn new(complication_type: ComplicationType, instance_id: impl Into<InstanceId>) -> Self {
        Self {
            complication_type,
            instance_id: instance_id.into(),
        }
    }
}

/// A complication data source polled by the host.
///
/// Implementors supply one capability, a live decision and a preview; the
/// provided methods handle capability mismatches and lifecycle logging.
#[async_trait]
pub trait ComplicationProvider: Send + Sync {
    /// Identity used for refresh requests.
    fn id(&self) -> ProviderId;

    /// The one capability this provider renders.
    fn supported_type(&self) -> ComplicationType;

    /// Read state once and project it for `instance`.
    ///
    /// Never fails: read errors are replaced by fallback values.
    async fn decide(&self, instance: InstanceId) -> DisplayDecision;

    /// Editor preview, built without reading any state.
    fn preview_decision(&self) -> DisplayDecision;

    /// Called when a slot starts using this provider.
    fn on_activate(&self, instance: InstanceId, complication_type: ComplicationType) {
        debug!(provider = %self.id(), %instance, %complication_type, "complication activated");
    }

    /// Answer a live request.
    async fn evaluate(&self, request: &ComplicationRequest) -> Evaluation {
        debug!(provider = %self.id(), ?request, "complication request");
        if request.complication_type != self.supported_type() {
            return Evaluation::Unsupported;
        }
        Evaluation::data(self.decide(request.instance_id).await)
    }

    /// Answer a preview request for an inactive slot.
    fn preview(&self, complication_type: ComplicationType) -> Evaluation {
        if complication_type != self.supported_type() {
            return Evaluation::Unsupported;
        }
        Evaluation::data(self.preview_decision())
    }

    /// Called when a slot stops using this provider.
    fn on_deactivate(&self, instance: InstanceId) {
        debug!(provider = %self.id(), %instance, "complication deactivated");
    }
}
