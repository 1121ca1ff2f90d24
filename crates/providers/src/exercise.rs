//! Exercise shortcut: tappable emoji opening the exercise screen.

use std::sync::Arc;

use async_trait::async_trait;
use glance_core::{ComplicationType, DisplayDecision, InstanceId, ProviderId, StatusProjector, StatusSnapshot};
use glance_storage::PreferenceStore;

use crate::fallback::read_week_gate;
use crate::provider::ComplicationProvider;

/// Short-text provider, hidden outside the active study weeks.
pub struct ExerciseShortcutProvider {
    prefs: Arc<dyn PreferenceStore>,
    projector: StatusProjector,
}

impl ExerciseShortcutProvider {
    /// Create the provider.
    pub fn new(prefs: Arc<dyn PreferenceStore>, projector: StatusProjector) -> Self {
        Self { prefs, projector }
    }
}

#[async_trait]
impl ComplicationProvider for ExerciseShortcutProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ExerciseShortcut
    }

    fn supported_type(&self) -> ComplicationType {
        ComplicationType::ShortText
    }

    async fn decide(&self, instance: InstanceId) -> DisplayDecision {
        let gate = read_week_gate(self.prefs.as_ref(), self.projector.config(), self.id()).await;
        self.projector.project(StatusSnapshot::WeekGate(gate), instance)
    }

    fn preview_decision(&self) -> DisplayDecision {
        self.projector.exercise_preview()
    }
}
