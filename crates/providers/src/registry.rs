//! Provider registry: dispatches host callbacks by provider identity.

use std::collections::BTreeMap;
use std::sync::Arc;

use glance_core::{Clock, ComplicationType, Evaluation, InstanceId, ProjectionConfig, ProviderId, StatusProjector};
use glance_storage::{DailyStore, PreferenceStore};

use crate::{
    ComplicationProvider, ComplicationRequest, DailyProgressProvider, ExerciseShortcutProvider,
    ServiceAliveProvider, WearTimeProvider,
};

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No provider with this identity is registered
    #[error("provider not registered: {0}")]
    UnknownProvider(ProviderId),
}

/// Registry of complication providers.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<ProviderId, Arc<dyn ComplicationProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all four providers over the given collaborators.
    pub fn with_defaults(
        prefs: Arc<dyn PreferenceStore>,
        daily: Arc<dyn DailyStore>,
        clock: Arc<dyn Clock>,
        config: ProjectionConfig,
    ) -> Self {
        let projector = StatusProjector::new(config);
        let mut registry = Self::new();
        registry.register(Arc::new(ExerciseShortcutProvider::new(prefs.clone(), projector.clone())));
        registry.register(Arc::new(DailyProgressProvider::new(
            prefs.clone(),
            daily.clone(),
            projector.clone(),
        )));
        registry.register(Arc::new(WearTimeProvider::new(daily, projector.clone())));
        registry.register(Arc::new(ServiceAliveProvider::new(prefs, clock, projector)));
        registry
    }

    /// Register a provider, replacing any with the same identity.
    pub fn register(&mut self, provider: Arc<dyn ComplicationProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Look up a provider.
    pub fn get(&self, id: ProviderId) -> Result<&Arc<dyn ComplicationProvider>, RegistryError> {
        self.providers.get(&id).ok_or(RegistryError::UnknownProvider(id))
    }

    /// Registered identities, in order.
    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers.keys().copied().collect()
    }

    /// Forward an activation.
    pub fn activate(
        &self,
        id: ProviderId,
        instance: InstanceId,
        complication_type: ComplicationType,
    ) -> Result<(), RegistryError> {
        self.get(id)?.on_activate(instance, complication_type);
        Ok(())
    }

    /// Evaluate a live request.
    pub async fn evaluate(
        &self,
        id: ProviderId,
        request: &ComplicationRequest,
    ) -> Result<Evaluation, RegistryError> {
        Ok(self.get(id)?.evaluate(request).await)
    }

    /// Evaluate a preview request.
    pub fn preview(&self, id: ProviderId, complication_type: ComplicationType) -> Result<Evaluation, RegistryError> {
        Ok(self.get(id)?.preview(complication_type))
    }

    /// Forward a deactivation.
    pub fn deactivate(&self, id: ProviderId, instance: InstanceId) -> Result<(), RegistryError> {
        self.get(id)?.on_deactivate(instance);
        Ok(())
    }
}
