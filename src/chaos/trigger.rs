//! Trigger controller.

use std::sync::Arc;

use crate::observability::metrics;
use crate::store::{HealthState, ManualConfig, StateStore, StoreError};

/// Who asked for the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Http,
    Scheduler,
}

impl TriggerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Http => "http",
            TriggerSource::Scheduler => "scheduler",
        }
    }
}

/// Applies failure transitions to the state store.
///
/// Both triggers are idempotent in effect, but every call still rewrites the
/// whole state file.
#[derive(Debug, Clone)]
pub struct TriggerController {
    store: Arc<StateStore>,
}

impl TriggerController {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Set `healthy=false`, keeping `manual_config`.
    pub async fn auto_trigger(&self, source: TriggerSource) -> Result<HealthState, StoreError> {
        let result = self.store.update(|state| state.healthy = false).await;
        self.observe("auto", source, &result);
        result
    }

    /// Set `manual_config=invalid`, keeping `healthy`.
    pub async fn manual_trigger(&self, source: TriggerSource) -> Result<HealthState, StoreError> {
        let result = self
            .store
            .update(|state| state.manual_config = ManualConfig::Invalid)
            .await;
        self.observe("manual", source, &result);
        result
    }

    fn observe(
        &self,
        kind: &'static str,
        source: TriggerSource,
        result: &Result<HealthState, StoreError>,
    ) {
        match result {
            Ok(state) => {
                tracing::info!(
                    kind,
                    source = source.as_str(),
                    healthy = state.healthy,
                    manual_config = %state.manual_config,
                    "Failure triggered"
                );
                metrics::record_trigger(kind, source.as_str());
            }
            Err(e) => {
                tracing::warn!(kind, source = source.as_str(), error = %e, "Trigger failed");
            }
        }
    }
}
