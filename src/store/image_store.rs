use crate::store::StoreError;
use async_trait::async_trait;
use tracing::debug;

/// Default-image bookkeeping for device models. Assignment happens on first
/// sighting of a model; release happens exactly once before a model is
/// tombstoned.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn assign_default(&self, model_id: &str) -> Result<(), StoreError>;
    async fn release(&self, model_id: &str) -> Result<(), StoreError>;
}

/// Image store used when no asset backend is configured.
#[derive(Debug, Default)]
pub struct NullImageStore;

#[async_trait]
impl ImageStore for NullImageStore {
    async fn assign_default(&self, model_id: &str) -> Result<(), StoreError> {
        debug!(model_id = model_id, "No asset backend, default image for '{}' not stored", model_id);
        Ok(())
    }

    async fn release(&self, model_id: &str) -> Result<(), StoreError> {
        debug!(model_id = model_id, "No asset backend, nothing to release for '{}'", model_id);
        Ok(())
    }
}
