use async_trait::async_trait;
use thiserror::Error;

/// A locally persisted record. The name defaults to the identifier; models are
/// addressed by name, which doubles as their id.
pub trait Entity: Clone + Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str {
        self.id()
    }
}

/// The consumed persistence surface. `save` commits pending changes; the unit
/// of work is a full reconciliation cycle or a sub-batch within it.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<E>, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<E>, StoreError>;
    async fn insert(&self, entity: E) -> Result<(), StoreError>;
    async fn update(&self, entity: E) -> Result<(), StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    async fn save(&self) -> Result<(), StoreError>;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("entity '{0}' already exists")]
    Duplicate(String),
    #[error("entity '{0}' does not exist")]
    NotFound(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}
