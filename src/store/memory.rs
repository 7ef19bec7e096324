use crate::store::repository::{Entity, Repository, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory repository used when no relational backend is wired in, and by
/// the reconciliation tests. Changes are visible immediately; `save` is a
/// no-op commit.
#[derive(Debug, Default)]
pub struct MemoryRepository<E> {
    entities: RwLock<HashMap<String, E>>,
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        MemoryRepository {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        let read_guard = self.entities.read().await;
        let mut entities: Vec<E> = read_guard.values().cloned().collect();
        entities.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(entities)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        Ok(self.entities.read().await.get(id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<E>, StoreError> {
        Ok(self.entities.read().await.values().find(|entity| entity.name() == name).cloned())
    }

    async fn insert(&self, entity: E) -> Result<(), StoreError> {
        let mut write_guard = self.entities.write().await;
        if write_guard.contains_key(entity.id()) {
            return Err(StoreError::Duplicate(entity.id().to_string()));
        }
        write_guard.insert(entity.id().to_string(), entity);
        Ok(())
    }

    async fn update(&self, entity: E) -> Result<(), StoreError> {
        let mut write_guard = self.entities.write().await;
        if !write_guard.contains_key(entity.id()) {
            return Err(StoreError::NotFound(entity.id().to_string()));
        }
        write_guard.insert(entity.id().to_string(), entity);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self.entities.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn save(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: String,
        value: u32,
    }

    impl Entity for Record {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn record(id: &str, value: u32) -> Record {
        Record { id: id.to_string(), value }
    }

    #[tokio::test]
    async fn insert_rejects_a_duplicate_identifier() -> Result<(), StoreError> {
        let repository = MemoryRepository::new();
        repository.insert(record("r-1", 1)).await?;

        let result = repository.insert(record("r-1", 2)).await;

        assert!(matches!(result, Err(StoreError::Duplicate(id)) if id == "r-1"));
        assert_eq!(repository.get_by_id("r-1").await?, Some(record("r-1", 1)));

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_an_existing_record() -> Result<(), StoreError> {
        let repository = MemoryRepository::new();
        repository.insert(record("r-1", 1)).await?;

        repository.update(record("r-1", 7)).await?;

        assert_eq!(repository.get_by_id("r-1").await?, Some(record("r-1", 7)));

        Ok(())
    }

    #[tokio::test]
    async fn update_of_a_missing_record_is_an_error() {
        let repository = MemoryRepository::<Record>::new();

        let result = repository.update(record("r-1", 1)).await;

        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "r-1"));
    }

    #[tokio::test]
    async fn get_all_returns_records_ordered_by_id() -> Result<(), StoreError> {
        let repository = MemoryRepository::new();
        repository.insert(record("r-2", 2)).await?;
        repository.insert(record("r-1", 1)).await?;

        let all = repository.get_all().await?;

        assert_eq!(all, vec![record("r-1", 1), record("r-2", 2)]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_the_record() -> Result<(), StoreError> {
        let repository = MemoryRepository::new();
        repository.insert(record("r-1", 1)).await?;

        repository.delete("r-1").await?;

        assert_eq!(repository.get_by_id("r-1").await?, None);

        Ok(())
    }
}
