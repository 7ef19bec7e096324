use crate::domain::{Device, DeviceModel, EdgeDevice, EdgeDeviceModel};
use crate::store::{Entity, Repository, StoreError};
use std::collections::HashSet;
use std::future::Future;
use tracing::{info, warn};

/// A locally persisted record kept in sync with the registry.
pub trait SyncedEntity: Entity {
    /// Registry version at the last applied sync.
    fn version(&self) -> u64;

    /// Replaces the synced fields with the incoming ones. The owned tag
    /// children are replaced wholesale, never merged.
    fn absorb(&mut self, incoming: Self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

/// Version-gated upsert: unseen identifiers are inserted, a higher incoming
/// version is applied onto the existing record and everything else is a
/// no-op, so a local version never regresses under concurrent registry
/// mutation.
pub async fn upsert<E: SyncedEntity>(repository: &dyn Repository<E>, incoming: E) -> Result<UpsertOutcome, StoreError> {
    match repository.get_by_id(incoming.id()).await? {
        None => {
            repository.insert(incoming).await?;
            Ok(UpsertOutcome::Inserted)
        }
        Some(existing) if incoming.version() <= existing.version() => Ok(UpsertOutcome::Unchanged),
        Some(mut existing) => {
            existing.absorb(incoming);
            repository.update(existing).await?;
            Ok(UpsertOutcome::Updated)
        }
    }
}

/// Deletes every local record whose identifier is absent from the fresh
/// remote inventory. `before_delete` runs once per tombstone to clean up
/// associated artifacts; a failed delete is logged and the pass continues.
pub async fn prune<E, F, Fut>(repository: &dyn Repository<E>, remote_ids: &HashSet<String>, mut before_delete: F) -> Result<usize, StoreError>
where
    E: SyncedEntity,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pruned = 0;

    for local in repository.get_all().await? {
        if remote_ids.contains(local.id()) {
            continue;
        }

        before_delete(local.id().to_string()).await;
        match repository.delete(local.id()).await {
            Ok(()) => {
                info!(item_id = local.id(), "🗑️ Removed '{}', no longer present in the registry", local.id());
                pruned += 1;
            }
            Err(e) => warn!(item_id = local.id(), "⚠️ Could not remove '{}': {}", local.id(), e),
        }
    }

    Ok(pruned)
}

impl SyncedEntity for Device {
    fn version(&self) -> u64 {
        self.version
    }

    fn absorb(&mut self, incoming: Self) {
        self.model_id = incoming.model_id;
        self.version = incoming.version;
        self.connection_state = incoming.connection_state;
        self.telemetry_enabled = incoming.telemetry_enabled;
        self.reporting_interval_seconds = incoming.reporting_interval_seconds;
        self.tags = incoming.tags;
        self.labels = incoming.labels;
        self.last_seen = incoming.last_seen;
    }
}

impl SyncedEntity for DeviceModel {
    fn version(&self) -> u64 {
        self.version
    }

    fn absorb(&mut self, incoming: Self) {
        self.description = incoming.description;
        self.version = incoming.version;
        self.tags = incoming.tags;
        self.labels = incoming.labels;
        self.last_seen = incoming.last_seen;
    }
}

impl SyncedEntity for EdgeDevice {
    fn version(&self) -> u64 {
        self.version
    }

    fn absorb(&mut self, incoming: Self) {
        self.model_id = incoming.model_id;
        self.version = incoming.version;
        self.connection_state = incoming.connection_state;
        self.power_profile = incoming.power_profile;
        self.connected_client_count = incoming.connected_client_count;
        self.module_count = incoming.module_count;
        self.tags = incoming.tags;
        self.labels = incoming.labels;
        self.last_seen = incoming.last_seen;
    }
}

impl SyncedEntity for EdgeDeviceModel {
    fn version(&self) -> u64 {
        self.version
    }

    fn absorb(&mut self, incoming: Self) {
        self.deployment_id = incoming.deployment_id;
        self.version = incoming.version;
        self.tags = incoming.tags;
        self.labels = incoming.labels;
        self.last_seen = incoming.last_seen;
    }
}
