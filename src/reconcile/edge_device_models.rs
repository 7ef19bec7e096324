use crate::domain::EdgeDeviceModel;
use crate::job::{Shutdown, SyncJob};
use crate::reconcile::summary::CycleSummary;
use crate::reconcile::twin_map::{attribute_labels, attribute_tag_values};
use crate::reconcile::upsert::{prune, upsert};
use crate::reconcile::ReconcileError;
use crate::registry::page_walker::walk_pages;
use crate::registry::{DeploymentSummary, RegistryProvider};
use crate::store::Repository;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Reconciles the registry's Greengrass deployments into the local edge model
/// catalog. Deployments are keyed by their target group, so every revision of
/// a group's deployment lands on the same local record; the revision gates the
/// upsert. The listing is already detailed, no per-item lookup is needed.
pub struct EdgeDeviceModelSync {
    provider: Arc<dyn RegistryProvider>,
    models: Arc<dyn Repository<EdgeDeviceModel>>,
    shutdown: Shutdown,
}

impl EdgeDeviceModelSync {
    pub fn new(provider: Arc<dyn RegistryProvider>, models: Arc<dyn Repository<EdgeDeviceModel>>, shutdown: Shutdown) -> Self {
        EdgeDeviceModelSync { provider, models, shutdown }
    }

    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<CycleSummary, ReconcileError> {
        let provider = self.provider.as_ref();

        let deployments = walk_pages(|cursor| provider.list_deployments(cursor)).await?;

        let mut summary = CycleSummary {
            fetched: deployments.len(),
            ..CycleSummary::default()
        };
        let mut remote_ids = HashSet::new();

        for deployment in deployments {
            if self.shutdown.is_requested() {
                return Err(ReconcileError::Cancelled);
            }

            if deployment.target_group.is_empty() {
                warn!(item_id = deployment.id, "⏭️ Skipping deployment '{}', it has no target group", deployment.id);
                summary.skipped += 1;
                continue;
            }
            remote_ids.insert(deployment.target_group.clone());

            let model = map_model(deployment);
            let model_id = model.id.clone();

            match upsert(self.models.as_ref(), model).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    warn!(item_id = model_id, "⏭️ Skipping '{}', the store rejected it: {}", model_id, e);
                    summary.skipped += 1;
                }
            }
        }

        if self.shutdown.is_requested() {
            return Err(ReconcileError::Cancelled);
        }

        summary.pruned = prune(self.models.as_ref(), &remote_ids, |_| async {}).await?;
        self.models.save().await?;

        info!("Deployment sync finished: {}", summary);
        Ok(summary)
    }
}

fn map_model(deployment: DeploymentSummary) -> EdgeDeviceModel {
    EdgeDeviceModel {
        id: deployment.target_group,
        deployment_id: deployment.id,
        version: deployment.revision,
        tags: attribute_tag_values(&deployment.tags),
        labels: attribute_labels(&deployment.tags),
        last_seen: Utc::now(),
    }
}

#[async_trait]
impl SyncJob for EdgeDeviceModelSync {
    fn name(&self) -> &'static str {
        "edge device models"
    }

    async fn execute(&self) -> Result<CycleSummary, ReconcileError> {
        self.reconcile().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::test_support::FakeRegistry;
    use crate::store::MemoryRepository;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn deployment(id: &str, target_group: &str, revision: u64) -> DeploymentSummary {
        DeploymentSummary {
            id: id.to_string(),
            target_group: target_group.to_string(),
            revision,
            name: None,
            tags: HashMap::new(),
        }
    }

    fn sync_with(registry: FakeRegistry) -> (EdgeDeviceModelSync, Arc<MemoryRepository<EdgeDeviceModel>>) {
        let models = Arc::new(MemoryRepository::new());
        let sync = EdgeDeviceModelSync::new(Arc::new(registry), models.clone(), Shutdown::inactive());
        (sync, models)
    }

    #[tokio::test]
    async fn deployments_map_onto_models_keyed_by_target_group() -> Result<(), ReconcileError> {
        let mut registry = FakeRegistry::new();
        registry.deployments = vec![deployment("d-1", "cameras", 1), deployment("d-2", "locks", 1)];
        let (sync, models) = sync_with(registry);

        let summary = sync.reconcile().await?;

        assert_eq!(summary.inserted, 2);
        let model = models.get_by_id("cameras").await.unwrap().unwrap();
        assert_eq!(model.deployment_id, "d-1");
        assert_eq!(model.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn a_newer_revision_for_the_same_group_updates_the_record() -> Result<(), ReconcileError> {
        let mut registry = FakeRegistry::new();
        registry.deployments = vec![deployment("d-1", "cameras", 1), deployment("d-3", "cameras", 2)];
        let (sync, models) = sync_with(registry);

        let summary = sync.reconcile().await?;

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.updated, 1);
        let model = models.get_by_id("cameras").await.unwrap().unwrap();
        assert_eq!(model.deployment_id, "d-3");
        assert_eq!(model.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn an_older_revision_for_the_same_group_is_a_no_op() -> Result<(), ReconcileError> {
        let mut registry = FakeRegistry::new();
        registry.deployments = vec![deployment("d-3", "cameras", 2), deployment("d-1", "cameras", 1)];
        let (sync, models) = sync_with(registry);

        let summary = sync.reconcile().await?;

        assert_eq!(summary.unchanged, 1);
        assert_eq!(models.get_by_id("cameras").await.unwrap().unwrap().deployment_id, "d-3");

        Ok(())
    }

    #[tokio::test]
    async fn a_group_without_deployments_is_tombstoned() -> Result<(), ReconcileError> {
        let mut registry = FakeRegistry::new();
        registry.deployments = vec![deployment("d-1", "cameras", 1), deployment("d-2", "locks", 1)];
        let (sync, models) = sync_with(registry);
        sync.reconcile().await?;

        let mut registry = FakeRegistry::new();
        registry.deployments = vec![deployment("d-1", "cameras", 1)];
        let sync = EdgeDeviceModelSync::new(Arc::new(registry), models.clone(), Shutdown::inactive());

        let summary = sync.reconcile().await?;

        assert_eq!(summary.pruned, 1);
        assert!(models.get_by_id("locks").await.unwrap().is_none());

        Ok(())
    }
}
