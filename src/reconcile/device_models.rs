use crate::domain::DeviceModel;
use crate::job::{Shutdown, SyncJob};
use crate::reconcile::summary::CycleSummary;
use crate::reconcile::twin_map::{attribute_labels, attribute_tag_values};
use crate::reconcile::upsert::{UpsertOutcome, prune, upsert};
use crate::reconcile::ReconcileError;
use crate::registry::classifier::{Classification, classify};
use crate::registry::page_walker::{describe_each, walk_pages};
use crate::registry::{RegistryProvider, ThingTypeDescription};
use crate::store::{ImageStore, Repository};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Reconciles the registry's thing types into the local device model catalog.
/// Edge-classified types are owned by the deployment sync and skipped here.
pub struct DeviceModelSync {
    provider: Arc<dyn RegistryProvider>,
    models: Arc<dyn Repository<DeviceModel>>,
    images: Arc<dyn ImageStore>,
    shutdown: Shutdown,
    describe_concurrency: usize,
}

impl DeviceModelSync {
    pub fn new(
        provider: Arc<dyn RegistryProvider>,
        models: Arc<dyn Repository<DeviceModel>>,
        images: Arc<dyn ImageStore>,
        shutdown: Shutdown,
        describe_concurrency: usize,
    ) -> Self {
        DeviceModelSync {
            provider,
            models,
            images,
            shutdown,
            describe_concurrency,
        }
    }

    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<CycleSummary, ReconcileError> {
        let provider = self.provider.as_ref();

        let listed = walk_pages(|cursor| provider.list_thing_types(cursor)).await?;
        let remote_ids: HashSet<String> = listed.iter().map(|summary| summary.name.clone()).collect();

        let mut summary = CycleSummary {
            fetched: listed.len(),
            ..CycleSummary::default()
        };

        let descriptions = describe_each(
            listed,
            |reference| reference.name.clone(),
            |reference| async move { provider.describe_thing_type(&reference.name).await },
            self.describe_concurrency,
        )
        .await;
        summary.skipped += summary.fetched - descriptions.len();

        for description in descriptions {
            if self.shutdown.is_requested() {
                return Err(ReconcileError::Cancelled);
            }

            let Some(model) = map_model(description, &mut summary) else {
                continue;
            };
            let model_id = model.id.clone();

            match upsert(self.models.as_ref(), model).await {
                Ok(outcome) => {
                    if outcome == UpsertOutcome::Inserted {
                        if let Err(e) = self.images.assign_default(&model_id).await {
                            warn!(item_id = model_id, "⚠️ Could not assign a default image to '{}': {}", model_id, e);
                        }
                    }
                    summary.record(outcome);
                }
                Err(e) => {
                    warn!(item_id = model_id, "⚠️ Skipping '{}', the store rejected it: {}", model_id, e);
                    summary.skipped += 1;
                }
            }
        }

        if self.shutdown.is_requested() {
            return Err(ReconcileError::Cancelled);
        }

        let images = &self.images;
        summary.pruned = prune(self.models.as_ref(), &remote_ids, |model_id| async move {
            if let Err(e) = images.release(&model_id).await {
                warn!(item_id = model_id, "⚠️ Could not release the default image of '{}': {}", model_id, e);
            }
        })
        .await?;

        self.models.save().await?;

        info!("Thing type sync finished: {}", summary);
        Ok(summary)
    }
}

fn map_model(description: ThingTypeDescription, summary: &mut CycleSummary) -> Option<DeviceModel> {
    if description.deprecated {
        info!(item_id = description.name, "⏭️ Skipping '{}', the thing type is deprecated", description.name);
        summary.skipped += 1;
        return None;
    }

    match classify(&description.attributes) {
        Classification::Leaf => {}
        Classification::Edge => {
            debug!(item_id = description.name, "⏭️ Skipping '{}', edge models are synced from deployments", description.name);
            summary.skipped += 1;
            return None;
        }
        Classification::Unknown => {
            warn!(
                item_id = description.name,
                "⏭️ Skipping '{}', the device class signal is absent or ambiguous", description.name
            );
            summary.skipped += 1;
            return None;
        }
    }

    Some(DeviceModel {
        id: description.name,
        description: description.description,
        version: description.revision,
        tags: attribute_tag_values(&description.attributes),
        labels: attribute_labels(&description.attributes),
        last_seen: Utc::now(),
    })
}

#[async_trait]
impl SyncJob for DeviceModelSync {
    fn name(&self) -> &'static str {
        "device models"
    }

    async fn execute(&self) -> Result<CycleSummary, ReconcileError> {
        self.reconcile().await
    }
}
