use crate::domain::{Device, DeviceModel};
use crate::job::{Shutdown, SyncJob};
use crate::reconcile::summary::CycleSummary;
use crate::reconcile::twin_map::{labels, tag_values};
use crate::reconcile::upsert::{prune, upsert};
use crate::reconcile::ReconcileError;
use crate::registry::page_walker::{describe_each, walk_pages};
use crate::registry::RegistryProvider;
use crate::store::Repository;
use crate::twin::{DesiredField, TwinDocument, convention};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Reconciles the registry's things into the local device inventory, reading
/// each thing's twin document for version, state and tags. Things whose type
/// is not a known device model are skipped for the cycle.
pub struct DeviceSync {
    provider: Arc<dyn RegistryProvider>,
    devices: Arc<dyn Repository<Device>>,
    models: Arc<dyn Repository<DeviceModel>>,
    shutdown: Shutdown,
    describe_concurrency: usize,
}

struct Candidate {
    name: String,
    model_id: String,
}

impl DeviceSync {
    pub fn new(
        provider: Arc<dyn RegistryProvider>,
        devices: Arc<dyn Repository<Device>>,
        models: Arc<dyn Repository<DeviceModel>>,
        shutdown: Shutdown,
        describe_concurrency: usize,
    ) -> Self {
        DeviceSync {
            provider,
            devices,
            models,
            shutdown,
            describe_concurrency,
        }
    }

    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<CycleSummary, ReconcileError> {
        let provider = self.provider.as_ref();

        let things = walk_pages(|cursor| provider.list_things(cursor)).await?;
        let remote_ids: HashSet<String> = things.iter().map(|thing| thing.name.clone()).collect();

        let mut summary = CycleSummary {
            fetched: things.len(),
            ..CycleSummary::default()
        };

        let mut candidates = Vec::with_capacity(things.len());
        for thing in things {
            let Some(model_id) = thing.thing_type else {
                warn!(item_id = thing.name, "⏭️ Skipping '{}', no thing type is assigned", thing.name);
                summary.skipped += 1;
                continue;
            };

            match self.models.get_by_name(&model_id).await {
                Ok(Some(_)) => candidates.push(Candidate { name: thing.name, model_id }),
                Ok(None) => {
                    warn!(
                        item_id = thing.name,
                        "⏭️ Skipping '{}', thing type '{}' is not in the local catalog", thing.name, model_id
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!(item_id = thing.name, "⏭️ Skipping '{}', catalog lookup failed: {}", thing.name, e);
                    summary.skipped += 1;
                }
            }
        }

        let candidate_count = candidates.len();
        let described = describe_each(
            candidates,
            |candidate| candidate.name.clone(),
            |candidate| async move {
                let twin = provider.describe_twin(&candidate.name).await?;
                Ok((candidate.model_id, twin))
            },
            self.describe_concurrency,
        )
        .await;
        summary.skipped += candidate_count - described.len();

        for (model_id, twin) in described {
            if self.shutdown.is_requested() {
                return Err(ReconcileError::Cancelled);
            }

            let device = map_device(model_id, twin);
            let device_id = device.id.clone();

            match upsert(self.devices.as_ref(), device).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    warn!(item_id = device_id, "⏭️ Skipping '{}', the store rejected it: {}", device_id, e);
                    summary.skipped += 1;
                }
            }
        }

        if self.shutdown.is_requested() {
            return Err(ReconcileError::Cancelled);
        }

        summary.pruned = prune(self.devices.as_ref(), &remote_ids, |_| async {}).await?;
        self.devices.save().await?;

        info!("Thing sync finished: {}", summary);
        Ok(summary)
    }
}

fn map_device(model_id: String, twin: TwinDocument) -> Device {
    Device {
        id: twin.device_id.clone(),
        model_id,
        version: twin.version,
        connection_state: twin.connection_state,
        telemetry_enabled: convention::desired_bool(&twin, DesiredField::TelemetryEnabled.key()),
        reporting_interval_seconds: convention::desired_i64(&twin, DesiredField::ReportingIntervalSeconds.key()),
        tags: tag_values(&twin),
        labels: labels(&twin),
        last_seen: Utc::now(),
    }
}

#[async_trait]
impl SyncJob for DeviceSync {
    fn name(&self) -> &'static str {
        "devices"
    }

    async fn execute(&self) -> Result<CycleSummary, ReconcileError> {
        self.reconcile().await
    }
}
