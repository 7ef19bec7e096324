use crate::domain::EdgeDevice;
use crate::job::{Shutdown, SyncJob};
use crate::reconcile::summary::CycleSummary;
use crate::reconcile::twin_map::{labels, tag_values};
use crate::reconcile::upsert::{prune, upsert};
use crate::reconcile::ReconcileError;
use crate::registry::page_walker::{describe_each, walk_pages};
use crate::registry::{CoreDeviceSummary, RegistryProvider};
use crate::store::Repository;
use crate::twin::{ConnectionState, DesiredField, TagField, TwinDocument, convention};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Reconciles the registry's Greengrass core devices into the local edge
/// device inventory. Core devices are gateway-class by definition; their twin
/// supplies the version, tags and reported client/module state.
pub struct EdgeDeviceSync {
    provider: Arc<dyn RegistryProvider>,
    edge_devices: Arc<dyn Repository<EdgeDevice>>,
    shutdown: Shutdown,
    describe_concurrency: usize,
}

impl EdgeDeviceSync {
    pub fn new(
        provider: Arc<dyn RegistryProvider>,
        edge_devices: Arc<dyn Repository<EdgeDevice>>,
        shutdown: Shutdown,
        describe_concurrency: usize,
    ) -> Self {
        EdgeDeviceSync {
            provider,
            edge_devices,
            shutdown,
            describe_concurrency,
        }
    }

    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<CycleSummary, ReconcileError> {
        let provider = self.provider.as_ref();

        let core_devices = walk_pages(|cursor| provider.list_core_devices(cursor)).await?;
        let remote_ids: HashSet<String> = core_devices.iter().map(|core| core.name.clone()).collect();

        let mut summary = CycleSummary {
            fetched: core_devices.len(),
            ..CycleSummary::default()
        };

        let described = describe_each(
            core_devices,
            |core| core.name.clone(),
            |core| async move {
                let twin = provider.describe_twin(&core.name).await?;
                Ok((core, twin))
            },
            self.describe_concurrency,
        )
        .await;
        summary.skipped += summary.fetched - described.len();

        for (core, twin) in described {
            if self.shutdown.is_requested() {
                return Err(ReconcileError::Cancelled);
            }

            let edge_device = map_edge_device(&core, twin);
            let device_id = edge_device.id.clone();

            match upsert(self.edge_devices.as_ref(), edge_device).await {
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

        summary.pruned = prune(self.edge_devices.as_ref(), &remote_ids, |_| async {}).await?;
        self.edge_devices.save().await?;

        info!("Core device sync finished: {}", summary);
        Ok(summary)
    }
}

fn map_edge_device(core: &CoreDeviceSummary, twin: TwinDocument) -> EdgeDevice {
    // The twin is authoritative for connectivity; the core device health
    // status only fills in when the twin does not know.
    let connection_state = match twin.connection_state {
        ConnectionState::Unknown => match core.status.as_deref() {
            Some("HEALTHY") => ConnectionState::Connected,
            Some("UNREACHABLE") => ConnectionState::Disconnected,
            _ => ConnectionState::Unknown,
        },
        state => state,
    };

    EdgeDevice {
        id: twin.device_id.clone(),
        model_id: convention::tag(&twin, TagField::ModelId.key()),
        version: twin.version,
        connection_state,
        power_profile: convention::desired_enum(&twin, DesiredField::PowerProfile.key()),
        connected_client_count: convention::connected_client_count(&twin),
        module_count: convention::module_count(&twin, &core.name),
        tags: tag_values(&twin),
        labels: labels(&twin),
        last_seen: Utc::now(),
    }
}

#[async_trait]
impl SyncJob for EdgeDeviceSync {
    fn name(&self) -> &'static str {
        "edge devices"
    }

    async fn execute(&self) -> Result<CycleSummary, ReconcileError> {
        self.reconcile().await
    }
}
