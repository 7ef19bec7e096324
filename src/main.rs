use crate::app_config::AppConfig;
use crate::domain::{Device, DeviceModel, EdgeDevice, EdgeDeviceModel};
use crate::job::scheduler::spawn_on_schedule;
use crate::job::{JobRunner, SyncJob, shutdown_channel};
use crate::reconcile::{DeviceModelSync, DeviceSync, EdgeDeviceModelSync, EdgeDeviceSync};
use crate::registry::RegistryProvider;
use crate::registry::api::HttpRegistry;
use crate::store::{ImageStore, MemoryRepository, NullImageStore, Repository};
use std::sync::Arc;
use tracing::info;

mod app_config;
mod domain;
mod job;
mod reconcile;
mod registry;
mod store;
mod twin;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Arc::new(AppConfig::load());
    info!("✅  Loaded configuration");

    let client = registry::client::new_client(&config)?;
    let provider: Arc<dyn RegistryProvider> = Arc::new(HttpRegistry::new(client, config.clone()));

    let device_models: Arc<dyn Repository<DeviceModel>> = Arc::new(MemoryRepository::new());
    let devices: Arc<dyn Repository<Device>> = Arc::new(MemoryRepository::new());
    let edge_devices: Arc<dyn Repository<EdgeDevice>> = Arc::new(MemoryRepository::new());
    let edge_device_models: Arc<dyn Repository<EdgeDeviceModel>> = Arc::new(MemoryRepository::new());
    let images: Arc<dyn ImageStore> = Arc::new(NullImageStore);
    info!("✅  Initialized local store");

    let (shutdown_signal, shutdown) = shutdown_channel();
    let concurrency = config.sync().describe_concurrency();
    let cycle_timeout = config.sync().cycle_timeout();

    let jobs: Vec<(Option<&str>, Arc<dyn SyncJob>)> = vec![
        (
            config.jobs().device_models(),
            Arc::new(DeviceModelSync::new(
                provider.clone(),
                device_models.clone(),
                images.clone(),
                shutdown.clone(),
                concurrency,
            )),
        ),
        (
            config.jobs().devices(),
            Arc::new(DeviceSync::new(
                provider.clone(),
                devices.clone(),
                device_models.clone(),
                shutdown.clone(),
                concurrency,
            )),
        ),
        (
            config.jobs().edge_devices(),
            Arc::new(EdgeDeviceSync::new(provider.clone(), edge_devices.clone(), shutdown.clone(), concurrency)),
        ),
        (
            config.jobs().edge_device_models(),
            Arc::new(EdgeDeviceModelSync::new(provider.clone(), edge_device_models.clone(), shutdown.clone())),
        ),
    ];

    for (cron, job) in jobs {
        match cron {
            Some(expression) => spawn_on_schedule(Arc::new(JobRunner::new(job, cycle_timeout)), expression, shutdown.clone()),
            None => info!("🕗 '{}' has no schedule configured, not syncing", job.name()),
        }
    }

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutdown requested, stopping after the current items");
    shutdown_signal.request();

    Ok(())
}
