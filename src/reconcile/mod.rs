mod device_models;
mod devices;
mod edge_device_models;
mod edge_devices;
mod summary;
#[cfg(test)]
mod test_support;
mod twin_map;
mod upsert;

pub use device_models::DeviceModelSync;
pub use devices::DeviceSync;
pub use edge_device_models::EdgeDeviceModelSync;
pub use edge_devices::EdgeDeviceSync;
pub use summary::CycleSummary;
pub use upsert::{SyncedEntity, UpsertOutcome, prune, upsert};

use crate::registry::RegistryError;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("cycle cancelled by shutdown")]
    Cancelled,
    #[error("cycle exceeded the configured time limit")]
    TimedOut,
}
