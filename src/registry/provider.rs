use crate::registry::types::{CoreDeviceSummary, DeploymentSummary, Page, ThingSummary, ThingTypeDescription, ThingTypeSummary};
use crate::twin::TwinDocument;
use async_trait::async_trait;
use thiserror::Error;

/// The consumed registry surface: paginated listings plus per-item detail
/// lookups. Listing calls take the previous page's cursor, `None` for the
/// first page.
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    async fn list_thing_types(&self, cursor: Option<String>) -> Result<Page<ThingTypeSummary>, RegistryError>;
    async fn describe_thing_type(&self, name: &str) -> Result<ThingTypeDescription, RegistryError>;
    async fn list_things(&self, cursor: Option<String>) -> Result<Page<ThingSummary>, RegistryError>;
    async fn describe_twin(&self, device_id: &str) -> Result<TwinDocument, RegistryError>;
    async fn list_core_devices(&self, cursor: Option<String>) -> Result<Page<CoreDeviceSummary>, RegistryError>;
    async fn list_deployments(&self, cursor: Option<String>) -> Result<Page<DeploymentSummary>, RegistryError>;
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("registry rejected '{id}': {description}")]
    Provider { id: String, description: String },
}
