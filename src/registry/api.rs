use crate::app_config::AppConfig;
use crate::registry::provider::{RegistryError, RegistryProvider};
use crate::registry::types::{CoreDeviceSummary, DeploymentSummary, Page, ThingSummary, ThingTypeDescription, ThingTypeSummary};
use crate::twin::TwinDocument;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// HTTP implementation of the registry surface. Pagination is a `nextToken`
/// query parameter; detail lookups are per-item GETs.
#[derive(Debug)]
pub struct HttpRegistry {
    client: Client,
    config: Arc<AppConfig>,
}

impl HttpRegistry {
    pub fn new(client: Client, config: Arc<AppConfig>) -> Self {
        HttpRegistry { client, config }
    }

    async fn get_page<T: DeserializeOwned>(&self, path: &str, cursor: Option<String>) -> Result<Page<T>, RegistryError> {
        let mut request = self
            .client
            .get(format!("{}{}", self.config.registry().url(), path))
            .query(&[("maxResults", self.config.registry().page_size().to_string())]);

        if let Some(token) = cursor {
            request = request.query(&[("nextToken", token)]);
        }

        Ok(request.send().await?.error_for_status()?.json::<Page<T>>().await?)
    }

    async fn get_detail<T: DeserializeOwned>(&self, path: &str, id: &str) -> Result<T, RegistryError> {
        let response = self
            .client
            .get(format!("{}{}", self.config.registry().url(), path))
            .send()
            .await?;

        if response.status().is_client_error() {
            let description = response.text().await.unwrap_or_default();
            return Err(RegistryError::Provider {
                id: id.to_string(),
                description,
            });
        }

        Ok(response.error_for_status()?.json::<T>().await?)
    }
}

#[async_trait]
impl RegistryProvider for HttpRegistry {
    async fn list_thing_types(&self, cursor: Option<String>) -> Result<Page<ThingTypeSummary>, RegistryError> {
        self.get_page("/thing-types", cursor).await
    }

    async fn describe_thing_type(&self, name: &str) -> Result<ThingTypeDescription, RegistryError> {
        self.get_detail(&format!("/thing-types/{}", name), name).await
    }

    async fn list_things(&self, cursor: Option<String>) -> Result<Page<ThingSummary>, RegistryError> {
        self.get_page("/things", cursor).await
    }

    async fn describe_twin(&self, device_id: &str) -> Result<TwinDocument, RegistryError> {
        self.get_detail(&format!("/twins/{}", device_id), device_id).await
    }

    async fn list_core_devices(&self, cursor: Option<String>) -> Result<Page<CoreDeviceSummary>, RegistryError> {
        self.get_page("/greengrass/core-devices", cursor).await
    }

    async fn list_deployments(&self, cursor: Option<String>) -> Result<Page<DeploymentSummary>, RegistryError> {
        self.get_page("/greengrass/deployments", cursor).await
    }
}
