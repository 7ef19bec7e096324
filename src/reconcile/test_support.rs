//! Fakes shared by the reconciliation tests: an in-memory registry with
//! configurable pages and failure injection, and a counting image store.

use crate::registry::{
    CoreDeviceSummary, DeploymentSummary, Page, RegistryError, RegistryProvider, ThingSummary, ThingTypeDescription, ThingTypeSummary,
};
use crate::store::{ImageStore, StoreError};
use crate::twin::TwinDocument;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeRegistry {
    pub thing_types: Vec<ThingTypeDescription>,
    pub things: Vec<ThingSummary>,
    pub twins: HashMap<String, TwinDocument>,
    pub core_devices: Vec<CoreDeviceSummary>,
    pub deployments: Vec<DeploymentSummary>,
    pub failing_twins: HashSet<String>,
    pub failing_thing_types: HashSet<String>,
    pub page_size: usize,
}

impl FakeRegistry {
    pub fn new() -> Self {
        FakeRegistry {
            page_size: 2,
            ..FakeRegistry::default()
        }
    }

    fn page_of<T: Clone>(&self, items: &[T], cursor: Option<String>) -> Page<T> {
        let offset = cursor.and_then(|token| token.parse().ok()).unwrap_or(0);
        let end = (offset + self.page_size).min(items.len());
        Page {
            items: items[offset..end].to_vec(),
            next_token: (end < items.len()).then(|| end.to_string()),
        }
    }

    fn provider_error(id: &str) -> RegistryError {
        RegistryError::Provider {
            id: id.to_string(),
            description: "injected failure".to_string(),
        }
    }
}

#[async_trait]
impl RegistryProvider for FakeRegistry {
    async fn list_thing_types(&self, cursor: Option<String>) -> Result<Page<ThingTypeSummary>, RegistryError> {
        let summaries: Vec<ThingTypeSummary> = self
            .thing_types
            .iter()
            .map(|description| ThingTypeSummary {
                name: description.name.clone(),
            })
            .collect();
        Ok(self.page_of(&summaries, cursor))
    }

    async fn describe_thing_type(&self, name: &str) -> Result<ThingTypeDescription, RegistryError> {
        if self.failing_thing_types.contains(name) {
            return Err(FakeRegistry::provider_error(name));
        }
        self.thing_types
            .iter()
            .find(|description| description.name == name)
            .cloned()
            .ok_or_else(|| FakeRegistry::provider_error(name))
    }

    async fn list_things(&self, cursor: Option<String>) -> Result<Page<ThingSummary>, RegistryError> {
        Ok(self.page_of(&self.things, cursor))
    }

    async fn describe_twin(&self, device_id: &str) -> Result<TwinDocument, RegistryError> {
        if self.failing_twins.contains(device_id) {
            return Err(FakeRegistry::provider_error(device_id));
        }
        self.twins
            .get(device_id)
            .cloned()
            .ok_or_else(|| FakeRegistry::provider_error(device_id))
    }

    async fn list_core_devices(&self, cursor: Option<String>) -> Result<Page<CoreDeviceSummary>, RegistryError> {
        Ok(self.page_of(&self.core_devices, cursor))
    }

    async fn list_deployments(&self, cursor: Option<String>) -> Result<Page<DeploymentSummary>, RegistryError> {
        Ok(self.page_of(&self.deployments, cursor))
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingImageStore {
    pub assigned: Mutex<Vec<String>>,
    pub released: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStore for CountingImageStore {
    async fn assign_default(&self, model_id: &str) -> Result<(), StoreError> {
        self.assigned.lock().unwrap().push(model_id.to_string());
        Ok(())
    }

    async fn release(&self, model_id: &str) -> Result<(), StoreError> {
        self.released.lock().unwrap().push(model_id.to_string());
        Ok(())
    }
}
