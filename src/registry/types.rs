use serde::Deserialize;
use std::collections::HashMap;

/// One page of a registry listing. An absent `nextToken` marks the last page.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "nextToken")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThingTypeSummary {
    #[serde(rename = "thingTypeName")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThingTypeDescription {
    #[serde(rename = "thingTypeName")]
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThingSummary {
    #[serde(rename = "thingName")]
    pub name: String,
    #[serde(rename = "thingTypeName", default)]
    pub thing_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoreDeviceSummary {
    #[serde(rename = "coreDeviceName")]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentSummary {
    #[serde(rename = "deploymentId")]
    pub id: String,
    #[serde(rename = "targetGroup")]
    pub target_group: String,
    #[serde(default)]
    pub revision: u64,
    #[serde(rename = "deploymentName", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}
