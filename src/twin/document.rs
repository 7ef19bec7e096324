use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Connectivity of a device as reported by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Disconnected,
    #[default]
    #[serde(other)]
    Unknown,
}

/// The registry's per-device state container: owner-set tags, owner-to-device
/// desired properties and device-to-owner reported properties, plus a version
/// that increases on every registry-side mutation.
///
/// A document is read once per sync item and never mutated; local edits are
/// staged into a [`TwinPatch`] instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinDocument {
    pub device_id: String,
    #[serde(default)]
    pub connection_state: ConnectionState,
    pub version: u64,
    #[serde(default)]
    pub tags: Map<String, Value>,
    #[serde(default)]
    pub properties: TwinProperties,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TwinProperties {
    #[serde(default)]
    pub desired: Map<String, Value>,
    #[serde(default)]
    pub reported: Map<String, Value>,
}

/// Staged writes against a twin document. Tags and desired properties are
/// collected into fresh maps, leaving the source document untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TwinPatch {
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) tags: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub(crate) desired: Map<String, Value>,
}

impl TwinPatch {
    pub fn new() -> Self {
        TwinPatch::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.desired.is_empty()
    }

    /// Returns a new document with the staged values merged in. `document` is
    /// not modified.
    pub fn apply_to(&self, document: &TwinDocument) -> TwinDocument {
        let mut updated = document.clone();
        updated.tags.extend(self.tags.clone());
        updated.properties.desired.extend(self.desired.clone());
        updated
    }
}
