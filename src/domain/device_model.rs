use crate::domain::TagValue;
use chrono::{DateTime, Utc};

/// A device model, reconciled from the registry's thing types. The model name
/// doubles as its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceModel {
    pub id: String,
    pub description: Option<String>,
    /// Thing type revision at the last applied sync. Never regresses.
    pub version: u64,
    pub tags: Vec<TagValue>,
    pub labels: Vec<String>,
    pub last_seen: DateTime<Utc>,
}
