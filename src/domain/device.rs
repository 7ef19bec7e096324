use crate::domain::TagValue;
use crate::twin::ConnectionState;
use chrono::{DateTime, Utc};

/// A leaf device as known locally, reconciled from the registry's thing
/// inventory and its twin document.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: String,
    pub model_id: String,
    /// Twin document version at the last applied sync. Never regresses.
    pub version: u64,
    pub connection_state: ConnectionState,
    pub telemetry_enabled: Option<bool>,
    pub reporting_interval_seconds: Option<i64>,
    pub tags: Vec<TagValue>,
    pub labels: Vec<String>,
    pub last_seen: DateTime<Utc>,
}
