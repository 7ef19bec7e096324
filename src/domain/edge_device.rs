use crate::domain::{PowerProfile, TagValue};
use crate::twin::ConnectionState;
use chrono::{DateTime, Utc};

/// A gateway-class device, reconciled from the registry's core device
/// inventory and its twin document.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDevice {
    pub id: String,
    /// Model reference from the twin's tags, absent when the owner never set it.
    pub model_id: Option<String>,
    /// Twin document version at the last applied sync. Never regresses.
    pub version: u64,
    pub connection_state: ConnectionState,
    pub power_profile: Option<PowerProfile>,
    pub connected_client_count: usize,
    pub module_count: usize,
    pub tags: Vec<TagValue>,
    pub labels: Vec<String>,
    pub last_seen: DateTime<Utc>,
}
