use crate::domain::TagValue;
use chrono::{DateTime, Utc};

/// An edge device model, reconciled from the registry's deployments. Keyed by
/// the deployment's target group so successive revisions map onto one record.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDeviceModel {
    /// Target group name of the deployment.
    pub id: String,
    pub deployment_id: String,
    /// Deployment revision at the last applied sync. Never regresses.
    pub version: u64,
    pub tags: Vec<TagValue>,
    pub labels: Vec<String>,
    pub last_seen: DateTime<Utc>,
}
