pub mod api;
pub mod classifier;
pub mod client;
pub mod page_walker;
mod provider;
mod types;

pub use provider::{RegistryError, RegistryProvider};
pub use types::{CoreDeviceSummary, DeploymentSummary, Page, ThingSummary, ThingTypeDescription, ThingTypeSummary};
