pub mod runner;
pub mod scheduler;
mod shutdown;

pub use runner::{JobRunner, SyncJob};
pub use shutdown::{Shutdown, ShutdownSignal, shutdown_channel};
