use crate::job::runner::JobRunner;
use crate::job::shutdown::Shutdown;
use chrono::Utc;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

/// Spawns the cron loop for one job. An invalid expression is logged and the
/// job is never scheduled; a failed cycle simply waits for the next tick.
pub fn spawn_on_schedule(runner: Arc<JobRunner>, cron_expression: &str, shutdown: Shutdown) {
    let schedule = match Schedule::from_str(cron_expression) {
        Ok(schedule) => schedule,
        Err(_e) => {
            warn!("🕗 Scheduling '{}'... failed, invalid cron expression '{}'", runner.name(), cron_expression);
            return;
        }
    };

    info!("🕗 Scheduled '{}' with '{}'", runner.name(), cron_expression);

    let cron = cron_expression.to_string();
    tokio::spawn(async move {
        for datetime in schedule.upcoming(Utc) {
            let duration = datetime.signed_duration_since(Utc::now());
            if duration.num_milliseconds() < 0 {
                continue; // Already passed
            }

            let tick = Instant::now() + Duration::from_millis(duration.num_milliseconds() as u64);
            tokio::select! {
                _ = sleep_until(tick) => {
                    debug!(cron, "🕗 Running '{}'...", runner.name());
                    runner.run().await;
                }
                _ = shutdown.requested() => {
                    debug!("🕗 Stopped scheduling '{}'", runner.name());
                    break;
                }
            }
        }
    });
}
