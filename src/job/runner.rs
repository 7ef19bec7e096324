use crate::reconcile::{CycleSummary, ReconcileError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, timeout};
use tracing::{error, info, warn};

/// One periodic sync target.
#[async_trait]
pub trait SyncJob: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self) -> Result<CycleSummary, ReconcileError>;
}

/// Wraps one job for the scheduler: logs start and outcome, swallows every
/// failure so a broken cycle never takes the scheduler down, and skips a tick
/// while the previous cycle of the same job is still running.
pub struct JobRunner {
    job: Arc<dyn SyncJob>,
    running: Mutex<()>,
    cycle_timeout: Option<Duration>,
}

impl JobRunner {
    pub fn new(job: Arc<dyn SyncJob>, cycle_timeout: Option<Duration>) -> Self {
        JobRunner {
            job,
            running: Mutex::new(()),
            cycle_timeout,
        }
    }

    pub fn name(&self) -> &'static str {
        self.job.name()
    }

    pub async fn run(&self) {
        let Ok(_guard) = self.running.try_lock() else {
            warn!("⏭️ Skipping '{}', the previous cycle is still running", self.name());
            return;
        };

        info!("🔄 Syncing {}...", self.name());
        let started = Instant::now();

        let result = match self.cycle_timeout {
            Some(limit) => timeout(limit, self.job.execute()).await.unwrap_or(Err(ReconcileError::TimedOut)),
            None => self.job.execute().await,
        };

        match result {
            Ok(summary) => info!("🔄 Syncing {}... OK in {:?}: {}", self.name(), started.elapsed(), summary),
            Err(ReconcileError::Cancelled) => info!("🔄 Syncing {}... stopped, shutdown requested", self.name()),
            Err(e) => error!("🔄 Syncing {}... failed: {}", self.name(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_log::test;

    struct RecordingJob {
        executions: AtomicUsize,
        delay: Duration,
        result: fn() -> Result<CycleSummary, ReconcileError>,
    }

    impl RecordingJob {
        fn new(delay: Duration, result: fn() -> Result<CycleSummary, ReconcileError>) -> Arc<Self> {
            Arc::new(RecordingJob {
                executions: AtomicUsize::new(0),
                delay,
                result,
            })
        }
    }

    #[async_trait]
    impl SyncJob for RecordingJob {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn execute(&self) -> Result<CycleSummary, ReconcileError> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (self.result)()
        }
    }

    #[test(tokio::test)]
    async fn a_failing_cycle_is_swallowed() {
        let job = RecordingJob::new(Duration::ZERO, || Err(ReconcileError::Store(StoreError::Backend("db gone".to_string()))));
        let runner = JobRunner::new(job.clone(), None);

        runner.run().await;

        assert_eq!(job.executions.load(Ordering::SeqCst), 1);
    }

    #[test(tokio::test)]
    async fn overlapping_runs_of_the_same_job_are_skipped() {
        let job = RecordingJob::new(Duration::from_millis(50), || Ok(CycleSummary::default()));
        let runner = JobRunner::new(job.clone(), None);

        tokio::join!(runner.run(), runner.run());

        assert_eq!(job.executions.load(Ordering::SeqCst), 1);
    }

    #[test(tokio::test(start_paused = true))]
    async fn a_cycle_exceeding_the_timeout_is_abandoned() {
        let job = RecordingJob::new(Duration::from_secs(3600), || Ok(CycleSummary::default()));
        let runner = JobRunner::new(job.clone(), Some(Duration::from_secs(1)));

        runner.run().await;

        assert_eq!(job.executions.load(Ordering::SeqCst), 1);
    }
}
