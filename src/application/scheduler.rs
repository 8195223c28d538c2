use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::telemetry::ExporterMetrics;
use crate::domain::BucketName;
use crate::ports::{BucketSource, BucketStore, SourceError};

/// How many stats fetches may run at once within a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    Limited(NonZeroUsize),
    Limitless,
}

impl Concurrency {
    /// Semaphore size for a cycle of `tasks` fetches
    fn permits(&self, tasks: usize) -> usize {
        let permits = match self {
            Self::Limited(max) => max.get(),
            Self::Limitless => tasks.max(1),
        };
        permits.min(Semaphore::MAX_PERMITS)
    }
}

/// Result of a single bucket fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Stored,
    /// The bucket was evicted while its fetch was in flight
    Dropped,
    Failed,
}

impl FetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "success",
            Self::Dropped => "dropped",
            Self::Failed => "failure",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub succeeded: usize,
    pub failed: usize,
    pub dropped: usize,
    pub duration: Duration,
}

impl CycleReport {
    fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Stored => self.succeeded += 1,
            FetchOutcome::Dropped => self.dropped += 1,
            FetchOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.dropped
    }
}

/// Fans a fetch cycle out over the tracked buckets under a concurrency cap
pub struct FetchScheduler {
    source: Arc<dyn BucketSource>,
    store: Arc<dyn BucketStore>,
    concurrency: Concurrency,
    fetch_timeout: Duration,
    metrics: ExporterMetrics,
}

impl FetchScheduler {
    pub fn new(
        source: Arc<dyn BucketSource>,
        store: Arc<dyn BucketStore>,
        concurrency: Concurrency,
        fetch_timeout: Duration,
        metrics: ExporterMetrics,
    ) -> Self {
        Self {
            source,
            store,
            concurrency,
            fetch_timeout,
            metrics,
        }
    }

    /// Fetch stats for every name and commit each success as it lands.
    ///
    /// Returns once all fetches have finished. Dropping the returned future
    /// aborts the fetches still running; none of them writes afterwards.
    pub async fn run_cycle(&self, names: BTreeSet<BucketName>) -> CycleReport {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.concurrency.permits(names.len())));
        let mut tasks = JoinSet::new();

        for name in names {
            let semaphore = semaphore.clone();
            let source = self.source.clone();
            let store = self.store.clone();
            let fetch_timeout = self.fetch_timeout;

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return FetchOutcome::Failed,
                };
                fetch_one(source.as_ref(), store.as_ref(), &name, fetch_timeout).await
            });
        }

        let mut report = CycleReport::default();
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Bucket stats fetch task failed: {}", e);
                    FetchOutcome::Failed
                }
            };
            report.record(outcome);
            self.metrics.record_fetch(outcome);
        }

        report.duration = start.elapsed();
        self.metrics.record_cycle(&report);
        report
    }
}

async fn fetch_one(
    source: &dyn BucketSource,
    store: &dyn BucketStore,
    name: &BucketName,
    fetch_timeout: Duration,
) -> FetchOutcome {
    let result = match tokio::time::timeout(fetch_timeout, source.bucket_stats(name)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(fetch_timeout)),
    };

    match result {
        Ok(snapshot) => {
            if store.put(name, snapshot, Utc::now()) {
                FetchOutcome::Stored
            } else {
                debug!(bucket = %name, "Bucket evicted during fetch, discarding stats");
                FetchOutcome::Dropped
            }
        }
        Err(e) => {
            warn!(bucket = %name, "Failed to fetch bucket stats: {}", e);
            FetchOutcome::Failed
        }
    }
}
