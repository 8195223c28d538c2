use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::scheduler::{CycleReport, FetchScheduler};
use super::telemetry::ExporterMetrics;
use crate::ports::{BucketSource, BucketStore, SourceError, SourceResult};

/// Drives bucket discovery and stats fetch cycles on their own intervals.
///
/// The two loops only meet in the store: discovery replaces the tracked name
/// set, fetch cycles read it and commit snapshots.
pub struct Refresher {
    source: Arc<dyn BucketSource>,
    store: Arc<dyn BucketStore>,
    scheduler: FetchScheduler,
    metrics: ExporterMetrics,
    discovery_interval: Duration,
    stats_interval: Duration,
    fetch_timeout: Duration,
}

/// Background loop handles returned by [`Refresher::start`]
pub struct RefresherHandles {
    pub discovery: JoinHandle<()>,
    pub stats: JoinHandle<()>,
}

impl RefresherHandles {
    /// Wait for both loops; returns how many of them panicked or were cancelled
    pub async fn join(self) -> usize {
        let mut failed = 0;
        for (name, handle) in [("discovery", self.discovery), ("stats", self.stats)] {
            if let Err(e) = handle.await {
                error!("Bucket {} loop ended abnormally: {}", name, e);
                failed += 1;
            }
        }
        failed
    }
}

impl Refresher {
    pub fn new(
        source: Arc<dyn BucketSource>,
        store: Arc<dyn BucketStore>,
        scheduler: FetchScheduler,
        metrics: ExporterMetrics,
    ) -> Self {
        Self {
            source,
            store,
            scheduler,
            metrics,
            discovery_interval: Duration::from_secs(15),
            stats_interval: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_intervals(mut self, discovery: Duration, stats: Duration) -> Self {
        self.discovery_interval = discovery;
        self.stats_interval = stats;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Refresh the tracked bucket set and summary stats from the cluster.
    ///
    /// On failure the previous set stays in place.
    pub async fn discover(&self) -> SourceResult<usize> {
        let buckets = tokio::time::timeout(self.fetch_timeout, self.source.list_buckets())
            .await
            .map_err(|_| SourceError::Timeout(self.fetch_timeout))??;

        let names: BTreeSet<_> = buckets.iter().map(|bucket| bucket.name.clone()).collect();
        let count = names.len();
        self.store.refresh_bucket_list(names);
        for bucket in buckets {
            if let Some(basic_stats) = bucket.basic_stats {
                self.store.put_basic_stats(&bucket.name, basic_stats);
            }
        }

        self.metrics.set_tracked_buckets(count);
        Ok(count)
    }

    /// Run one fetch cycle over the currently tracked buckets
    pub async fn fetch_cycle(&self) -> CycleReport {
        let names = self.store.list_names();
        let report = self.scheduler.run_cycle(names).await;
        debug!(
            buckets = report.total(),
            succeeded = report.succeeded,
            failed = report.failed,
            dropped = report.dropped,
            duration_ms = report.duration.as_millis() as u64,
            "Fetch cycle finished"
        );
        report
    }

    async fn discovery_tick(&self) {
        match self.discover().await {
            Ok(count) => debug!("Tracking {} buckets", count),
            Err(e) => {
                warn!("Failed to refresh bucket list, keeping previous set: {}", e);
                self.metrics.record_discovery_failure();
            }
        }
    }

    /// Run an initial discovery, then spawn both loops.
    ///
    /// Loops stop when `shutdown` changes or its sender is dropped. A fetch
    /// cycle in progress at that point is abandoned.
    pub async fn start(self: Arc<Self>, shutdown: watch::Receiver<()>) -> RefresherHandles {
        self.discovery_tick().await;
        info!(
            "Refreshing bucket list every {:?}, bucket stats every {:?}",
            self.discovery_interval, self.stats_interval
        );

        RefresherHandles {
            discovery: tokio::spawn(self.clone().run_discovery(shutdown.clone())),
            stats: tokio::spawn(self.run_stats(shutdown)),
        }
    }

    async fn run_discovery(self: Arc<Self>, mut shutdown: watch::Receiver<()>) {
        // The initial discovery already ran in `start`.
        let period = self.discovery_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = self.discovery_tick() => {}
            }
        }

        debug!("Bucket discovery loop stopped");
    }

    async fn run_stats(self: Arc<Self>, mut shutdown: watch::Receiver<()>) {
        let mut ticker = interval(self.stats_interval);
        // Ticks that fire while a cycle runs are dropped, so cycles never overlap.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {}
            }

            let report = tokio::select! {
                _ = shutdown.changed() => break,
                report = self.fetch_cycle() => report,
            };

            let skipped = overrun_ticks(report.duration, self.stats_interval);
            if skipped > 0 {
                warn!(
                    "Fetch cycle took {:?}, longer than the {:?} interval; skipping {} tick(s)",
                    report.duration, self.stats_interval, skipped
                );
                self.metrics.record_skipped_ticks(skipped);
            }
        }

        debug!("Bucket stats loop stopped");
    }
}

/// Number of interval ticks dropped while a cycle was running.
///
/// `Skip` still fires one tick right after an overrun, so the first tick
/// that elapsed during the cycle is not lost.
fn overrun_ticks(cycle: Duration, period: Duration) -> u64 {
    if period.is_zero() {
        return 0;
    }
    ((cycle.as_nanos() / period.as_nanos()) as u64).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::adapters::MemoryBucketStore;
    use crate::application::Concurrency;
    use crate::domain::{BasicStats, BucketName, BucketStatsSnapshot};
    use crate::ports::fake::FakeBucketSource;

    fn names(list: &[&str]) -> BTreeSet<BucketName> {
        list.iter().map(|n| BucketName::from(*n)).collect()
    }

    fn ops(value: f64) -> BucketStatsSnapshot {
        BucketStatsSnapshot::default().with_series("ops", vec![value])
    }

    fn refresher(source: &Arc<FakeBucketSource>, store: &Arc<MemoryBucketStore>) -> Refresher {
        let metrics = ExporterMetrics::new().unwrap();
        let scheduler = FetchScheduler::new(
            source.clone(),
            store.clone(),
            Concurrency::Limited(NonZeroUsize::new(4).unwrap()),
            Duration::from_secs(5),
            metrics.clone(),
        );
        Refresher::new(source.clone(), store.clone(), scheduler, metrics)
    }

    #[test]
    fn test_overrun_ticks() {
        let period = Duration::from_millis(10);
        assert_eq!(overrun_ticks(Duration::from_millis(4), period), 0);
        assert_eq!(overrun_ticks(Duration::from_millis(10), period), 0);
        assert_eq!(overrun_ticks(Duration::from_millis(19), period), 0);
        assert_eq!(overrun_ticks(Duration::from_millis(20), period), 1);
        assert_eq!(overrun_ticks(Duration::from_millis(35), period), 2);
        assert_eq!(overrun_ticks(Duration::from_millis(35), Duration::ZERO), 0);
    }

    #[tokio::test]
    async fn test_join_reports_panicked_loop() {
        let handles = RefresherHandles {
            discovery: tokio::spawn(async {}),
            stats: tokio::spawn(async { panic!("stats loop died") }),
        };

        let failed = tokio::time::timeout(Duration::from_secs(2), handles.join())
            .await
            .expect("join should return after a loop panics");
        assert_eq!(failed, 1);
    }

    #[tokio::test]
    async fn test_discovery_caches_basic_stats() {
        let basic = BasicStats {
            item_count: Some(7303.0),
            ops_per_sec: Some(0.0),
            ..Default::default()
        };
        let source = Arc::new(
            FakeBucketSource::new()
                .with_buckets(&["a", "b"])
                .with_basic_stats("a", basic.clone()),
        );
        let store = Arc::new(MemoryBucketStore::new());
        let refresher = refresher(&source, &store);

        refresher.discover().await.unwrap();

        let a = store.get(&"a".into()).unwrap();
        assert_eq!(a.basic_stats.as_deref(), Some(&basic));
        assert!(!a.is_fetched());
        assert!(store.get(&"b".into()).unwrap().basic_stats.is_none());

        // A failed discovery keeps the last summary.
        source.fail_buckets();
        assert!(refresher.discover().await.is_err());
        assert_eq!(store.get(&"a".into()).unwrap().basic_stats.as_deref(), Some(&basic));

        let updated = BasicStats {
            item_count: Some(7304.0),
            ..basic
        };
        source.set_buckets(&["a"]);
        source.set_basic_stats("a", updated.clone());
        refresher.discover().await.unwrap();
        assert_eq!(store.get(&"a".into()).unwrap().basic_stats.as_deref(), Some(&updated));
    }

    #[tokio::test]
    async fn test_failed_discovery_keeps_previous_set() {
        let source = Arc::new(FakeBucketSource::new().with_buckets(&["a", "b"]));
        let store = Arc::new(MemoryBucketStore::new());
        let refresher = refresher(&source, &store);

        assert_eq!(refresher.discover().await.unwrap(), 2);
        assert_eq!(store.list_names(), names(&["a", "b"]));

        source.fail_buckets();
        assert!(refresher.discover().await.is_err());
        assert_eq!(store.list_names(), names(&["a", "b"]));

        refresher.discovery_tick().await;
        assert_eq!(refresher.metrics.discovery_failures(), 1);

        source.set_buckets(&["b", "c"]);
        assert_eq!(refresher.discover().await.unwrap(), 2);
        assert_eq!(store.list_names(), names(&["b", "c"]));
    }

    #[tokio::test]
    async fn test_duplicate_names_are_tracked_once() {
        let source = Arc::new(FakeBucketSource::new().with_buckets(&["a", "a", "b"]));
        let store = Arc::new(MemoryBucketStore::new());

        assert_eq!(refresher(&source, &store).discover().await.unwrap(), 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_eviction_after_discovery() {
        let source = Arc::new(
            FakeBucketSource::new()
                .with_buckets(&["a", "b"])
                .with_stats("a", ops(1.0))
                .with_stats("b", ops(2.0)),
        );
        let store = Arc::new(MemoryBucketStore::new());
        let refresher = refresher(&source, &store);

        refresher.discover().await.unwrap();
        refresher.fetch_cycle().await;
        assert!(store.get(&"b".into()).unwrap().is_fetched());

        source.set_buckets(&["a"]);
        refresher.discover().await.unwrap();

        assert!(store.get(&"b".into()).is_none());
        assert_eq!(store.list_names(), names(&["a"]));
    }

    #[tokio::test]
    async fn test_cycles_never_overlap() {
        let source = Arc::new(
            FakeBucketSource::new()
                .with_buckets(&["a", "b", "c"])
                .with_stats("a", ops(1.0))
                .with_stats("b", ops(2.0))
                .with_stats("c", ops(3.0))
                .with_delay(Duration::from_millis(35)),
        );
        let store = Arc::new(MemoryBucketStore::new());
        let refresher = Arc::new(
            refresher(&source, &store)
                .with_intervals(Duration::from_millis(20), Duration::from_millis(10)),
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let handles = refresher.clone().start(shutdown_rx).await;

        tokio::time::sleep(Duration::from_millis(250)).await;
        shutdown_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(2), handles.join())
            .await
            .expect("loops should stop on shutdown");

        assert!(source.stats_calls() >= 6, "only {} fetches ran", source.stats_calls());
        assert_eq!(source.max_in_flight_per_name(), 1);
        assert!(refresher.metrics.skipped_ticks() > 0);
        assert!(source.list_calls() >= 2);
    }

    #[tokio::test]
    async fn test_shutdown_abandons_stalled_cycle() {
        let source = Arc::new(
            FakeBucketSource::new()
                .with_buckets(&["a"])
                .with_stats("a", ops(1.0)),
        );
        source.stall("a");
        let store = Arc::new(MemoryBucketStore::new());
        let refresher =
            Arc::new(refresher(&source, &store).with_fetch_timeout(Duration::from_secs(60)));

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let handles = refresher.start(shutdown_rx).await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(source.stats_calls(), 1);

        drop(shutdown_tx);
        tokio::time::timeout(Duration::from_secs(2), handles.join())
            .await
            .expect("stalled cycle should not block shutdown");

        assert!(!store.get(&"a".into()).unwrap().is_fetched());
    }
}
