//! Instrumented in-memory `BucketSource` for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{BasicStats, BucketName, BucketStatsSnapshot, BucketSummary};
use crate::ports::{BucketSource, SourceError, SourceResult};

#[derive(Default)]
pub struct FakeBucketSource {
    /// `None` makes `list_buckets` fail
    buckets: Mutex<Option<Vec<BucketName>>>,
    /// Missing entries make `bucket_stats` fail
    stats: Mutex<HashMap<BucketName, BucketStatsSnapshot>>,
    /// Reported with the bucket list when present
    basic_stats: Mutex<HashMap<BucketName, BasicStats>>,
    stalled: Mutex<HashSet<BucketName>>,
    delay: Mutex<Duration>,
    probe: Arc<Probe>,
    list_calls: AtomicUsize,
}

/// Concurrency counters observed inside `bucket_stats`
#[derive(Default)]
pub struct Probe {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    per_name: Mutex<HashMap<BucketName, usize>>,
    max_per_name: AtomicUsize,
    calls: AtomicUsize,
}

struct InFlight {
    probe: Arc<Probe>,
    name: BucketName,
}

impl InFlight {
    fn enter(probe: Arc<Probe>, name: &BucketName) -> Self {
        probe.calls.fetch_add(1, Ordering::SeqCst);
        let now = probe.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        probe.max_in_flight.fetch_max(now, Ordering::SeqCst);

        {
            let mut per_name = probe.per_name.lock().unwrap();
            let count = per_name.entry(name.clone()).or_insert(0);
            *count += 1;
            probe.max_per_name.fetch_max(*count, Ordering::SeqCst);
        }

        Self {
            probe,
            name: name.clone(),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.probe.in_flight.fetch_sub(1, Ordering::SeqCst);
        if let Some(count) = self.probe.per_name.lock().unwrap().get_mut(&self.name) {
            *count -= 1;
        }
    }
}

impl FakeBucketSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(self, names: &[&str]) -> Self {
        self.set_buckets(names);
        self
    }

    pub fn with_stats(self, name: &str, snapshot: BucketStatsSnapshot) -> Self {
        self.set_stats(name, snapshot);
        self
    }

    pub fn with_basic_stats(self, name: &str, basic_stats: BasicStats) -> Self {
        self.set_basic_stats(name, basic_stats);
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = delay;
        self
    }

    pub fn set_buckets(&self, names: &[&str]) {
        let names: Vec<BucketName> = names.iter().map(|n| BucketName::from(*n)).collect();
        *self.buckets.lock().unwrap() = Some(names);
    }

    pub fn fail_buckets(&self) {
        *self.buckets.lock().unwrap() = None;
    }

    pub fn set_stats(&self, name: &str, snapshot: BucketStatsSnapshot) {
        self.stats.lock().unwrap().insert(BucketName::from(name), snapshot);
    }

    pub fn set_basic_stats(&self, name: &str, basic_stats: BasicStats) {
        self.basic_stats
            .lock()
            .unwrap()
            .insert(BucketName::from(name), basic_stats);
    }

    pub fn fail_stats(&self, name: &str) {
        self.stats.lock().unwrap().remove(&BucketName::from(name));
    }

    /// Fetches for `name` never complete
    pub fn stall(&self, name: &str) {
        self.stalled.lock().unwrap().insert(BucketName::from(name));
    }

    pub fn max_in_flight(&self) -> usize {
        self.probe.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight_per_name(&self) -> usize {
        self.probe.max_per_name.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.probe.calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BucketSource for FakeBucketSource {
    async fn list_buckets(&self) -> SourceResult<Vec<BucketSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let names = self.buckets.lock().unwrap().clone().ok_or_else(|| SourceError::Status {
            path: "/pools/default/buckets".to_string(),
            status: 503,
        })?;

        let basic_stats = self.basic_stats.lock().unwrap();
        Ok(names
            .into_iter()
            .map(|name| {
                let stats = basic_stats.get(&name).cloned();
                let summary = BucketSummary::new(name);
                match stats {
                    Some(stats) => summary.with_basic_stats(stats),
                    None => summary,
                }
            })
            .collect())
    }

    async fn bucket_stats(&self, name: &BucketName) -> SourceResult<BucketStatsSnapshot> {
        let _guard = InFlight::enter(self.probe.clone(), name);

        if self.stalled.lock().unwrap().contains(name) {
            std::future::pending::<()>().await;
        }

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.stats.lock().unwrap().get(name).cloned().ok_or_else(|| SourceError::Status {
            path: format!("/pools/default/buckets/{}/stats", name),
            status: 500,
        })
    }
}
