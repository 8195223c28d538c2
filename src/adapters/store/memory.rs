use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{BasicStats, BucketName, BucketStatsSnapshot, CacheEntry};
use crate::ports::BucketStore;

/// In-memory bucket cache.
///
/// Snapshots are stored behind `Arc`, so a read clones a pointer under a short
/// read guard and never observes a half-written document.
#[derive(Default)]
pub struct MemoryBucketStore {
    entries: RwLock<HashMap<BucketName, CacheEntry>>,
}

impl MemoryBucketStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<BucketName, CacheEntry>> {
        // Entries are replaced whole, a panicking writer cannot leave one half-built.
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<BucketName, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BucketStore for MemoryBucketStore {
    fn refresh_bucket_list(&self, names: BTreeSet<BucketName>) {
        let mut entries = self.write();

        let before = entries.len();
        entries.retain(|name, _| names.contains(name));
        let evicted = before - entries.len();

        let mut added = 0usize;
        for name in names {
            entries.entry(name).or_insert_with(|| {
                added += 1;
                CacheEntry::default()
            });
        }

        debug!(added, evicted, tracked = entries.len(), "Bucket list refreshed");
    }

    fn put(
        &self,
        name: &BucketName,
        snapshot: BucketStatsSnapshot,
        fetched_at: DateTime<Utc>,
    ) -> bool {
        let snapshot = Arc::new(snapshot);
        let mut entries = self.write();

        match entries.get_mut(name) {
            Some(entry) => {
                entry.snapshot = Some(snapshot);
                entry.fetched_at = Some(fetched_at);
                true
            }
            None => false,
        }
    }

    fn put_basic_stats(&self, name: &BucketName, basic_stats: BasicStats) -> bool {
        let basic_stats = Arc::new(basic_stats);

        match self.write().get_mut(name) {
            Some(entry) => {
                entry.basic_stats = Some(basic_stats);
                true
            }
            None => false,
        }
    }

    fn get(&self, name: &BucketName) -> Option<CacheEntry> {
        self.read().get(name).cloned()
    }

    fn list_names(&self) -> BTreeSet<BucketName> {
        self.read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
