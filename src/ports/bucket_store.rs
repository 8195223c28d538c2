use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{BasicStats, BucketName, BucketStatsSnapshot, CacheEntry};

/// Port for the shared per-bucket stats cache.
///
/// One task discovers buckets and commits fetch results, any number of
/// scrapes read concurrently. Implementations must never perform I/O.
pub trait BucketStore: Send + Sync {
    /// Replace the tracked name set. Entries for names that stay tracked are kept,
    /// dropped names lose their entry, new names start without a snapshot.
    fn refresh_bucket_list(&self, names: BTreeSet<BucketName>);

    /// Install the latest snapshot for `name`.
    ///
    /// Returns `false` without storing anything if `name` is no longer tracked.
    fn put(
        &self,
        name: &BucketName,
        snapshot: BucketStatsSnapshot,
        fetched_at: DateTime<Utc>,
    ) -> bool;

    /// Install the summary stats discovery reported for `name`.
    ///
    /// Leaves the stats snapshot alone. Returns `false` if `name` is not tracked.
    fn put_basic_stats(&self, name: &BucketName, basic_stats: BasicStats) -> bool;

    /// Current entry for `name`, `None` if the name is not tracked
    fn get(&self, name: &BucketName) -> Option<CacheEntry>;

    /// Point-in-time copy of the tracked names
    fn list_names(&self) -> BTreeSet<BucketName>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
