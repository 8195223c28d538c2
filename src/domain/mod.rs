pub mod bucket;

pub use bucket::{BasicStats, BucketName, BucketStatsSnapshot, BucketSummary, CacheEntry};
