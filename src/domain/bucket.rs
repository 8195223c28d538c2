use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Unique identifier for a bucket
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BucketName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for BucketName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Statistics document for one bucket, as returned by a single fetch.
///
/// Each series holds the recent samples in upstream order; consumers only
/// look at the last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketStatsSnapshot {
    pub samples: HashMap<String, Vec<f64>>,
    pub samples_count: f64,
    pub interval: f64,
    pub last_timestamp: f64,
    pub is_persistent: bool,
}

impl BucketStatsSnapshot {
    pub fn new(samples: HashMap<String, Vec<f64>>) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_series(mut self, field: impl Into<String>, values: Vec<f64>) -> Self {
        self.samples.insert(field.into(), values);
        self
    }

    pub fn with_meta(mut self, samples_count: f64, interval: f64, last_timestamp: f64) -> Self {
        self.samples_count = samples_count;
        self.interval = interval;
        self.last_timestamp = last_timestamp;
        self
    }

    pub fn with_persistence(mut self, is_persistent: bool) -> Self {
        self.is_persistent = is_persistent;
        self
    }

    /// Latest value of a series, `None` if the field is missing or empty
    pub fn latest(&self, field: &str) -> Option<f64> {
        self.samples.get(field).and_then(|series| series.last().copied())
    }
}

/// Summary gauges reported with the bucket list.
///
/// A field the cluster did not report stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicStats {
    pub quota_percent_used: Option<f64>,
    pub ops_per_sec: Option<f64>,
    pub disk_fetches: Option<f64>,
    pub item_count: Option<f64>,
    pub disk_used: Option<f64>,
    pub data_used: Option<f64>,
    pub mem_used: Option<f64>,
    pub vb_active_num_non_resident: Option<f64>,
}

impl BasicStats {
    pub fn get(&self, field: &str) -> Option<f64> {
        match field {
            "quota_percent_used" => self.quota_percent_used,
            "ops_per_sec" => self.ops_per_sec,
            "disk_fetches" => self.disk_fetches,
            "item_count" => self.item_count,
            "disk_used" => self.disk_used,
            "data_used" => self.data_used,
            "mem_used" => self.mem_used,
            "vb_active_num_non_resident" => self.vb_active_num_non_resident,
            _ => None,
        }
    }
}

/// One bucket as reported by discovery
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    pub name: BucketName,
    pub basic_stats: Option<BasicStats>,
}

impl BucketSummary {
    pub fn new(name: impl Into<BucketName>) -> Self {
        Self {
            name: name.into(),
            basic_stats: None,
        }
    }

    pub fn with_basic_stats(mut self, basic_stats: BasicStats) -> Self {
        self.basic_stats = Some(basic_stats);
        self
    }
}

/// Cached state for one tracked bucket
#[derive(Debug, Clone, Default)]
pub struct CacheEntry {
    pub snapshot: Option<Arc<BucketStatsSnapshot>>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Last summary seen by discovery, independent of stats fetches
    pub basic_stats: Option<Arc<BasicStats>>,
}

impl CacheEntry {
    pub fn is_fetched(&self) -> bool {
        self.snapshot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_uses_last_sample() {
        let snapshot = BucketStatsSnapshot::default().with_series("ops", vec![1.0, 2.0, 3.0]);
        assert_eq!(snapshot.latest("ops"), Some(3.0));
    }

    #[test]
    fn test_latest_missing_or_empty_series() {
        let snapshot = BucketStatsSnapshot::default().with_series("ops", Vec::new());
        assert_eq!(snapshot.latest("ops"), None);
        assert_eq!(snapshot.latest("mem_used"), None);
    }

    #[test]
    fn test_basic_stats_lookup() {
        let stats = BasicStats {
            item_count: Some(31_591.0),
            mem_used: Some(0.0),
            ..Default::default()
        };

        assert_eq!(stats.get("item_count"), Some(31_591.0));
        assert_eq!(stats.get("mem_used"), Some(0.0));
        assert_eq!(stats.get("disk_used"), None);
        assert_eq!(stats.get("itemCount"), None);
    }

    #[test]
    fn test_bucket_name_ordering() {
        let mut names = vec![BucketName::from("b"), BucketName::from("a")];
        names.sort();
        assert_eq!(names[0].as_str(), "a");
        assert_eq!(names[1].to_string(), "b");
    }
}
