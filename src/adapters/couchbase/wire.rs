use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{BasicStats, BucketStatsSnapshot, BucketSummary};

/// Entry of `/pools/default/buckets`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDocument {
    pub name: String,
    pub basic_stats: Option<BasicStatsDocument>,
}

/// `basicStats` object of a bucket list entry
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStatsDocument {
    pub quota_percent_used: Option<f64>,
    pub ops_per_sec: Option<f64>,
    pub disk_fetches: Option<f64>,
    pub item_count: Option<f64>,
    pub disk_used: Option<f64>,
    pub data_used: Option<f64>,
    pub mem_used: Option<f64>,
    pub vb_active_num_non_resident: Option<f64>,
}

/// Body of `/pools/default/buckets/<name>/stats`
#[derive(Debug, Deserialize)]
pub struct StatsDocument {
    pub op: OpStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpStats {
    #[serde(default)]
    pub samples: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub samples_count: f64,
    #[serde(default)]
    pub is_persistent: bool,
    #[serde(default, rename = "lastTStamp")]
    pub last_timestamp: f64,
    #[serde(default)]
    pub interval: f64,
}

impl From<BasicStatsDocument> for BasicStats {
    fn from(doc: BasicStatsDocument) -> Self {
        Self {
            quota_percent_used: doc.quota_percent_used,
            ops_per_sec: doc.ops_per_sec,
            disk_fetches: doc.disk_fetches,
            item_count: doc.item_count,
            disk_used: doc.disk_used,
            data_used: doc.data_used,
            mem_used: doc.mem_used,
            vb_active_num_non_resident: doc.vb_active_num_non_resident,
        }
    }
}

impl From<BucketDocument> for BucketSummary {
    fn from(doc: BucketDocument) -> Self {
        let summary = BucketSummary::new(doc.name);
        match doc.basic_stats {
            Some(stats) => summary.with_basic_stats(stats.into()),
            None => summary,
        }
    }
}

impl From<StatsDocument> for BucketStatsSnapshot {
    fn from(doc: StatsDocument) -> Self {
        let op = doc.op;

        // Keep numeric arrays only; nulls inside a series are gaps, not zeros.
        let samples = op
            .samples
            .into_iter()
            .filter_map(|(field, value)| match value {
                serde_json::Value::Array(items) => {
                    let series: Vec<f64> = items.iter().filter_map(|v| v.as_f64()).collect();
                    Some((field, series))
                }
                _ => None,
            })
            .collect();

        BucketStatsSnapshot::new(samples)
            .with_meta(op.samples_count, op.interval, op.last_timestamp)
            .with_persistence(op.is_persistent)
    }
}
