use std::collections::HashMap;
use std::sync::Arc;

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};
use tracing::warn;

use super::fields::{BASIC_STATS_FIELDS, TRACKED_FIELDS};
use crate::domain::{BucketName, CacheEntry};
use crate::ports::BucketStore;

const NAMESPACE: &str = "couchbase";
const BUCKET_LABEL: &str = "bucket";

/// Where in a cache entry a field's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// Latest sample of a series in the stats snapshot
    Stats,
    /// Summary value reported by discovery
    BasicStats,
}

impl FieldSource {
    fn subsystem(self) -> &'static str {
        match self {
            Self::Stats => "bucket_stats",
            Self::BasicStats => "bucket_basicstats",
        }
    }

    fn value(self, entry: &CacheEntry, key: &str) -> Option<f64> {
        match self {
            Self::Stats => entry.snapshot.as_ref()?.latest(key),
            Self::BasicStats => entry.basic_stats.as_ref()?.get(key),
        }
    }
}

/// One exported value of `field` for `bucket`
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub source: FieldSource,
    pub field: &'static str,
    pub bucket: BucketName,
    pub value: f64,
}

struct TrackedField {
    source: FieldSource,
    key: &'static str,
    opts: Opts,
    // Never populated, only carries the descriptor.
    template: GaugeVec,
}

/// Prometheus collector serving per-bucket stats from the cache.
///
/// Scrapes only read the store; fetching is the refresher's job.
pub struct BucketStatsCollector {
    store: Arc<dyn BucketStore>,
    fields: Vec<TrackedField>,
}

impl BucketStatsCollector {
    pub fn new(store: Arc<dyn BucketStore>) -> prometheus::Result<Self> {
        let stats = TRACKED_FIELDS.iter().map(|field| (FieldSource::Stats, field));
        let basic = BASIC_STATS_FIELDS
            .iter()
            .map(|field| (FieldSource::BasicStats, field));

        let fields = stats
            .chain(basic)
            .map(|(source, (key, help))| -> prometheus::Result<TrackedField> {
                let opts = Opts::new(*key, *help)
                    .namespace(NAMESPACE)
                    .subsystem(source.subsystem());
                let template = GaugeVec::new(opts.clone(), &[BUCKET_LABEL])?;
                Ok(TrackedField {
                    source,
                    key: *key,
                    opts,
                    template,
                })
            })
            .collect::<prometheus::Result<Vec<_>>>()?;

        Ok(Self { store, fields })
    }

    /// Current value of every tracked field for every tracked bucket.
    ///
    /// Values the cache does not hold, such as stats of a bucket never
    /// fetched, contribute nothing.
    pub fn samples(&self) -> Vec<Sample> {
        let mut samples = Vec::new();

        for bucket in self.store.list_names() {
            let Some(entry) = self.store.get(&bucket) else {
                continue;
            };

            for field in &self.fields {
                if let Some(value) = field.source.value(&entry, field.key) {
                    samples.push(Sample {
                        source: field.source,
                        field: field.key,
                        bucket: bucket.clone(),
                        value,
                    });
                }
            }
        }

        samples
    }
}

impl Collector for BucketStatsCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.fields.iter().flat_map(|field| field.template.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut by_field: HashMap<(FieldSource, &str), Vec<Sample>> = HashMap::new();
        for sample in self.samples() {
            by_field
                .entry((sample.source, sample.field))
                .or_default()
                .push(sample);
        }

        let mut families = Vec::with_capacity(by_field.len());
        for field in &self.fields {
            let Some(samples) = by_field.remove(&(field.source, field.key)) else {
                continue;
            };

            let gauge = match GaugeVec::new(field.opts.clone(), &[BUCKET_LABEL]) {
                Ok(gauge) => gauge,
                Err(e) => {
                    warn!("Failed to build gauge for {}: {}", field.key, e);
                    continue;
                }
            };
            for sample in samples {
                gauge.with_label_values(&[sample.bucket.as_str()]).set(sample.value);
            }
            families.extend(gauge.collect());
        }

        families
    }
}
