use prometheus::{Gauge, IntCounter, IntCounterVec, IntGauge, Opts, Registry};

use super::scheduler::{CycleReport, FetchOutcome};

const NAMESPACE: &str = "couchbase_exporter";

/// Counters describing the exporter's own polling behaviour
#[derive(Clone)]
pub struct ExporterMetrics {
    fetches: IntCounterVec,
    discovery_failures: IntCounter,
    cycle_duration: Gauge,
    cycles_skipped: IntCounter,
    tracked_buckets: IntGauge,
}

impl ExporterMetrics {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            fetches: IntCounterVec::new(
                Opts::new("bucket_stats_fetches_total", "Bucket stats fetches by result")
                    .namespace(NAMESPACE),
                &["result"],
            )?,
            discovery_failures: IntCounter::with_opts(
                Opts::new("bucket_discovery_failures_total", "Failed bucket list refreshes")
                    .namespace(NAMESPACE),
            )?,
            cycle_duration: Gauge::with_opts(
                Opts::new(
                    "fetch_cycle_duration_seconds",
                    "Duration of the last bucket stats fetch cycle",
                )
                .namespace(NAMESPACE),
            )?,
            cycles_skipped: IntCounter::with_opts(
                Opts::new(
                    "fetch_cycles_skipped_total",
                    "Fetch ticks skipped because a cycle overran",
                )
                .namespace(NAMESPACE),
            )?,
            tracked_buckets: IntGauge::with_opts(
                Opts::new("tracked_buckets", "Buckets known from the last successful discovery")
                    .namespace(NAMESPACE),
            )?,
        })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.fetches.clone()))?;
        registry.register(Box::new(self.discovery_failures.clone()))?;
        registry.register(Box::new(self.cycle_duration.clone()))?;
        registry.register(Box::new(self.cycles_skipped.clone()))?;
        registry.register(Box::new(self.tracked_buckets.clone()))?;
        Ok(())
    }

    pub fn record_fetch(&self, outcome: FetchOutcome) {
        self.fetches.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn record_cycle(&self, report: &CycleReport) {
        self.cycle_duration.set(report.duration.as_secs_f64());
    }

    pub fn record_skipped_ticks(&self, ticks: u64) {
        self.cycles_skipped.inc_by(ticks);
    }

    pub fn record_discovery_failure(&self) {
        self.discovery_failures.inc();
    }

    pub fn set_tracked_buckets(&self, count: usize) {
        self.tracked_buckets.set(count as i64);
    }

    #[cfg(test)]
    pub fn fetches(&self, outcome: FetchOutcome) -> u64 {
        self.fetches.with_label_values(&[outcome.as_str()]).get()
    }

    #[cfg(test)]
    pub fn discovery_failures(&self) -> u64 {
        self.discovery_failures.get()
    }

    #[cfg(test)]
    pub fn skipped_ticks(&self) -> u64 {
        self.cycles_skipped.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_exposes_families() {
        let metrics = ExporterMetrics::new().unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();

        metrics.record_fetch(FetchOutcome::Stored);
        metrics.set_tracked_buckets(3);

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"couchbase_exporter_bucket_stats_fetches_total".to_string()));
        assert!(names.contains(&"couchbase_exporter_tracked_buckets".to_string()));
    }

    #[test]
    fn test_double_registration_fails() {
        let metrics = ExporterMetrics::new().unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();
        assert!(metrics.register(&registry).is_err());
    }
}
