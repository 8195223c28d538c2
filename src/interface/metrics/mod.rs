mod collector;
mod fields;

pub use collector::BucketStatsCollector;
