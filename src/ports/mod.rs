pub mod bucket_source;
pub mod bucket_store;
#[cfg(test)]
pub mod fake;

pub use bucket_source::{BucketSource, SourceError, SourceResult};
pub use bucket_store::BucketStore;
