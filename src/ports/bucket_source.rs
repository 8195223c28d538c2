use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{BucketName, BucketStatsSnapshot, BucketSummary};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {path}")]
    Status { path: String, status: u16 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Port for fetching bucket information from the cluster
#[async_trait]
pub trait BucketSource: Send + Sync {
    /// List all buckets currently defined in the cluster, with their summary stats
    async fn list_buckets(&self) -> SourceResult<Vec<BucketSummary>>;

    /// Fetch the statistics document for one bucket
    async fn bucket_stats(&self, name: &BucketName) -> SourceResult<BucketStatsSnapshot>;
}
