use async_trait::async_trait;
use chrono::Utc;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::wire::{BucketDocument, StatsDocument};
use super::CouchbaseConfig;
use crate::domain::{BucketName, BucketStatsSnapshot, BucketSummary};
use crate::ports::{BucketSource, SourceError, SourceResult};

/// Couchbase management API adapter using reqwest
pub struct CouchbaseClient {
    http: reqwest::Client,
    config: CouchbaseConfig,
}

impl CouchbaseClient {
    pub fn new(config: CouchbaseConfig) -> SourceResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, segments: &[&str]) -> SourceResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn buckets_url(&self) -> SourceResult<Url> {
        self.endpoint(&["pools", "default", "buckets"])
    }

    fn stats_url(&self, name: &BucketName) -> SourceResult<Url> {
        let mut url = self.endpoint(&["pools", "default", "buckets", name.as_str(), "stats"])?;
        // Ask for samples newer than half a second ago, like the web console does.
        let have_timestamp = Utc::now().timestamp_millis() - 500;
        url.query_pairs_mut()
            .append_pair("haveTStamp", &have_timestamp.to_string());
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> SourceResult<T> {
        let path = url.path().to_string();
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                path,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl BucketSource for CouchbaseClient {
    async fn list_buckets(&self) -> SourceResult<Vec<BucketSummary>> {
        let buckets: Vec<BucketDocument> = self.get(self.buckets_url()?).await?;
        Ok(buckets.into_iter().map(BucketSummary::from).collect())
    }

    async fn bucket_stats(&self, name: &BucketName) -> SourceResult<BucketStatsSnapshot> {
        let doc: StatsDocument = self.get(self.stats_url(name)?).await?;
        let snapshot = BucketStatsSnapshot::from(doc);
        debug!(bucket = %name, series = snapshot.samples.len(), "Fetched bucket stats");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CouchbaseClient {
        CouchbaseClient::new(CouchbaseConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_buckets_url() {
        let client = client("http://localhost:8091");
        assert_eq!(
            client.buckets_url().unwrap().as_str(),
            "http://localhost:8091/pools/default/buckets"
        );
    }

    #[test]
    fn test_stats_url_keeps_base_path_and_escapes_name() {
        let client = client("http://cb.internal:8091/proxy/");
        let url = client.stats_url(&BucketName::from("my bucket")).unwrap();

        assert_eq!(url.path(), "/proxy/pools/default/buckets/my%20bucket/stats");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "haveTStamp");
        assert!(value.parse::<i64>().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_unreachable_cluster_is_http_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let client = CouchbaseClient::new(
            CouchbaseConfig::new(Url::parse("http://127.0.0.1:9").unwrap())
                .with_timeout(std::time::Duration::from_millis(500)),
        )
        .unwrap();

        let err = client.list_buckets().await.unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
    }
}
