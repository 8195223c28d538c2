use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::adapters::CouchbaseConfig;
use crate::application::Concurrency;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub listen_address: SocketAddr,
    pub telemetry_path: String,
    pub couchbase_url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub log_level: String,
    pub buckets_refresh_interval: Duration,
    pub stats_interval: Duration,
    pub max_concurrent: NonZeroUsize,
    pub limitless_concurrent: bool,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; unset keys take defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let telemetry_path = get("COUCHBASE_EXPORTER_TELEMETRY_PATH")
            .unwrap_or_else(|| "/metrics".to_string());
        if !telemetry_path.starts_with('/')
            || telemetry_path == "/"
            || telemetry_path == "/api/health"
        {
            return Err(ConfigError::invalid(
                "COUCHBASE_EXPORTER_TELEMETRY_PATH",
                &telemetry_path,
                "must be an absolute path other than / and /api/health",
            ));
        }

        let couchbase_url: Url = parse_or(&get, "COUCHBASE_URL", "http://localhost:8091")?;
        if !matches!(couchbase_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "COUCHBASE_URL",
                couchbase_url.as_str(),
                "scheme must be http or https",
            ));
        }

        let max_concurrent: NonZeroUsize =
            parse_or(&get, "COUCHBASE_EXPORTER_MAX_CONCURRENT", "5")?;
        if max_concurrent.get() > Semaphore::MAX_PERMITS {
            return Err(ConfigError::invalid(
                "COUCHBASE_EXPORTER_MAX_CONCURRENT",
                &max_concurrent.to_string(),
                format!("must be at most {}", Semaphore::MAX_PERMITS),
            ));
        }

        Ok(Self {
            listen_address: parse_or(&get, "COUCHBASE_EXPORTER_LISTEN_ADDRESS", "0.0.0.0:9420")?,
            telemetry_path,
            couchbase_url,
            username: get("COUCHBASE_USERNAME"),
            password: get("COUCHBASE_PASSWORD"),
            log_level: get("COUCHBASE_EXPORTER_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            buckets_refresh_interval: seconds(
                &get,
                "COUCHBASE_EXPORTER_BUCKETS_REFRESH_INTERVAL_SECONDS",
                "15",
            )?,
            stats_interval: seconds(&get, "COUCHBASE_EXPORTER_STATS_INTERVAL_SECONDS", "10")?,
            max_concurrent,
            limitless_concurrent: parse_or(
                &get,
                "COUCHBASE_EXPORTER_LIMITLESS_CONCURRENT",
                "false",
            )?,
            fetch_timeout: seconds(&get, "COUCHBASE_EXPORTER_FETCH_TIMEOUT_SECONDS", "10")?,
        })
    }

    pub fn concurrency(&self) -> Concurrency {
        if self.limitless_concurrent {
            Concurrency::Limitless
        } else {
            Concurrency::Limited(self.max_concurrent)
        }
    }

    pub fn couchbase(&self) -> CouchbaseConfig {
        CouchbaseConfig::new(self.couchbase_url.clone())
            .with_credentials(self.username.clone(), self.password.clone())
            .with_timeout(self.fetch_timeout)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_address", &self.listen_address)
            .field("telemetry_path", &self.telemetry_path)
            .field("couchbase_url", &self.couchbase_url.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .field("buckets_refresh_interval", &self.buckets_refresh_interval)
            .field("stats_interval", &self.stats_interval)
            .field("max_concurrent", &self.max_concurrent)
            .field("limitless_concurrent", &self.limitless_concurrent)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = get(key).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, &value, e))
}

fn seconds(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<Duration, ConfigError> {
    let secs: u64 = parse_or(get, key, default)?;
    if secs == 0 {
        return Err(ConfigError::invalid(key, "0", "must be at least 1 second"));
    }
    Ok(Duration::from_secs(secs))
}
