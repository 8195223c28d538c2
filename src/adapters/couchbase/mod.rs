mod client;
mod wire;

use std::time::Duration;

use reqwest::Url;

pub use client::CouchbaseClient;

/// Connection settings for the Couchbase management API
#[derive(Debug, Clone)]
pub struct CouchbaseConfig {
    pub base_url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl CouchbaseConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            username: None,
            password: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
