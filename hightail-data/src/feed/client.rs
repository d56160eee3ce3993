//! HTTP loading of the two shelter feeds.

use std::fmt;
use std::time::Duration;

use log::info;
use reqwest::Client;
use tokio::runtime::Runtime;

use hightail_core::{Shelter, ShelterKind};

use crate::bridge::{self, BuildError, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

use super::{FeedError, merge_feeds, parse_shelters};

/// Configuration for [`FeedClient`].
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// URL of the evacuation-building feed.
    pub buildings_url: String,
    /// URL of the horizontal-evacuation-point feed.
    pub evac_points_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl FeedClientConfig {
    /// Create a configuration from the two feed URLs.
    #[must_use]
    pub fn new(buildings_url: impl Into<String>, evac_points_url: impl Into<String>) -> Self {
        Self {
            buildings_url: buildings_url.into(),
            evac_points_url: evac_points_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fetches both shelter feeds and merges them into one collection.
///
/// The two requests run concurrently; the merged collection only exists
/// once both have succeeded, which is what gates the session's readiness.
pub struct FeedClient {
    client: Client,
    config: FeedClientConfig,
    runtime: Runtime,
}

impl fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl FeedClient {
    /// Create a client for the given feed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(config: FeedClientConfig) -> Result<Self, BuildError> {
        let client = bridge::build_client(&config.user_agent, config.timeout)?;
        let runtime = bridge::build_runtime()?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Fetch both feeds and merge them, buildings first.
    ///
    /// # Errors
    ///
    /// Returns the first [`FeedError`] either fetch or parse produced;
    /// a partial collection is never returned.
    pub fn fetch_merged(&self) -> Result<Vec<Shelter>, FeedError> {
        let merged = bridge::block_on(&self.runtime, async {
            let (buildings, horizontal) = tokio::try_join!(
                self.fetch(&self.config.buildings_url, ShelterKind::Building),
                self.fetch(&self.config.evac_points_url, ShelterKind::Horizontal),
            )?;
            Ok::<_, FeedError>(merge_feeds(buildings, horizontal))
        })?;
        info!("loaded {} shelters from both feeds", merged.len());
        Ok(merged)
    }

    /// Fetch and parse one feed.
    async fn fetch(&self, url: &str, kind: ShelterKind) -> Result<Vec<Shelter>, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let body = response.text().await.map_err(|err| FeedError::Network {
            url: url.to_owned(),
            message: err.to_string(),
        })?;
        parse_shelters(&body, kind)
    }

    /// Convert a reqwest error to a [`FeedError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> FeedError {
        if error.is_timeout() {
            return FeedError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return FeedError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        FeedError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_pattern() {
        let config = FeedClientConfig::new(
            "https://example.com/destinations.json",
            "https://example.com/evac_points.json",
        )
        .with_timeout(Duration::from_secs(5))
        .with_user_agent("test-agent/1.0");

        assert_eq!(config.buildings_url, "https://example.com/destinations.json");
        assert_eq!(config.evac_points_url, "https://example.com/evac_points.json");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn client_builds_from_config() {
        let config = FeedClientConfig::new(
            "https://example.com/destinations.json",
            "https://example.com/evac_points.json",
        );
        let client = FeedClient::new(config).expect("client should build");
        assert!(format!("{client:?}").contains("FeedClient"));
    }
}
