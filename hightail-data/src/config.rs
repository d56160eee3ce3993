//! Configuration for the mapping provider's HTTP APIs.

use std::time::Duration;

use crate::bridge::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Configuration shared by the distance-matrix and directions providers.
///
/// Both APIs live under the same base URL and accept the same key and
/// language parameters, so one value configures either provider.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use hightail_data::MapsApiConfig;
///
/// let config = MapsApiConfig::new("https://maps.example.com")
///     .with_api_key("secret")
///     .with_language("ja")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, "https://maps.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct MapsApiConfig {
    /// Base URL of the mapping provider.
    pub base_url: String,
    /// API key appended to every request, when required.
    pub api_key: Option<String>,
    /// Language tag for localized duration texts, e.g. `"ja"`.
    pub language: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for MapsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_owned(),
            api_key: None,
            language: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl MapsApiConfig {
    /// Create a configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the response language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
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
