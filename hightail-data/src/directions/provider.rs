//! HTTP implementation of the core directions trait.

use std::fmt;

use geo::Coord;
use log::debug;
use reqwest::Client;
use tokio::runtime::Runtime;

use hightail_core::{DirectionsError, DirectionsProvider, RouteLeg, RouteSummary};

use crate::bridge::{self, BuildError};
use crate::config::MapsApiConfig;

use super::api::{DirectionsResponse, STATUS_OK};

/// Directions provider backed by the mapping service's web API.
///
/// Owns a Tokio runtime that is reused across calls; see
/// [`crate::bridge`] for the sync/async bridging rules.
pub struct HttpDirectionsProvider {
    client: Client,
    config: MapsApiConfig,
    runtime: Runtime,
}

impl fmt::Debug for HttpDirectionsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDirectionsProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDirectionsProvider {
    /// Create a provider with default configuration for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BuildError> {
        Self::with_config(MapsApiConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn with_config(config: MapsApiConfig) -> Result<Self, BuildError> {
        let client = bridge::build_client(&config.user_agent, config.timeout)?;
        let runtime = bridge::build_runtime()?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Endpoint URL for directions queries.
    fn endpoint(&self) -> String {
        format!(
            "{}/maps/api/directions/json",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Query parameters for one walking-mode route request.
    fn query_params(&self, origin: Coord<f64>, destination: Coord<f64>) -> Vec<(&str, String)> {
        let mut params = vec![
            ("origin", format!("{},{}", origin.y, origin.x)),
            ("destination", format!("{},{}", destination.y, destination.x)),
            ("mode", "walking".to_owned()),
        ];
        if let Some(language) = &self.config.language {
            params.push(("language", language.clone()));
        }
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.clone()));
        }
        params
    }

    /// Fetch and convert one route asynchronously.
    async fn fetch_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteSummary, DirectionsError> {
        let url = self.endpoint();
        debug!("requesting walking route");

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(origin, destination))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::Parse {
                    message: err.to_string(),
                })?;

        convert_response(body)
    }

    /// Convert a reqwest error to a [`DirectionsError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DirectionsError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DirectionsError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an API response into a route summary.
///
/// The summary's leg is present only when the first route's first leg
/// reports both a distance and a duration.
fn convert_response(response: DirectionsResponse) -> Result<RouteSummary, DirectionsError> {
    if !response.is_ok() {
        return Err(DirectionsError::Service {
            code: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let leg = response
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.legs.into_iter().next())
        .and_then(|leg| match (leg.distance, leg.duration) {
            (Some(distance), Some(duration)) => Some(RouteLeg {
                distance_meters: distance.value,
                duration_text: duration.text,
            }),
            _ => None,
        });

    Ok(RouteSummary { leg })
}

impl DirectionsProvider for HttpDirectionsProvider {
    fn walking_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<RouteSummary, DirectionsError> {
        bridge::block_on(&self.runtime, self.fetch_route(origin, destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn leg_figures_survive_conversion() {
        let body = r#"{
            "status": "OK",
            "routes": [{
                "legs": [{
                    "distance": {"value": 512, "text": "0.5 km"},
                    "duration": {"value": 470, "text": "8 mins"}
                }]
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(body).expect("should parse");

        let summary = convert_response(response).expect("should convert");
        let leg = summary.leg.expect("leg should be present");
        assert_eq!(leg.distance_meters, 512);
        assert_eq!(leg.duration_text, "8 mins");
    }

    #[rstest]
    fn leg_is_absent_without_both_figures() {
        let body = r#"{
            "status": "OK",
            "routes": [{
                "legs": [{"distance": {"value": 512, "text": "0.5 km"}}]
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(body).expect("should parse");

        let summary = convert_response(response).expect("should convert");
        assert!(summary.leg.is_none());
    }

    #[rstest]
    fn routeless_success_converts_to_an_empty_summary() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"status": "OK", "routes": []}"#).expect("should parse");
        let summary = convert_response(response).expect("should convert");
        assert_eq!(summary, RouteSummary::default());
    }

    #[rstest]
    fn failure_statuses_convert_to_service_errors() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{"status": "ZERO_RESULTS", "error_message": "no walking path"}"#,
        )
        .expect("should parse");

        let err = convert_response(response).expect_err("should fail");
        assert_eq!(
            err,
            DirectionsError::Service {
                code: "ZERO_RESULTS".to_owned(),
                message: "no walking path".to_owned(),
            }
        );
    }

    #[rstest]
    fn endpoint_and_query_are_well_formed() {
        let provider = HttpDirectionsProvider::with_config(
            MapsApiConfig::new("https://maps.example.com/").with_language("en"),
        )
        .expect("provider should build");

        assert_eq!(
            provider.endpoint(),
            "https://maps.example.com/maps/api/directions/json"
        );
        let params = provider.query_params(Coord { x: 140.7, y: 41.7 }, Coord { x: 140.8, y: 41.8 });
        assert!(params.contains(&("origin", "41.7,140.7".to_owned())));
        assert!(params.contains(&("destination", "41.8,140.8".to_owned())));
        assert!(params.contains(&("language", "en".to_owned())));
    }
}
