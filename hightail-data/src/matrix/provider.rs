//! HTTP implementation of the core distance-matrix trait.

use std::fmt;

use geo::Coord;
use log::debug;
use reqwest::Client;
use tokio::runtime::Runtime;

use hightail_core::{DistanceMatrixProvider, MatrixElement, MatrixError};

use crate::bridge::{self, BuildError};
use crate::config::MapsApiConfig;

use super::api::{
    MatrixElementResponse, MatrixResponse, STATUS_MAX_DIMENSIONS_EXCEEDED, STATUS_OK,
};

/// Distance-matrix provider backed by the mapping service's web API.
///
/// Owns a Tokio runtime that is reused across calls; see
/// [`crate::bridge`] for the sync/async bridging rules.
pub struct HttpDistanceMatrixProvider {
    client: Client,
    config: MapsApiConfig,
    runtime: Runtime,
}

impl fmt::Debug for HttpDistanceMatrixProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDistanceMatrixProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDistanceMatrixProvider {
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

    /// Endpoint URL for distance-matrix queries.
    fn endpoint(&self) -> String {
        format!(
            "{}/maps/api/distancematrix/json",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Query parameters for one walking-mode batch.
    ///
    /// Coordinates serialise latitude-first; destinations join with `|`.
    fn query_params(&self, origin: Coord<f64>, destinations: &[Coord<f64>]) -> Vec<(&str, String)> {
        let joined = destinations
            .iter()
            .map(|coord| format!("{},{}", coord.y, coord.x))
            .collect::<Vec<_>>()
            .join("|");

        let mut params = vec![
            ("origins", format!("{},{}", origin.y, origin.x)),
            ("destinations", joined),
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

    /// Fetch and convert one batch asynchronously.
    async fn fetch_elements(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Result<Vec<MatrixElement>, MatrixError> {
        let url = self.endpoint();
        debug!(
            "querying distance matrix for {} destinations",
            destinations.len()
        );

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(origin, destinations))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body: MatrixResponse =
            response
                .json()
                .await
                .map_err(|err| MatrixError::Parse {
                    message: err.to_string(),
                })?;

        self.convert_response(body)
    }

    /// Convert a reqwest error to a [`MatrixError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> MatrixError {
        if error.is_timeout() {
            return MatrixError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return MatrixError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        MatrixError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Convert an API response into per-destination elements.
    fn convert_response(&self, response: MatrixResponse) -> Result<Vec<MatrixElement>, MatrixError> {
        if response.status == STATUS_MAX_DIMENSIONS_EXCEEDED {
            return Err(MatrixError::TooManyDestinations);
        }
        if !response.is_ok() {
            return Err(MatrixError::Service {
                code: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }

        let row = response
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| MatrixError::Parse {
                message: "response carried no result row".to_owned(),
            })?;

        Ok(row.elements.into_iter().map(convert_element).collect())
    }
}

/// Convert one element, never reading figures off a non-OK element.
fn convert_element(element: MatrixElementResponse) -> MatrixElement {
    if element.status != STATUS_OK {
        return MatrixElement::Failed;
    }
    // An OK element without a distance is malformed; treat it as failed
    // rather than inventing a figure.
    match element.distance {
        Some(distance) => MatrixElement::Reachable {
            distance_meters: distance.value,
            duration_text: element.duration.map(|duration| duration.text),
        },
        None => MatrixElement::Failed,
    }
}

impl DistanceMatrixProvider for HttpDistanceMatrixProvider {
    fn walking_matrix(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Result<Vec<MatrixElement>, MatrixError> {
        if destinations.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        bridge::block_on(&self.runtime, self.fetch_elements(origin, destinations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::api::MatrixRow;
    use crate::wire::ValueText;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> HttpDistanceMatrixProvider {
        HttpDistanceMatrixProvider::new("https://maps.example.com")
            .expect("provider should build")
    }

    fn ok_element(meters: u32, duration: &str) -> MatrixElementResponse {
        MatrixElementResponse {
            status: STATUS_OK.to_owned(),
            distance: Some(ValueText {
                value: meters,
                text: format!("{meters} m"),
            }),
            duration: Some(ValueText {
                value: 300,
                text: duration.to_owned(),
            }),
        }
    }

    #[rstest]
    fn endpoint_strips_trailing_slashes(provider: HttpDistanceMatrixProvider) {
        let slashed = HttpDistanceMatrixProvider::new("https://maps.example.com/")
            .expect("provider should build");
        assert_eq!(provider.endpoint(), slashed.endpoint());
        assert!(!provider.endpoint().contains("com//"));
    }

    #[rstest]
    fn query_joins_destinations_latitude_first(provider: HttpDistanceMatrixProvider) {
        let params = provider.query_params(
            Coord { x: 140.7, y: 41.7 },
            &[Coord { x: 140.8, y: 41.8 }, Coord { x: 140.9, y: 41.9 }],
        );
        assert!(params.contains(&("origins", "41.7,140.7".to_owned())));
        assert!(params.contains(&("destinations", "41.8,140.8|41.9,140.9".to_owned())));
        assert!(params.contains(&("mode", "walking".to_owned())));
    }

    #[rstest]
    fn language_and_key_are_forwarded() {
        let provider = HttpDistanceMatrixProvider::with_config(
            MapsApiConfig::new("https://maps.example.com")
                .with_language("ja")
                .with_api_key("secret"),
        )
        .expect("provider should build");

        let params = provider.query_params(Coord { x: 0.0, y: 0.0 }, &[]);
        assert!(params.contains(&("language", "ja".to_owned())));
        assert!(params.contains(&("key", "secret".to_owned())));
    }

    #[rstest]
    fn ok_elements_convert_with_their_figures(provider: HttpDistanceMatrixProvider) {
        let response = MatrixResponse {
            status: STATUS_OK.to_owned(),
            error_message: None,
            rows: vec![MatrixRow {
                elements: vec![
                    ok_element(480, "7 mins"),
                    MatrixElementResponse {
                        status: "ZERO_RESULTS".to_owned(),
                        distance: Some(ValueText {
                            value: 9_999,
                            text: "ignored".to_owned(),
                        }),
                        duration: None,
                    },
                ],
            }],
        };

        let elements = provider.convert_response(response).expect("should convert");
        assert_eq!(
            elements,
            vec![
                MatrixElement::Reachable {
                    distance_meters: 480,
                    duration_text: Some("7 mins".to_owned()),
                },
                // The failed element's stray figures are never read.
                MatrixElement::Failed,
            ]
        );
    }

    #[rstest]
    fn ok_element_without_distance_is_failed(provider: HttpDistanceMatrixProvider) {
        let response = MatrixResponse {
            status: STATUS_OK.to_owned(),
            error_message: None,
            rows: vec![MatrixRow {
                elements: vec![MatrixElementResponse {
                    status: STATUS_OK.to_owned(),
                    distance: None,
                    duration: None,
                }],
            }],
        };

        let elements = provider.convert_response(response).expect("should convert");
        assert_eq!(elements, vec![MatrixElement::Failed]);
    }

    #[rstest]
    fn dimension_overflow_maps_to_too_many_destinations(provider: HttpDistanceMatrixProvider) {
        let response = MatrixResponse {
            status: STATUS_MAX_DIMENSIONS_EXCEEDED.to_owned(),
            error_message: None,
            rows: Vec::new(),
        };
        let err = provider.convert_response(response).expect_err("should fail");
        assert_eq!(err, MatrixError::TooManyDestinations);
    }

    #[rstest]
    fn other_statuses_map_to_service_errors(provider: HttpDistanceMatrixProvider) {
        let response = MatrixResponse {
            status: "REQUEST_DENIED".to_owned(),
            error_message: Some("invalid key".to_owned()),
            rows: Vec::new(),
        };
        let err = provider.convert_response(response).expect_err("should fail");
        assert_eq!(
            err,
            MatrixError::Service {
                code: "REQUEST_DENIED".to_owned(),
                message: "invalid key".to_owned(),
            }
        );
    }

    #[rstest]
    fn missing_rows_are_a_parse_error(provider: HttpDistanceMatrixProvider) {
        let response = MatrixResponse {
            status: STATUS_OK.to_owned(),
            error_message: None,
            rows: Vec::new(),
        };
        let err = provider.convert_response(response).expect_err("should fail");
        assert!(matches!(err, MatrixError::Parse { .. }));
    }

    #[rstest]
    fn empty_input_returns_an_error(provider: HttpDistanceMatrixProvider) {
        let err = provider
            .walking_matrix(Coord { x: 0.0, y: 0.0 }, &[])
            .expect_err("should fail");
        assert_eq!(err, MatrixError::EmptyInput);
    }

    #[rstest]
    fn response_body_deserialises_from_json(provider: HttpDistanceMatrixProvider) {
        let body = r#"{
            "status": "OK",
            "rows": [{
                "elements": [
                    {"status": "OK",
                     "distance": {"value": 340, "text": "0.3 km"},
                     "duration": {"value": 290, "text": "5 mins"}},
                    {"status": "NOT_FOUND"}
                ]
            }]
        }"#;
        let response: MatrixResponse = serde_json::from_str(body).expect("should parse");
        let elements = provider.convert_response(response).expect("should convert");
        assert_eq!(
            elements,
            vec![
                MatrixElement::Reachable {
                    distance_meters: 340,
                    duration_text: Some("5 mins".to_owned()),
                },
                MatrixElement::Failed,
            ]
        );
    }
}
