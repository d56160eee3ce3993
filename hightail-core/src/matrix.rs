//! Batch walking-distance queries against an external routing service.
//!
//! The [`DistanceMatrixProvider`] trait abstracts the one-origin,
//! many-destinations distance query. Callers supply candidate locations
//! and receive one [`MatrixElement`] per destination, in order. The trait
//! is synchronous to keep this crate embeddable in synchronous contexts;
//! HTTP implementations bridge their async calls internally.

use geo::Coord;
use thiserror::Error;

/// Per-destination outcome of a batch distance query.
///
/// A destination the service could not route to never exposes a distance
/// or duration; resolution logic must skip it entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixElement {
    /// The service returned a walking route to this destination.
    Reachable {
        /// Walking distance in metres.
        distance_meters: u32,
        /// Human-readable duration, e.g. `"12 mins"`, when the service
        /// supplied one.
        duration_text: Option<String>,
    },
    /// The service could not route to this destination.
    Failed,
}

/// Errors from [`DistanceMatrixProvider::walking_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No destinations were provided.
    ///
    /// The provider requires at least one destination. Callers should
    /// pre-filter input to avoid this condition.
    #[error("at least one destination is required")]
    EmptyInput,
    /// The service rejected the whole batch as too large.
    ///
    /// Distinct from per-destination failure: the response carries no
    /// elements at all and the query may be retried with fewer
    /// destinations.
    #[error("the routing service rejected the batch as too large")]
    TooManyDestinations,
    /// The request did not complete within the configured timeout.
    #[error("distance matrix request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("distance matrix request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request failed before an HTTP response arrived.
    #[error("network error reaching {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse distance matrix response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service reported a failure status of its own.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service status code, embedded verbatim.
        code: String,
        /// Accompanying message, possibly empty.
        message: String,
    },
}

/// Fetch walking distances from one origin to many destinations.
///
/// Implementations must return exactly one element per destination, in
/// the destinations' order, or a batch-level [`MatrixError`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::{DistanceMatrixProvider, MatrixElement, MatrixError};
///
/// struct FlatProvider;
///
/// impl DistanceMatrixProvider for FlatProvider {
///     fn walking_matrix(
///         &self,
///         _origin: Coord<f64>,
///         destinations: &[Coord<f64>],
///     ) -> Result<Vec<MatrixElement>, MatrixError> {
///         if destinations.is_empty() {
///             return Err(MatrixError::EmptyInput);
///         }
///         Ok(destinations
///             .iter()
///             .map(|_| MatrixElement::Reachable {
///                 distance_meters: 100,
///                 duration_text: Some("2 mins".to_owned()),
///             })
///             .collect())
///     }
/// }
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let elements = FlatProvider.walking_matrix(origin, &[Coord { x: 0.1, y: 0.0 }])?;
/// assert_eq!(elements.len(), 1);
/// # Ok::<(), MatrixError>(())
/// ```
pub trait DistanceMatrixProvider {
    /// Return one element per destination for a walking-mode query.
    ///
    /// Implementations must return `Err(MatrixError::EmptyInput)` when
    /// `destinations` is empty.
    fn walking_matrix(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Result<Vec<MatrixElement>, MatrixError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedMatrixProvider;
    use rstest::rstest;

    #[rstest]
    fn scripted_provider_replays_responses_in_order() {
        let provider = ScriptedMatrixProvider::new(vec![
            Err(MatrixError::TooManyDestinations),
            Ok(vec![MatrixElement::Failed]),
        ]);
        let origin = Coord { x: 0.0, y: 0.0 };
        let destinations = [Coord { x: 0.1, y: 0.0 }];

        assert_eq!(
            provider.walking_matrix(origin, &destinations),
            Err(MatrixError::TooManyDestinations)
        );
        assert_eq!(
            provider.walking_matrix(origin, &destinations),
            Ok(vec![MatrixElement::Failed])
        );
        assert_eq!(provider.calls(), 2);
    }
}
