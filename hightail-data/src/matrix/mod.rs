//! HTTP distance-matrix provider for the mapping service.
//!
//! [`HttpDistanceMatrixProvider`] implements the core
//! [`DistanceMatrixProvider`](hightail_core::DistanceMatrixProvider)
//! trait against the provider's Distance Matrix web API. The synchronous
//! trait is satisfied by blocking on async HTTP calls internally, keeping
//! the core library embeddable in synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use hightail_core::DistanceMatrixProvider;
//! use hightail_data::{HttpDistanceMatrixProvider, MapsApiConfig};
//!
//! let config = MapsApiConfig::new("https://maps.googleapis.com")
//!     .with_api_key("secret")
//!     .with_language("ja");
//! let provider = HttpDistanceMatrixProvider::with_config(config)?;
//!
//! let origin = Coord { x: 140.7257, y: 41.7753 };
//! let elements = provider.walking_matrix(origin, &[Coord { x: 140.7301, y: 41.7801 }])?;
//! assert_eq!(elements.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod api;
mod provider;

pub use provider::HttpDistanceMatrixProvider;
