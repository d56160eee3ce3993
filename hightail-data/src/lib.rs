//! Data-layer collaborators for the Hightail evacuation guidance engine.
//!
//! This crate supplies the concrete implementations of `hightail-core`'s
//! collaborator seams:
//!
//! - [`feed`] loads and normalises the two shelter feeds (evacuation
//!   buildings and horizontal evacuation points), from disk or over
//!   HTTP, and merges them into the session collection.
//! - [`matrix`] implements the distance-matrix trait against the mapping
//!   provider's web API.
//! - [`directions`] implements the route-render trait against the same
//!   provider's Directions API.
//!
//! The core traits are synchronous; each HTTP component here owns a
//! Tokio runtime and bridges its async calls internally, so callers stay
//! free of async plumbing.

pub mod directions;
pub mod feed;
pub mod matrix;

mod bridge;
mod config;
mod wire;

pub use bridge::{BuildError, DEFAULT_USER_AGENT};
pub use config::MapsApiConfig;
pub use directions::HttpDirectionsProvider;
pub use feed::{FeedClient, FeedClientConfig, FeedError};
pub use matrix::HttpDistanceMatrixProvider;
