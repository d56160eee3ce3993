//! HTTP directions provider for the mapping service.
//!
//! [`HttpDirectionsProvider`] implements the core
//! [`DirectionsProvider`](hightail_core::DirectionsProvider) trait
//! against the provider's Directions web API, surfacing the drawn
//! route's leg-level figures so the display can reconcile them with the
//! batch query's numbers.

mod api;
mod provider;

pub use provider::HttpDirectionsProvider;
