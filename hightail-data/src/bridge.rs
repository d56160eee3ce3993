//! Bridge between async HTTP calls and the synchronous core traits.
//!
//! The core traits are synchronous to keep `hightail-core` embeddable in
//! synchronous contexts. Each HTTP component owns a current-thread Tokio
//! runtime that is reused across calls, avoiding the overhead of creating
//! a new runtime per request.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Default user agent for requests to the mapping provider.
pub const DEFAULT_USER_AGENT: &str = "hightail/0.1";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors constructing an HTTP-backed component.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Build the reused current-thread runtime.
pub(crate) fn build_runtime() -> Result<Runtime, BuildError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(BuildError::Runtime)
}

/// Build an HTTP client with the component's timeout and user agent.
pub(crate) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, BuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(BuildError::HttpClient)
}

/// Drive `future` to completion from a synchronous call site.
///
/// When called from within an existing multi-threaded Tokio runtime
/// (detected via [`Handle::try_current`]), that runtime's handle is used
/// with [`tokio::task::block_in_place`] to avoid nested-runtime panics.
/// Outside any runtime, or inside a `current_thread` runtime, the
/// component's own stored runtime drives the future instead.
pub(crate) fn block_on<F: Future>(runtime: &Runtime, future: F) -> F::Output {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        // No runtime detected, or current_thread runtime: use our own.
        _ => runtime.block_on(future),
    }
}
