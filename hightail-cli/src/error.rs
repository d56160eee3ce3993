//! Error types emitted by the Hightail CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use hightail_core::{LangParseError, ResolveError, SessionError};
use hightail_data::{BuildError, FeedError};

/// Errors emitted by the Hightail CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// CLI flag name.
        field: &'static str,
        /// Environment variable fallback.
        env: &'static str,
    },
    /// The origin option did not parse as a coordinate pair.
    #[error("invalid origin {value:?}; expected \"lat,lng\" in decimal degrees")]
    InvalidOrigin {
        /// The rejected value.
        value: String,
    },
    /// The language option was not a supported tag.
    #[error(transparent)]
    InvalidLanguage(#[from] LangParseError),
    /// A shelter feed failed to load or parse.
    #[error("failed to load shelter feed {path}: {source}")]
    Feed {
        /// Feed file path.
        path: Utf8PathBuf,
        /// Underlying feed error.
        #[source]
        source: FeedError,
    },
    /// The HTTP routing client could not be constructed.
    #[error("failed to build the routing client: {0}")]
    Provider(#[from] BuildError),
    /// A session operation was invalid.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The routing lookup failed.
    #[error("routing lookup failed: {0}")]
    Resolve(#[from] ResolveError),
}
