//! Command-line interface for the Hightail evacuation guidance engine.
//!
//! The `guide` subcommand loads the two shelter feeds, resolves the
//! walking-nearest shelter for an origin, refines the figures with the
//! walking route's own, and prints a localized summary, optionally with
//! an external-map deep link. Options merge from CLI flags, configuration
//! files and `HIGHTAIL_*` environment variables.
#![forbid(unsafe_code)]

mod error;

pub use error::CliError;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use geo::Coord;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use hightail_core::{
    DirectionsProvider, GuidanceSession, Lang, Resolution, SessionUpdate, Shelter, ShelterIndex,
    ShelterKind, resolve_nearest, resolve_straight_line,
};
use hightail_data::{
    HttpDirectionsProvider, HttpDistanceMatrixProvider, MapsApiConfig,
    feed::{load_shelter_file, merge_feeds},
};

const ARG_BUILDINGS: &str = "buildings";
const ARG_EVAC_POINTS: &str = "evac-points";
const ARG_ORIGIN: &str = "origin";
const ENV_BUILDINGS: &str = "HIGHTAIL_CMDS_GUIDE_BUILDINGS";
const ENV_EVAC_POINTS: &str = "HIGHTAIL_CMDS_GUIDE_EVAC_POINTS";
const ENV_ORIGIN: &str = "HIGHTAIL_CMDS_GUIDE_ORIGIN";

/// Run the Hightail CLI with the current process arguments and
/// environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Guide(args) => {
            let report = run_guide(args)?;
            print_report(&report);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "hightail",
    about = "Nearest evacuation shelter lookup and walking guidance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the nearest shelter for an origin and print a summary.
    Guide(GuideArgs),
}

/// CLI arguments for the `guide` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve the walking-nearest evacuation shelter for an \
                  origin point. Options can come from CLI flags, \
                  configuration files, or environment variables.",
    about = "Resolve the nearest evacuation shelter for an origin"
)]
#[ortho_config(prefix = "HIGHTAIL")]
struct GuideArgs {
    /// Path to the evacuation-building feed (JSON).
    #[arg(long = ARG_BUILDINGS, value_name = "path")]
    #[serde(default)]
    buildings: Option<Utf8PathBuf>,
    /// Path to the horizontal-evacuation-point feed (JSON).
    #[arg(long = ARG_EVAC_POINTS, value_name = "path")]
    #[serde(default)]
    evac_points: Option<Utf8PathBuf>,
    /// Origin as "lat,lng" in decimal degrees.
    #[arg(long = ARG_ORIGIN, value_name = "lat,lng")]
    #[serde(default)]
    origin: Option<String>,
    /// Display language for the summary (ja or en; defaults to ja).
    #[arg(long, value_name = "lang")]
    #[serde(default)]
    lang: Option<String>,
    /// Base URL of the mapping provider's web APIs.
    #[arg(long = "matrix-url", value_name = "url")]
    #[serde(default)]
    matrix_url: Option<String>,
    /// Base URL for the Directions API, when different from --matrix-url.
    #[arg(long = "directions-url", value_name = "url")]
    #[serde(default)]
    directions_url: Option<String>,
    /// API key for the mapping provider.
    #[arg(long = "api-key", value_name = "key")]
    #[serde(default)]
    api_key: Option<String>,
    /// Resolve with straight-line distances only, no routing service.
    #[arg(long)]
    #[serde(default)]
    offline: Option<bool>,
    /// Also print an external-map walking deep link.
    #[arg(long = "print-link")]
    #[serde(default)]
    print_link: Option<bool>,
}

impl GuideArgs {
    fn into_config(self) -> Result<GuideConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GuideConfig::try_from(merged)
    }
}

/// Validated configuration for one `guide` run.
#[derive(Debug, Clone, PartialEq)]
struct GuideConfig {
    buildings: Utf8PathBuf,
    evac_points: Utf8PathBuf,
    origin: Coord<f64>,
    lang: Lang,
    matrix_url: Option<String>,
    directions_url: Option<String>,
    api_key: Option<String>,
    offline: bool,
    print_link: bool,
}

impl TryFrom<GuideArgs> for GuideConfig {
    type Error = CliError;

    fn try_from(args: GuideArgs) -> Result<Self, Self::Error> {
        let buildings = args.buildings.ok_or(CliError::MissingArgument {
            field: ARG_BUILDINGS,
            env: ENV_BUILDINGS,
        })?;
        let evac_points = args.evac_points.ok_or(CliError::MissingArgument {
            field: ARG_EVAC_POINTS,
            env: ENV_EVAC_POINTS,
        })?;
        let origin = args.origin.ok_or(CliError::MissingArgument {
            field: ARG_ORIGIN,
            env: ENV_ORIGIN,
        })?;
        let lang = match args.lang.as_deref() {
            Some(tag) => tag.parse::<Lang>()?,
            None => Lang::default(),
        };
        Ok(Self {
            buildings,
            evac_points,
            origin: parse_origin(&origin)?,
            lang,
            matrix_url: args.matrix_url,
            directions_url: args.directions_url,
            api_key: args.api_key,
            offline: args.offline.unwrap_or_default(),
            print_link: args.print_link.unwrap_or_default(),
        })
    }
}

/// Printable outcome of one `guide` run.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GuideReport {
    /// Candidate-narrowing annotation, when a fallback tier was used.
    note: Option<String>,
    /// Localized summary or "none nearby" line.
    status: String,
    /// Route-fetch failure line; the resolved summary stands regardless.
    route_error: Option<String>,
    /// External-map deep link, when requested and available.
    link: Option<String>,
}

fn run_guide(args: GuideArgs) -> Result<GuideReport, CliError> {
    let config = args.into_config()?;
    execute(&config)
}

fn execute(config: &GuideConfig) -> Result<GuideReport, CliError> {
    let lang = config.lang;
    let buildings = load_feed(&config.buildings, ShelterKind::Building)?;
    let horizontal = load_feed(&config.evac_points, ShelterKind::Horizontal)?;
    let shelters = merge_feeds(buildings, horizontal);
    info!("merged {} shelters from both feeds", shelters.len());

    let mut session = GuidanceSession::new(lang);
    session.mark_ready(ShelterIndex::new(shelters));

    let (seq, selection) = session.begin_lookup(config.origin)?;
    let note = selection
        .note
        .map(|note| lang.selection_note(note).to_owned());

    let outcome = if config.offline {
        resolve_straight_line(config.origin, &selection)
    } else {
        let provider = build_matrix_provider(config)?;
        resolve_nearest(config.origin, &selection, &provider)
    };

    match session.apply_resolution(seq, outcome) {
        SessionUpdate::Resolved(resolution) => {
            let route_error = if config.offline {
                None
            } else {
                fold_in_route(config, &mut session, &resolution)?
            };
            let status = session
                .status_line()
                .unwrap_or_else(|| lang.ready().to_owned());
            let link = config
                .print_link
                .then(|| session.maps_link())
                .transpose()?;
            Ok(GuideReport {
                note,
                status,
                route_error,
                link,
            })
        }
        SessionUpdate::Cleared | SessionUpdate::Superseded => Ok(GuideReport {
            note,
            status: lang.no_shelters_nearby().to_owned(),
            route_error: None,
            link: None,
        }),
        SessionUpdate::Failed(err) => Err(CliError::Resolve(err)),
    }
}

/// Fetch the walking route and let its leg figures overwrite the batch
/// query's numbers. A route failure is returned as a display line, not an
/// error; the resolved destination stands.
fn fold_in_route(
    config: &GuideConfig,
    session: &mut GuidanceSession,
    resolution: &Resolution,
) -> Result<Option<String>, CliError> {
    let provider = HttpDirectionsProvider::with_config(directions_api_config(config))?;
    match provider.walking_route(config.origin, resolution.shelter.location) {
        Ok(summary) => {
            session.apply_route(&summary);
            Ok(None)
        }
        Err(err) => Ok(Some(config.lang.directions_error_line(&err))),
    }
}

fn load_feed(path: &Utf8Path, kind: ShelterKind) -> Result<Vec<Shelter>, CliError> {
    load_shelter_file(path, kind).map_err(|source| CliError::Feed {
        path: path.to_owned(),
        source,
    })
}

fn build_matrix_provider(config: &GuideConfig) -> Result<HttpDistanceMatrixProvider, CliError> {
    let api = api_config(config.matrix_url.as_deref(), config);
    Ok(HttpDistanceMatrixProvider::with_config(api)?)
}

/// Directions requests fall back to the matrix base URL when no separate
/// one is configured.
fn directions_api_config(config: &GuideConfig) -> MapsApiConfig {
    let base = config
        .directions_url
        .as_deref()
        .or(config.matrix_url.as_deref());
    api_config(base, config)
}

fn api_config(base_url: Option<&str>, config: &GuideConfig) -> MapsApiConfig {
    let mut api = base_url.map_or_else(MapsApiConfig::default, MapsApiConfig::new);
    api = api.with_language(config.lang.code());
    if let Some(key) = &config.api_key {
        api = api.with_api_key(key.clone());
    }
    api
}

/// Parse an origin given as `"lat,lng"` in decimal degrees.
fn parse_origin(value: &str) -> Result<Coord<f64>, CliError> {
    let invalid = || CliError::InvalidOrigin {
        value: value.to_owned(),
    };
    let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    Ok(Coord { x: lng, y: lat })
}

#[expect(
    clippy::print_stdout,
    reason = "the report is the command's user-facing output"
)]
fn print_report(report: &GuideReport) {
    if let Some(note) = &report.note {
        println!("{note}");
    }
    println!("{}", report.status);
    if let Some(route_error) = &report.route_error {
        println!("{route_error}");
    }
    if let Some(link) = &report.link {
        println!("{link}");
    }
}
