//! Test-only fakes and fixture helpers for unit and behaviour tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use geo::Coord;

use crate::directions::{DirectionsError, DirectionsProvider, RouteSummary};
use crate::distance::EARTH_RADIUS_M;
use crate::location::{LocationError, LocationProvider, PositionFix};
use crate::matrix::{DistanceMatrixProvider, MatrixElement, MatrixError};
use crate::shelter::{Shelter, ShelterKind};

/// Build a shelter offset from `origin` by metric north/east components.
///
/// Offsets convert through the same Earth radius the distance primitive
/// uses, so a shelter placed 400 m north measures ~400 m away again.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "metre/degree conversion is inherently floating point"
)]
pub fn shelter_at(
    name: &str,
    kind: ShelterKind,
    origin: Coord<f64>,
    north_m: f64,
    east_m: f64,
) -> Shelter {
    let meters_per_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    let location = Coord {
        x: origin.x + east_m / (meters_per_degree * origin.y.to_radians().cos()),
        y: origin.y + north_m / meters_per_degree,
    };
    Shelter::new(name, location, kind)
}

/// Distance-matrix fake replaying a script of canned responses.
///
/// Each call pops the next scripted response; the fake also records how
/// many calls it served and the destination count of the most recent one,
/// so tests can assert on retry behaviour.
#[derive(Debug, Default)]
pub struct ScriptedMatrixProvider {
    responses: RefCell<VecDeque<Result<Vec<MatrixElement>, MatrixError>>>,
    calls: Cell<usize>,
    last_destination_count: Cell<Option<usize>>,
}

impl ScriptedMatrixProvider {
    /// Create a fake that replays `responses` in order.
    #[must_use]
    pub fn new(responses: Vec<Result<Vec<MatrixElement>, MatrixError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: Cell::new(0),
            last_destination_count: Cell::new(None),
        }
    }

    /// Number of batch queries served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Destination count of the most recent batch query, if any.
    #[must_use]
    pub fn last_destination_count(&self) -> Option<usize> {
        self.last_destination_count.get()
    }
}

impl DistanceMatrixProvider for ScriptedMatrixProvider {
    fn walking_matrix(
        &self,
        _origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Result<Vec<MatrixElement>, MatrixError> {
        self.calls.set(self.calls.get() + 1);
        self.last_destination_count.set(Some(destinations.len()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(MatrixError::Service {
                code: "SCRIPT_EXHAUSTED".to_owned(),
                message: "no scripted response left".to_owned(),
            }))
    }
}

/// Directions fake returning the same outcome on every call.
#[derive(Debug)]
pub struct StaticDirectionsProvider {
    outcome: Result<RouteSummary, DirectionsError>,
    calls: Cell<usize>,
}

impl StaticDirectionsProvider {
    /// Create a fake that always returns `outcome`.
    #[must_use]
    pub fn new(outcome: Result<RouteSummary, DirectionsError>) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
        }
    }

    /// Number of route requests served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DirectionsProvider for StaticDirectionsProvider {
    fn walking_route(
        &self,
        _origin: Coord<f64>,
        _destination: Coord<f64>,
    ) -> Result<RouteSummary, DirectionsError> {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

/// Location fake returning the same outcome on every call.
#[derive(Debug)]
pub struct StaticLocationProvider {
    outcome: Result<PositionFix, LocationError>,
}

impl StaticLocationProvider {
    /// Create a fake that always returns `outcome`.
    #[must_use]
    pub fn new(outcome: Result<PositionFix, LocationError>) -> Self {
        Self { outcome }
    }
}

impl LocationProvider for StaticLocationProvider {
    fn current_position(&self) -> Result<PositionFix, LocationError> {
        self.outcome.clone()
    }
}
