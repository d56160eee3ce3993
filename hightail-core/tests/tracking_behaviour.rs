//! Behaviour tests for live-location tracking and the one-shot
//! current-location action.

use std::time::Duration;

use geo::Coord;
use hightail_core::test_support::{StaticLocationProvider, shelter_at};
use hightail_core::{
    EARTH_RADIUS_M, FixDisposition, GuidanceSession, Lang, LocationError, PositionFix,
    ShelterIndex, ShelterKind, TrackerState,
};
use rstest::rstest;

const ORIGIN: Coord<f64> = Coord {
    x: 140.7257441,
    y: 41.775271,
};

fn north_of(meters: f64) -> Coord<f64> {
    let meters_per_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    Coord {
        x: ORIGIN.x,
        y: ORIGIN.y + meters / meters_per_degree,
    }
}

fn fix(ms: u64, location: Coord<f64>) -> PositionFix {
    PositionFix {
        location,
        accuracy_meters: 5.0,
        timestamp: Duration::from_millis(ms),
    }
}

#[rstest]
fn a_walk_throttles_into_sparse_view_updates() {
    let mut session = GuidanceSession::new(Lang::Ja);
    session.tracker_mut().start();

    // A slow walk north, one fix every 500 ms, roughly 1 m/s.
    let mut applied = 0_usize;
    for step in 0..20_u64 {
        let disposition = session
            .tracker_mut()
            .observe(fix(step * 500, north_of(step as f64 * 0.5)));
        if disposition == FixDisposition::Applied {
            applied += 1;
        }
    }
    // 10 m of total movement at 8 m and 1.5 s floors: the first fix plus
    // one update mid-walk.
    assert_eq!(applied, 2);
}

#[rstest]
fn failure_mid_watch_surfaces_a_localized_reason() {
    let mut session = GuidanceSession::new(Lang::Ja);
    session.tracker_mut().start();
    session.tracker_mut().observe(fix(0, ORIGIN));

    let error = LocationError::Unavailable {
        message: "no signal".to_owned(),
    };
    session.tracker_mut().fail(&error);

    assert_eq!(session.tracker().state(), TrackerState::Idle);
    let line = session.lang().location_error_line(&error);
    assert!(line.contains("no signal"), "line was {line:?}");
}

#[rstest]
fn one_shot_location_feeds_a_lookup() {
    let mut session = GuidanceSession::new(Lang::En);
    session.mark_ready(ShelterIndex::new(vec![shelter_at(
        "Harbour View School",
        ShelterKind::Building,
        ORIGIN,
        200.0,
        0.0,
    )]));

    let provider = StaticLocationProvider::new(Ok(fix(0, ORIGIN)));
    let position = session
        .current_position(&provider)
        .expect("provider delivers a fix");

    let (_seq, selection) = session
        .begin_lookup(position.location)
        .expect("session is ready");
    assert_eq!(selection.len(), 1);
}

#[rstest]
#[case(LocationError::PermissionDenied)]
#[case(LocationError::Timeout)]
fn one_shot_failures_pass_through(#[case] error: LocationError) {
    let session = GuidanceSession::new(Lang::En);
    let provider = StaticLocationProvider::new(Err(error.clone()));
    assert_eq!(session.current_position(&provider).unwrap_err(), error);
}
