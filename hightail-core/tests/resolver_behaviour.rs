//! Behaviour tests for the full lookup flow: session gate, candidate
//! selection, batch resolution and route-figure reconciliation.

use geo::Coord;
use hightail_core::test_support::{ScriptedMatrixProvider, StaticDirectionsProvider, shelter_at};
use hightail_core::{
    DirectionsProvider, GuidanceSession, Lang, MatrixElement, MatrixError, RouteLeg, RouteSummary,
    SessionError, SessionUpdate, ShelterIndex, ShelterKind, resolve_nearest,
};
use rstest::{fixture, rstest};

const ORIGIN: Coord<f64> = Coord {
    x: 140.7257441,
    y: 41.775271,
};

fn reachable(distance_meters: u32, duration: &str) -> MatrixElement {
    MatrixElement::Reachable {
        distance_meters,
        duration_text: Some(duration.to_owned()),
    }
}

#[fixture]
fn session() -> GuidanceSession {
    let mut session = GuidanceSession::new(Lang::En);
    session.mark_ready(ShelterIndex::new(vec![
        shelter_at("North School", ShelterKind::Building, ORIGIN, 420.0, 0.0),
        shelter_at("East Mound", ShelterKind::Horizontal, ORIGIN, 0.0, 380.0),
        shelter_at("South Tower", ShelterKind::Building, ORIGIN, -250.0, 0.0),
    ]));
    session
}

#[rstest]
fn lookup_resolves_and_renders_end_to_end(mut session: GuidanceSession) {
    let matrix = ScriptedMatrixProvider::new(vec![Ok(vec![
        reachable(600, "9 mins"),
        reachable(520, "8 mins"),
        reachable(340, "5 mins"),
    ])]);
    let directions = StaticDirectionsProvider::new(Ok(RouteSummary {
        leg: Some(RouteLeg {
            distance_meters: 355,
            duration_text: "6 mins".to_owned(),
        }),
    }));

    let (seq, selection) = session.begin_lookup(ORIGIN).expect("session is ready");
    assert_eq!(selection.len(), 3);
    assert!(selection.note.is_none());

    let outcome = resolve_nearest(ORIGIN, &selection, &matrix);
    let update = session.apply_resolution(seq, outcome);
    let SessionUpdate::Resolved(resolution) = update else {
        panic!("expected a resolved update, got {update:?}");
    };
    assert_eq!(resolution.shelter.name, "South Tower");

    // The drawn route reports slightly different figures; they win.
    let summary = directions
        .walking_route(ORIGIN, resolution.shelter.location)
        .expect("render succeeds");
    session.apply_route(&summary);

    assert_eq!(
        session.status_line().as_deref(),
        Some("South Tower (355 m, about 6 mins)")
    );
    let link = session.maps_link().expect("both endpoints known");
    assert!(link.starts_with("https://www.google.com/maps/dir/?api=1&origin="));
}

#[rstest]
fn out_of_range_origin_clears_the_display_state(mut session: GuidanceSession) {
    // Resolve once so there is state to clear.
    let matrix = ScriptedMatrixProvider::new(vec![Ok(vec![
        reachable(600, "9 mins"),
        reachable(520, "8 mins"),
        reachable(340, "5 mins"),
    ])]);
    let (seq, selection) = session.begin_lookup(ORIGIN).expect("session is ready");
    session.apply_resolution(seq, resolve_nearest(ORIGIN, &selection, &matrix));
    assert!(session.status_line().is_some());

    // An origin far from every shelter selects nothing; the resolver is
    // never queried and the slot clears.
    let far_away = Coord {
        x: ORIGIN.x + 1.0,
        y: ORIGIN.y,
    };
    let untouched = ScriptedMatrixProvider::new(Vec::new());
    let (seq, selection) = session.begin_lookup(far_away).expect("session is ready");
    assert!(selection.is_empty());

    let update = session.apply_resolution(seq, resolve_nearest(far_away, &selection, &untouched));
    assert_eq!(update, SessionUpdate::Cleared);
    assert_eq!(untouched.calls(), 0);
    assert!(session.status_line().is_none());
    assert_eq!(session.maps_link().unwrap_err(), SessionError::MissingEndpoints);
}

#[rstest]
fn degraded_batch_still_produces_a_destination(mut session: GuidanceSession) {
    let matrix = ScriptedMatrixProvider::new(vec![Ok(vec![
        MatrixElement::Failed,
        MatrixElement::Failed,
        MatrixElement::Failed,
    ])]);

    let (seq, selection) = session.begin_lookup(ORIGIN).expect("session is ready");
    let update = session.apply_resolution(seq, resolve_nearest(ORIGIN, &selection, &matrix));

    let SessionUpdate::Resolved(resolution) = update else {
        panic!("degraded lookup should still resolve, got {update:?}");
    };
    // South Tower is the straight-line nearest at 250 m.
    assert_eq!(resolution.shelter.name, "South Tower");
    assert_eq!(resolution.distance_meters, None);
    assert_eq!(
        session.status_line().as_deref(),
        Some("South Tower (distance unknown)")
    );
}

#[rstest]
fn routing_outage_is_surfaced_and_state_kept(mut session: GuidanceSession) {
    let matrix = ScriptedMatrixProvider::new(vec![
        Ok(vec![
            reachable(600, "9 mins"),
            reachable(520, "8 mins"),
            reachable(340, "5 mins"),
        ]),
        Err(MatrixError::Service {
            code: "REQUEST_DENIED".to_owned(),
            message: "bad key".to_owned(),
        }),
    ]);

    let (seq, selection) = session.begin_lookup(ORIGIN).expect("session is ready");
    session.apply_resolution(seq, resolve_nearest(ORIGIN, &selection, &matrix));

    let (seq, selection) = session.begin_lookup(ORIGIN).expect("session is ready");
    let update = session.apply_resolution(seq, resolve_nearest(ORIGIN, &selection, &matrix));

    let SessionUpdate::Failed(err) = update else {
        panic!("expected a failed update, got {update:?}");
    };
    let line = session.lang().routing_error_line(&err);
    assert!(line.contains("REQUEST_DENIED"), "line was {line:?}");
    // The earlier resolution still stands.
    assert_eq!(
        session.resolution().map(|r| r.shelter.name.as_str()),
        Some("South Tower")
    );
}

#[rstest]
fn render_failure_is_distinct_from_routing_failure(session: GuidanceSession) {
    let directions = StaticDirectionsProvider::new(Err(
        hightail_core::DirectionsError::Service {
            code: "ZERO_RESULTS".to_owned(),
            message: String::new(),
        },
    ));

    let err = directions
        .walking_route(ORIGIN, ORIGIN)
        .expect_err("render fails");
    let line = session.lang().directions_error_line(&err);
    assert!(line.starts_with("Directions error: "), "line was {line:?}");
}
