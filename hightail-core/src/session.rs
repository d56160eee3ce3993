//! Per-session guidance state.
//!
//! One [`GuidanceSession`] owns everything the widget mutates at runtime:
//! the readiness gate over the shelter collection, the start point, the
//! single "last resolution" slot the status line reflects, and the
//! live-location tracker. Collaborator calls happen outside the session;
//! the session only validates, sequences and applies their outcomes.

use geo::Coord;
use log::debug;
use thiserror::Error;

use crate::directions::RouteSummary;
use crate::index::ShelterIndex;
use crate::lang::Lang;
use crate::link::walking_directions_url;
use crate::location::{LocationError, LocationProvider, PositionFix};
use crate::resolve::{Resolution, ResolveError};
use crate::select::{CandidateSelection, select_candidates};
use crate::track::Tracker;

/// Monotonic identifier for one lookup issued by a session.
///
/// Resolutions are applied only if they carry the latest issued sequence;
/// a slow in-flight query can therefore never overwrite the outcome of a
/// lookup issued after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LookupSeq(u64);

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The shelter feeds have not finished loading and merging.
    #[error("shelter data is still loading")]
    StillLoading,
    /// The external-map link needs both a start point and a resolved
    /// destination.
    #[error("set both a start point and a destination first")]
    MissingEndpoints,
}

/// How a lookup outcome changed the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// The lookup resolved; a route to the resolution's shelter should
    /// be drawn.
    Resolved(Resolution),
    /// No shelters within range; any displayed route should be cleared.
    Cleared,
    /// The routing service failed; the previous resolution, if any,
    /// stands.
    Failed(ResolveError),
    /// A newer lookup superseded this one; the outcome was discarded.
    Superseded,
}

/// Mutable state for one guidance session.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::{GuidanceSession, Lang, SessionError, ShelterIndex};
///
/// let mut session = GuidanceSession::new(Lang::En);
/// let origin = Coord { x: 140.7257, y: 41.7753 };
///
/// // Lookups are rejected until the shelter feeds are in.
/// assert_eq!(
///     session.begin_lookup(origin).unwrap_err(),
///     SessionError::StillLoading,
/// );
///
/// session.mark_ready(ShelterIndex::new(Vec::new()));
/// let (_seq, selection) = session.begin_lookup(origin)?;
/// assert!(selection.is_empty());
/// # Ok::<(), SessionError>(())
/// ```
#[derive(Debug)]
pub struct GuidanceSession {
    lang: Lang,
    shelters: Option<ShelterIndex>,
    start: Option<Coord<f64>>,
    last: Option<Resolution>,
    issued: u64,
    tracker: Tracker,
}

impl GuidanceSession {
    /// Create a session that is not yet ready for lookups.
    #[must_use]
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            shelters: None,
            start: None,
            last: None,
            issued: 0,
            tracker: Tracker::new(),
        }
    }

    /// Display language for status lines.
    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Switch the display language.
    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    /// Whether both shelter feeds have loaded and merged.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.shelters.is_some()
    }

    /// Install the merged shelter collection, opening the lookup gate.
    pub fn mark_ready(&mut self, index: ShelterIndex) {
        debug!("session ready with {} shelters", index.len());
        self.shelters = Some(index);
    }

    /// The merged shelter collection, once ready.
    #[must_use]
    pub fn shelters(&self) -> Option<&ShelterIndex> {
        self.shelters.as_ref()
    }

    /// The current start point, if one was set.
    #[must_use]
    pub fn start_point(&self) -> Option<Coord<f64>> {
        self.start
    }

    /// The last applied resolution, if any.
    #[must_use]
    pub fn resolution(&self) -> Option<&Resolution> {
        self.last.as_ref()
    }

    /// Set the start point and select candidates for a new lookup.
    ///
    /// Returns the lookup's sequence number together with the candidate
    /// selection to submit to the routing service. Rejected with
    /// [`SessionError::StillLoading`] before [`mark_ready`] has run; the
    /// action is dropped, not queued.
    ///
    /// [`mark_ready`]: Self::mark_ready
    pub fn begin_lookup(
        &mut self,
        origin: Coord<f64>,
    ) -> Result<(LookupSeq, CandidateSelection), SessionError> {
        let index = self.shelters.as_ref().ok_or(SessionError::StillLoading)?;
        self.start = Some(origin);
        self.issued += 1;
        Ok((LookupSeq(self.issued), select_candidates(origin, index)))
    }

    /// Apply the outcome of the lookup identified by `seq`.
    ///
    /// Outcomes for anything but the latest issued lookup are discarded
    /// as [`SessionUpdate::Superseded`]. A successful outcome replaces
    /// the last-resolution slot; a no-shelters outcome clears it; other
    /// errors leave it untouched.
    pub fn apply_resolution(
        &mut self,
        seq: LookupSeq,
        outcome: Result<Resolution, ResolveError>,
    ) -> SessionUpdate {
        if seq.0 != self.issued {
            debug!("discarding superseded lookup result (seq {seq:?})");
            return SessionUpdate::Superseded;
        }
        match outcome {
            Ok(resolution) => {
                self.last = Some(resolution.clone());
                SessionUpdate::Resolved(resolution)
            }
            Err(ResolveError::NoSheltersNearby) => {
                self.last = None;
                SessionUpdate::Cleared
            }
            Err(err) => SessionUpdate::Failed(err),
        }
    }

    /// Fold a drawn route's own figures into the last resolution.
    ///
    /// The rendered path's leg-level distance and duration describe the
    /// exact route on screen, so they overwrite the batch query's
    /// numbers. Without a leg, or without a resolution, nothing changes.
    pub fn apply_route(&mut self, summary: &RouteSummary) {
        let (Some(resolution), Some(leg)) = (self.last.as_mut(), summary.leg.as_ref()) else {
            return;
        };
        resolution.distance_meters = Some(leg.distance_meters);
        resolution.duration_text = Some(leg.duration_text.clone());
    }

    /// Localized status line for the last resolution, if any.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        self.last.as_ref().map(|res| self.lang.summary(res))
    }

    /// External-map walking deep link for the current endpoints.
    ///
    /// # Errors
    ///
    /// [`SessionError::MissingEndpoints`] unless both a start point and
    /// a resolved destination are present.
    pub fn maps_link(&self) -> Result<String, SessionError> {
        let (Some(origin), Some(resolution)) = (self.start, self.last.as_ref()) else {
            return Err(SessionError::MissingEndpoints);
        };
        Ok(walking_directions_url(origin, resolution.shelter.location))
    }

    /// The live-location tracker.
    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Mutable access to the live-location tracker.
    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }

    /// Position for a one-shot "evacuate from current location" action.
    ///
    /// Reuses the last applied tracked fix for an immediate response when
    /// tracking is active; otherwise requests a single fresh fix from the
    /// provider.
    pub fn current_position(
        &self,
        provider: &dyn LocationProvider,
    ) -> Result<PositionFix, LocationError> {
        if self.tracker.is_tracking() {
            if let Some(fix) = self.tracker.last_applied() {
                return Ok(*fix);
            }
        }
        provider.current_position()
    }
}
