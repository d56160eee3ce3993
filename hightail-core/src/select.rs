//! Candidate selection for batch distance queries.
//!
//! The routing service caps the number of destinations a single
//! distance-matrix query may carry, so every lookup runs a cheap,
//! deterministic pre-filter first: prefer the tightest search radius that
//! still yields a usable, in-budget candidate set, and only fall back to a
//! hard nearest-K cut when no radius tier fits.

use geo::Coord;
use log::info;

use crate::distance::haversine_meters;
use crate::index::ShelterIndex;
use crate::shelter::Shelter;

/// Primary search radius in metres. Shelters beyond this are considered
/// unreachable on foot in time.
pub const SEARCH_RADIUS_M: f64 = 700.0;

/// Radius the search narrows to when the primary tier overflows the
/// matrix budget.
pub const NARROWED_RADIUS_M: f64 = 500.0;

/// Maximum destinations the routing service accepts per batch query.
pub const MAX_MATRIX_DESTINATIONS: usize = 25;

/// Which fallback tier produced a candidate list.
///
/// Purely informational; surfaced to the user and logged, never consulted
/// by later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionNote {
    /// The 700 m tier overflowed and the 500 m tier was used instead.
    NarrowedTo500m,
    /// Both radius tiers overflowed (or the narrow tier was empty); the
    /// nearest 25 shelters by straight-line distance were kept.
    UsingNearest25,
}

/// Bounded candidate list for one batch distance query.
///
/// The list is always a deduplicated subsequence of the session's
/// shelters, holds at most [`MAX_MATRIX_DESTINATIONS`] entries, and is
/// empty only when nothing lies within [`SEARCH_RADIUS_M`].
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSelection {
    /// Candidate shelters, in feed order or by ascending straight-line
    /// distance depending on the tier that produced them.
    pub shelters: Vec<Shelter>,
    /// Fallback tier annotation, if any narrowing happened.
    pub note: Option<SelectionNote>,
}

impl CandidateSelection {
    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    /// Whether the selection holds no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }
}

/// Pick the candidates to submit to the routing service for `origin`.
///
/// Policy, with the fixed constants above:
///
/// 1. Keep shelters within 700 m. None → empty selection (the caller must
///    not query the routing service).
/// 2. At most 25 within 700 m → use them as-is, feed order preserved.
/// 3. Otherwise re-filter to 500 m. At most 25 there → use that tier.
/// 4. If even the 500 m tier overflows (or is empty), keep the nearest 25
///    by straight-line distance from the widest non-empty tier.
///
/// Deterministic for a fixed shelter insertion order; distance ties keep
/// feed order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hightail_core::{select_candidates, Shelter, ShelterIndex, ShelterKind};
///
/// let origin = Coord { x: 140.7257, y: 41.7753 };
/// let index = ShelterIndex::new(vec![Shelter::new(
///     "Near",
///     Coord { x: 140.7260, y: 41.7753 },
///     ShelterKind::Building,
/// )]);
///
/// let selection = select_candidates(origin, &index);
/// assert_eq!(selection.len(), 1);
/// assert!(selection.note.is_none());
/// ```
#[must_use]
pub fn select_candidates(origin: Coord<f64>, index: &ShelterIndex) -> CandidateSelection {
    let near = index.within_radius(origin, SEARCH_RADIUS_M);

    if near.is_empty() {
        return CandidateSelection {
            shelters: Vec::new(),
            note: None,
        };
    }

    if near.len() <= MAX_MATRIX_DESTINATIONS {
        return CandidateSelection {
            shelters: near,
            note: None,
        };
    }

    let narrowed = index.within_radius(origin, NARROWED_RADIUS_M);

    if narrowed.is_empty() {
        info!(
            "{} shelters within {SEARCH_RADIUS_M} m but none within {NARROWED_RADIUS_M} m; \
             keeping the nearest {MAX_MATRIX_DESTINATIONS}",
            near.len()
        );
        return CandidateSelection {
            shelters: nearest_subset(origin, &near, MAX_MATRIX_DESTINATIONS),
            note: Some(SelectionNote::UsingNearest25),
        };
    }

    if narrowed.len() <= MAX_MATRIX_DESTINATIONS {
        info!(
            "narrowed candidate search to {NARROWED_RADIUS_M} m ({} shelters)",
            narrowed.len()
        );
        return CandidateSelection {
            shelters: narrowed,
            note: Some(SelectionNote::NarrowedTo500m),
        };
    }

    info!(
        "{} shelters within {NARROWED_RADIUS_M} m; keeping the nearest {MAX_MATRIX_DESTINATIONS}",
        narrowed.len()
    );
    CandidateSelection {
        shelters: nearest_subset(origin, &narrowed, MAX_MATRIX_DESTINATIONS),
        note: Some(SelectionNote::UsingNearest25),
    }
}

/// The `limit` shelters nearest to `origin` by straight-line distance.
///
/// The sort is stable, so shelters at equal distances keep their relative
/// input order.
#[must_use]
pub fn nearest_subset(origin: Coord<f64>, shelters: &[Shelter], limit: usize) -> Vec<Shelter> {
    let mut ranked: Vec<(f64, &Shelter)> = shelters
        .iter()
        .map(|shelter| (haversine_meters(origin, shelter.location), shelter))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, shelter)| shelter.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelter::ShelterKind;
    use crate::test_support::shelter_at;
    use rstest::rstest;

    const ORIGIN: Coord<f64> = Coord {
        x: 140.7257441,
        y: 41.775271,
    };

    fn ring(count: usize, radius_m: f64) -> Vec<Shelter> {
        (0..count)
            .map(|i| {
                // Spread eastward in one-metre steps so every shelter sits
                // at a distinct distance just past radius_m.
                let step = radius_m + i as f64;
                shelter_at(&format!("s{i}"), ShelterKind::Building, ORIGIN, 0.0, step)
            })
            .collect()
    }

    #[rstest]
    fn nothing_in_range_yields_empty_selection() {
        let index = ShelterIndex::new(vec![shelter_at(
            "Far",
            ShelterKind::Building,
            ORIGIN,
            1_200.0,
            0.0,
        )]);
        let selection = select_candidates(ORIGIN, &index);
        assert!(selection.is_empty());
        assert!(selection.note.is_none());
    }

    #[rstest]
    fn small_wide_tier_is_used_as_is() {
        // 10 within 700 m, only 3 of them within 500 m: under budget at the
        // wide tier, so no narrowing happens.
        let mut shelters = ring(3, 300.0);
        shelters.extend(ring(7, 600.0));
        let index = ShelterIndex::new(shelters);

        let selection = select_candidates(ORIGIN, &index);
        assert_eq!(selection.len(), 10);
        assert!(selection.note.is_none());
    }

    #[rstest]
    fn overflow_at_both_tiers_keeps_the_nearest_25() {
        // 30 shelters all within ~430 m: both tiers overflow.
        let index = ShelterIndex::new(ring(30, 400.0));

        let selection = select_candidates(ORIGIN, &index);
        assert_eq!(selection.len(), MAX_MATRIX_DESTINATIONS);
        assert_eq!(selection.note, Some(SelectionNote::UsingNearest25));
        // Nearest first: the 25 smallest offsets survive.
        let names: Vec<&str> = selection.shelters.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"s0"));
        assert!(!names.contains(&"s25"));
    }

    #[rstest]
    fn overflow_narrows_to_the_500m_tier() {
        // 30 within 700 m but only 8 within 500 m.
        let mut shelters = ring(8, 350.0);
        shelters.extend(ring(22, 620.0));
        let index = ShelterIndex::new(shelters);

        let selection = select_candidates(ORIGIN, &index);
        assert_eq!(selection.len(), 8);
        assert_eq!(selection.note, Some(SelectionNote::NarrowedTo500m));
    }

    #[rstest]
    fn overflow_with_empty_narrow_tier_cuts_the_wide_tier() {
        // 30 shelters between 500 m and 700 m: the narrow tier is empty.
        let index = ShelterIndex::new(ring(30, 560.0));

        let selection = select_candidates(ORIGIN, &index);
        assert_eq!(selection.len(), MAX_MATRIX_DESTINATIONS);
        assert_eq!(selection.note, Some(SelectionNote::UsingNearest25));
    }

    #[rstest]
    fn selection_is_deterministic() {
        let index = ShelterIndex::new(ring(30, 400.0));
        let first = select_candidates(ORIGIN, &index);
        let second = select_candidates(ORIGIN, &index);
        assert_eq!(first, second);
    }

    #[rstest]
    fn nearest_subset_keeps_feed_order_on_ties() {
        let shelters = vec![
            shelter_at("east", ShelterKind::Building, ORIGIN, 0.0, 200.0),
            shelter_at("west", ShelterKind::Building, ORIGIN, 0.0, -200.0),
            shelter_at("close", ShelterKind::Building, ORIGIN, 0.0, 50.0),
        ];
        let subset = nearest_subset(ORIGIN, &shelters, 2);
        let names: Vec<&str> = subset.iter().map(|s| s.name.as_str()).collect();
        // "east" and "west" tie at 200 m; the earlier entry wins the cut.
        assert_eq!(names, vec!["close", "east"]);
    }
}
