//! Localized status-line messages.
//!
//! The widget ships in Japanese and English; every user-visible message
//! funnels through [`Lang`] so the two catalogs cannot drift apart.
//! Operational log output stays English regardless.

use std::str::FromStr;

use thiserror::Error;

use crate::directions::DirectionsError;
use crate::location::LocationError;
use crate::resolve::{Resolution, ResolveError};
use crate::select::SelectionNote;

/// Display language for status-line messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lang {
    /// Japanese (the default).
    #[default]
    Ja,
    /// English.
    En,
}

/// Error from parsing a language tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language {0:?}; expected \"ja\" or \"en\"")]
pub struct LangParseError(pub String);

impl FromStr for Lang {
    type Err = LangParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if tag.eq_ignore_ascii_case("ja") {
            Ok(Self::Ja)
        } else if tag.eq_ignore_ascii_case("en") {
            Ok(Self::En)
        } else {
            Err(LangParseError(tag.to_owned()))
        }
    }
}

impl Lang {
    /// BCP 47 tag for the language, usable as a service request parameter.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Shown while the shelter feeds are still loading.
    #[must_use]
    pub fn loading(self) -> &'static str {
        match self {
            Self::Ja => "避難場所データを読み込み中…",
            Self::En => "Loading shelter data…",
        }
    }

    /// Shown once both feeds are merged and lookups are accepted.
    #[must_use]
    pub fn ready(self) -> &'static str {
        match self {
            Self::Ja => "準備完了。地図をタップして出発地点を設定してください。",
            Self::En => "Ready. Tap the map to set a start point.",
        }
    }

    /// No shelter lies within walking range of the chosen origin.
    #[must_use]
    pub fn no_shelters_nearby(self) -> &'static str {
        match self {
            Self::Ja => "700m以内に避難場所がありません。",
            Self::En => "No shelters within 700 m.",
        }
    }

    /// An action needed a start point before one was set.
    #[must_use]
    pub fn no_start_set(self) -> &'static str {
        match self {
            Self::Ja => "出発地点が未設定です。地図をタップするか「現在地から避難」を押してください。",
            Self::En => "No start point yet. Tap the map or press \u{201c}Evacuate from current location\u{201d}.",
        }
    }

    /// The external-map link needs both endpoints.
    #[must_use]
    pub fn need_start_and_destination(self) -> &'static str {
        match self {
            Self::Ja => "出発地点と目的地を設定してください。",
            Self::En => "Please set both your start point and destination.",
        }
    }

    /// Placeholder for an unknown walking duration.
    #[must_use]
    pub fn unknown_walk_time(self) -> &'static str {
        match self {
            Self::Ja => "徒歩時間不明",
            Self::En => "walk time unknown",
        }
    }

    /// Annotation for the fallback tier a candidate selection used.
    #[must_use]
    pub fn selection_note(self, note: SelectionNote) -> &'static str {
        match (self, note) {
            (Self::Ja, SelectionNote::NarrowedTo500m) => {
                "候補が多いため、500m以内に絞って探索しました。"
            }
            (Self::Ja, SelectionNote::UsingNearest25) => {
                "候補が多いため、近い25件に絞って探索しました。"
            }
            (Self::En, SelectionNote::NarrowedTo500m) => {
                "Too many candidates; narrowed to 500 m radius."
            }
            (Self::En, SelectionNote::UsingNearest25) => {
                "Too many candidates; using the nearest 25."
            }
        }
    }

    /// One-line summary of a resolved destination.
    #[must_use]
    pub fn summary(self, resolution: &Resolution) -> String {
        let name = &resolution.shelter.name;
        match resolution.distance_meters {
            Some(meters) => {
                let duration = resolution
                    .duration_text
                    .as_deref()
                    .unwrap_or_else(|| self.unknown_walk_time());
                match self {
                    Self::Ja => format!("{name}（{meters} m、約 {duration}）"),
                    Self::En => format!("{name} ({meters} m, about {duration})"),
                }
            }
            None => match self {
                Self::Ja => format!("{name}（距離不明）"),
                Self::En => format!("{name} (distance unknown)"),
            },
        }
    }

    /// Status line for a routing failure.
    #[must_use]
    pub fn routing_error_line(self, error: &ResolveError) -> String {
        match self {
            Self::Ja => format!("エラー: {error}"),
            Self::En => format!("Error: {error}"),
        }
    }

    /// Status line for a route-render failure, distinct from routing
    /// errors.
    #[must_use]
    pub fn directions_error_line(self, error: &DirectionsError) -> String {
        match self {
            Self::Ja => format!("経路描画エラー: {error}"),
            Self::En => format!("Directions error: {error}"),
        }
    }

    /// Status line for a location-provider failure.
    #[must_use]
    pub fn location_error_line(self, error: &LocationError) -> String {
        match self {
            Self::Ja => {
                let reason = match error {
                    LocationError::PermissionDenied => "位置情報の利用が許可されていません",
                    LocationError::Timeout => "タイムアウトしました",
                    LocationError::Unavailable { message } => message,
                };
                format!("現在地の取得に失敗しました: {reason}")
            }
            Self::En => format!("Failed to get current location: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelter::{Shelter, ShelterKind};
    use geo::Coord;
    use rstest::rstest;

    fn resolution(distance: Option<u32>, duration: Option<&str>) -> Resolution {
        Resolution {
            shelter: Shelter::new(
                "Pier 4 Mound",
                Coord { x: 140.72, y: 41.77 },
                ShelterKind::Horizontal,
            ),
            distance_meters: distance,
            duration_text: duration.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(Lang::Ja, "Pier 4 Mound（480 m、約 7 mins）")]
    #[case(Lang::En, "Pier 4 Mound (480 m, about 7 mins)")]
    fn summary_renders_distance_and_duration(#[case] lang: Lang, #[case] expected: &str) {
        assert_eq!(lang.summary(&resolution(Some(480), Some("7 mins"))), expected);
    }

    #[rstest]
    fn summary_substitutes_the_unknown_placeholder() {
        let text = Lang::En.summary(&resolution(Some(480), None));
        assert_eq!(text, "Pier 4 Mound (480 m, about walk time unknown)");
    }

    #[rstest]
    fn summary_without_figures_says_so() {
        assert_eq!(
            Lang::Ja.summary(&resolution(None, None)),
            "Pier 4 Mound（距離不明）"
        );
    }

    #[rstest]
    #[case("ja", Lang::Ja)]
    #[case("EN", Lang::En)]
    fn parses_language_tags(#[case] tag: &str, #[case] expected: Lang) {
        assert_eq!(tag.parse::<Lang>().expect("tag should parse"), expected);
    }

    #[rstest]
    fn rejects_unknown_language_tags() {
        assert!("fr".parse::<Lang>().is_err());
    }

    #[rstest]
    fn location_errors_localize_their_reason() {
        let line = Lang::Ja.location_error_line(&LocationError::PermissionDenied);
        assert!(line.contains("位置情報の利用が許可されていません"));
    }
}
