//! Search filter validation.
//!
//! Translates loosely-typed user filter input into a typed, bounded
//! [`SearchFilters`] set. The contract is best-effort, not strict-validating:
//! unrecognized or out-of-range values are logged and dropped, never
//! rejected, so the validator always returns a usable (possibly empty)
//! filter set and search degrades gracefully to "no constraint".

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Bounds and constants
// ---------------------------------------------------------------------------

/// Minimum title length (after trim) for a title filter to apply.
pub const MIN_TITLE_LEN: usize = 2;

/// Maximum title length; longer input is truncated.
pub const MAX_TITLE_LEN: usize = 100;

/// Accepted rating filter range.
///
/// NOTE: the stored rating is on a 0-10 scale while the filter bound is 0-5,
/// so the filter can never select movies rated above 5. This mirrors the
/// behaviour observed in production and is pending product clarification;
/// do not widen the bound without a decision.
pub const RATING_FILTER_MIN: f64 = 0.0;
pub const RATING_FILTER_MAX: f64 = 5.0;

/// Accepted release-year filter range.
pub const YEAR_MIN: i32 = 1800;
pub const YEAR_MAX: i32 = 2030;

/// Reference year separating released from upcoming movies.
///
/// A fixed constant rather than wall-clock derived, so it goes stale; kept
/// as-is to preserve query semantics against the frozen dataset.
pub const UPCOMING_CUTOFF_YEAR: i32 = 2023;

/// Runtime threshold (minutes) used as a proxy for the `tvmovie` filter.
/// This is a duration heuristic, not a genuine "is TV movie" flag.
pub const TVMOVIE_MINUTE_THRESHOLD: i32 = 200;

/// Minimum suggestion query length (after trim).
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Maximum suggestion query length; longer input is truncated.
pub const MAX_SUGGESTION_QUERY_LEN: usize = 50;

/// Default number of typeahead suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: i64 = 5;

/// Maximum number of typeahead suggestions.
pub const MAX_SUGGESTION_LIMIT: i64 = 20;

/// Localized genre name -> canonical genre tag as stored in the database.
/// Lookup is lower-cased; unknown names are dropped.
const GENRE_TRANSLATIONS: &[(&str, &str)] = &[
    ("commedia", "Comedy"),
    ("avventura", "Adventure"),
    ("thriller", "Thriller"),
    ("dramma", "Drama"),
    ("fantascienza", "Science Fiction"),
    ("azione", "Action"),
    ("musica", "Music"),
    ("romantico", "Romance"),
    ("storico", "History"),
    ("crimine", "Crime"),
    ("animazione", "Animation"),
    ("mistero", "Mystery"),
    ("horror", "Horror"),
    ("famiglia", "Family"),
    ("fantasy", "Fantasy"),
    ("guerra", "War"),
    ("western", "Western"),
    ("film tv", "TV Movie"),
    ("documentario", "Documentary"),
];

/// Translate a localized genre token to its canonical database tag.
pub fn map_genre(token: &str) -> Option<&'static str> {
    let token = token.trim().to_lowercase();
    GENRE_TRANSLATIONS
        .iter()
        .find(|(localized, _)| *localized == token)
        .map(|(_, canonical)| *canonical)
}

// ---------------------------------------------------------------------------
// Sort options
// ---------------------------------------------------------------------------

/// Sort strategy for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Date descending, then rating descending (nulls last).
    #[default]
    Base,
    Rating,
    Date,
    Name,
    Duration,
    /// Arbitrary per-query order; pagination is NOT stable across requests.
    Random,
}

impl SortBy {
    /// Parse a raw sort option, falling back to [`SortBy::Base`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("base") => Self::Base,
            Some("rating") => Self::Rating,
            Some("date") => Self::Date,
            Some("name") => Self::Name,
            Some("duration") => Self::Duration,
            Some("random") => Self::Random,
            Some(other) => {
                tracing::debug!(sort_by = other, "Unrecognized sort option, using default");
                Self::Base
            }
            None => Self::Base,
        }
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a raw order option, falling back to [`SortOrder::Desc`].
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => Self::Asc,
            Some("desc") => Self::Desc,
            Some(other) => {
                tracing::debug!(order_by = other, "Unrecognized order option, using default");
                Self::Desc
            }
            None => Self::Desc,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Raw search parameters as they arrive on the query string.
///
/// Every field is an optional string so deserialization can never fail on
/// malformed input; typing and bounds-checking happen in
/// [`SearchFilters::from_raw`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
    pub title: Option<String>,
    pub min_rating: Option<String>,
    pub max_rating: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub min_duration: Option<String>,
    pub max_duration: Option<String>,
    /// Repeatable query parameter (`?genre=azione&genre=horror`).
    #[serde(default)]
    pub genre: Vec<String>,
    pub upcoming: Option<String>,
    pub tvmovie: Option<String>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated filter set
// ---------------------------------------------------------------------------

/// Validated, bounded search filters. Absent fields mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_from: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_to: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<i32>,
    /// Canonical genre tags; every requested genre must match (AND).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    /// Tri-state: `None` means the parameter was absent or unparseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upcoming: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvmovie: Option<bool>,
    pub sort_by: SortBy,
    pub order_by: SortOrder,
}

impl SearchFilters {
    /// Validate and normalize raw query input into a typed filter set.
    ///
    /// Each field is handled independently; a field that fails to parse or
    /// falls outside its bound is dropped (logged at debug level), never
    /// rejected.
    pub fn from_raw(raw: &RawSearchParams) -> Self {
        Self {
            title: clean_title(raw.title.as_deref()),
            min_rating: parse_bounded_f64(
                raw.min_rating.as_deref(),
                "min_rating",
                RATING_FILTER_MIN,
                RATING_FILTER_MAX,
            ),
            max_rating: parse_bounded_f64(
                raw.max_rating.as_deref(),
                "max_rating",
                RATING_FILTER_MIN,
                RATING_FILTER_MAX,
            ),
            year_from: parse_bounded_i32(raw.year_from.as_deref(), "year_from", YEAR_MIN, YEAR_MAX),
            year_to: parse_bounded_i32(raw.year_to.as_deref(), "year_to", YEAR_MIN, YEAR_MAX),
            min_duration: parse_positive_i32(raw.min_duration.as_deref(), "min_duration"),
            max_duration: parse_positive_i32(raw.max_duration.as_deref(), "max_duration"),
            genres: map_genres(&raw.genre),
            upcoming: parse_tristate(raw.upcoming.as_deref(), "upcoming"),
            tvmovie: parse_tristate(raw.tvmovie.as_deref(), "tvmovie"),
            sort_by: SortBy::from_raw(raw.sort_by.as_deref()),
            order_by: SortOrder::from_raw(raw.order_by.as_deref()),
        }
    }
}

/// Normalize a typeahead query: trim, require at least
/// [`MIN_SUGGESTION_QUERY_LEN`] chars, truncate to
/// [`MAX_SUGGESTION_QUERY_LEN`]. `None` means "return no suggestions".
pub fn clean_suggestion_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return None;
    }
    Some(truncate_chars(trimmed, MAX_SUGGESTION_QUERY_LEN))
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Truncate a string to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn clean_title(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.chars().count() < MIN_TITLE_LEN {
        if !trimmed.is_empty() {
            tracing::debug!(title = trimmed, "Title filter too short, dropped");
        }
        return None;
    }
    Some(truncate_chars(trimmed, MAX_TITLE_LEN))
}

fn parse_bounded_f64(raw: Option<&str>, field: &str, min: f64, max: f64) -> Option<f64> {
    let raw = raw?.trim();
    match raw.parse::<f64>() {
        Ok(value) if (min..=max).contains(&value) => Some(value),
        Ok(value) => {
            tracing::debug!(field, value, "Filter value out of bound, dropped");
            None
        }
        Err(_) => {
            tracing::debug!(field, raw, "Unparseable filter value, dropped");
            None
        }
    }
}

fn parse_bounded_i32(raw: Option<&str>, field: &str, min: i32, max: i32) -> Option<i32> {
    let raw = raw?.trim();
    match raw.parse::<i32>() {
        Ok(value) if (min..=max).contains(&value) => Some(value),
        Ok(value) => {
            tracing::debug!(field, value, "Filter value out of bound, dropped");
            None
        }
        Err(_) => {
            tracing::debug!(field, raw, "Unparseable filter value, dropped");
            None
        }
    }
}

fn parse_positive_i32(raw: Option<&str>, field: &str) -> Option<i32> {
    let raw = raw?.trim();
    match raw.parse::<i32>() {
        Ok(value) if value > 0 => Some(value),
        Ok(value) => {
            tracing::debug!(field, value, "Non-positive filter value, dropped");
            None
        }
        Err(_) => {
            tracing::debug!(field, raw, "Unparseable filter value, dropped");
            None
        }
    }
}

/// Map localized genre tokens to canonical tags, dropping unknown names.
/// An empty result omits the whole filter (no constraint, not "match none").
fn map_genres(raw: &[String]) -> Option<Vec<String>> {
    let mapped: Vec<String> = raw
        .iter()
        .filter_map(|token| {
            let canonical = map_genre(token);
            if canonical.is_none() && !token.trim().is_empty() {
                tracing::debug!(genre = token.as_str(), "Unknown genre token, dropped");
            }
            canonical.map(str::to_string)
        })
        .collect();

    if mapped.is_empty() { None } else { Some(mapped) }
}

/// Accept only literal "true"/"false" (case-insensitive); anything else
/// leaves the filter unset.
fn parse_tristate(raw: Option<&str>, field: &str) -> Option<bool> {
    match raw?.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        other => {
            if !other.is_empty() {
                tracing::debug!(field, value = other, "Unrecognized boolean filter, unset");
            }
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawSearchParams {
        RawSearchParams::default()
    }

    // -- title ---------------------------------------------------------------

    #[test]
    fn title_trimmed_and_kept() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            title: Some("  Inception  ".to_string()),
            ..raw()
        });
        assert_eq!(filters.title.as_deref(), Some("Inception"));
    }

    #[test]
    fn title_shorter_than_two_chars_dropped() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            title: Some(" a ".to_string()),
            ..raw()
        });
        assert_eq!(filters.title, None);
    }

    #[test]
    fn title_truncated_to_hundred_chars() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            title: Some("x".repeat(250)),
            ..raw()
        });
        assert_eq!(filters.title.unwrap().chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn title_truncation_is_char_boundary_safe() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            title: Some("è".repeat(150)),
            ..raw()
        });
        assert_eq!(filters.title.unwrap().chars().count(), MAX_TITLE_LEN);
    }

    // -- rating --------------------------------------------------------------

    #[test]
    fn rating_in_bound_kept() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            min_rating: Some("3.5".to_string()),
            ..raw()
        });
        assert_eq!(filters.min_rating, Some(3.5));
    }

    #[test]
    fn rating_out_of_bound_dropped_not_rejected() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            min_rating: Some("999".to_string()),
            ..raw()
        });
        assert_eq!(filters.min_rating, None);
    }

    #[test]
    fn rating_unparseable_dropped() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            max_rating: Some("not-a-number".to_string()),
            ..raw()
        });
        assert_eq!(filters.max_rating, None);
    }

    // -- year ----------------------------------------------------------------

    #[test]
    fn year_bounds_enforced() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            year_from: Some("1799".to_string()),
            year_to: Some("2030".to_string()),
            ..raw()
        });
        assert_eq!(filters.year_from, None);
        assert_eq!(filters.year_to, Some(2030));
    }

    // -- duration ------------------------------------------------------------

    #[test]
    fn duration_must_be_positive() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            min_duration: Some("0".to_string()),
            max_duration: Some("120".to_string()),
            ..raw()
        });
        assert_eq!(filters.min_duration, None);
        assert_eq!(filters.max_duration, Some(120));
    }

    // -- genre ---------------------------------------------------------------

    #[test]
    fn genres_mapped_to_canonical_tags() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            genre: vec!["Azione".to_string(), "fantascienza".to_string()],
            ..raw()
        });
        assert_eq!(
            filters.genres,
            Some(vec!["Action".to_string(), "Science Fiction".to_string()])
        );
    }

    #[test]
    fn unknown_genres_dropped_silently() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            genre: vec!["azione".to_string(), "kung-fu".to_string()],
            ..raw()
        });
        assert_eq!(filters.genres, Some(vec!["Action".to_string()]));
    }

    #[test]
    fn all_unknown_genres_omit_whole_filter() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            genre: vec!["kung-fu".to_string()],
            ..raw()
        });
        assert_eq!(filters.genres, None);
    }

    #[test]
    fn multiword_genre_maps() {
        assert_eq!(map_genre("Film TV"), Some("TV Movie"));
    }

    // -- tri-state booleans ---------------------------------------------------

    #[test]
    fn boolean_filters_accept_literal_true_false_only() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            upcoming: Some("TRUE".to_string()),
            tvmovie: Some("yes".to_string()),
            ..raw()
        });
        assert_eq!(filters.upcoming, Some(true));
        assert_eq!(filters.tvmovie, None);
    }

    #[test]
    fn absent_boolean_stays_unset() {
        let filters = SearchFilters::from_raw(&raw());
        assert_eq!(filters.upcoming, None);
        assert_eq!(filters.tvmovie, None);
    }

    // -- sort ----------------------------------------------------------------

    #[test]
    fn sort_defaults_on_unrecognized_input() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            sort_by: Some("popularity".to_string()),
            order_by: Some("sideways".to_string()),
            ..raw()
        });
        assert_eq!(filters.sort_by, SortBy::Base);
        assert_eq!(filters.order_by, SortOrder::Desc);
    }

    #[test]
    fn sort_options_parsed() {
        assert_eq!(SortBy::from_raw(Some("rating")), SortBy::Rating);
        assert_eq!(SortBy::from_raw(Some("random")), SortBy::Random);
        assert_eq!(SortOrder::from_raw(Some("asc")), SortOrder::Asc);
    }

    // -- validator never errors ----------------------------------------------

    #[test]
    fn garbage_everywhere_yields_unconstrained_filters() {
        let filters = SearchFilters::from_raw(&RawSearchParams {
            title: Some("!".to_string()),
            min_rating: Some("abc".to_string()),
            max_rating: Some("-1".to_string()),
            year_from: Some("next year".to_string()),
            year_to: Some("99999".to_string()),
            min_duration: Some("-5".to_string()),
            max_duration: Some("".to_string()),
            genre: vec!["polka".to_string()],
            upcoming: Some("maybe".to_string()),
            tvmovie: Some("1".to_string()),
            sort_by: Some("??".to_string()),
            order_by: None,
            page: None,
            per_page: None,
        });
        assert_eq!(
            filters,
            SearchFilters {
                sort_by: SortBy::Base,
                order_by: SortOrder::Desc,
                ..SearchFilters::default()
            }
        );
    }

    // -- suggestion query ------------------------------------------------------

    #[test]
    fn suggestion_query_shorter_than_two_chars_rejected() {
        assert_eq!(clean_suggestion_query(" a "), None);
        assert_eq!(clean_suggestion_query(""), None);
    }

    #[test]
    fn suggestion_query_trimmed_and_truncated() {
        assert_eq!(clean_suggestion_query("  dune  ").as_deref(), Some("dune"));
        let long = "q".repeat(80);
        assert_eq!(
            clean_suggestion_query(&long).unwrap().chars().count(),
            MAX_SUGGESTION_QUERY_LEN
        );
    }
}
