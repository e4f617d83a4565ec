//! Movie entity rows and the assembled list/detail/suggestion shapes.
//!
//! Assembly is a pure transformation over eagerly-fetched rows: the
//! repository runs the queries, these functions do the grouping. Grouped
//! collections use insertion-ordered maps so the output preserves row order.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use sqlx::FromRow;

use cineteca_core::types::DbId;

// ---------------------------------------------------------------------------
// Row structs (straight off the database)
// ---------------------------------------------------------------------------

/// A full row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: DbId,
    pub name: String,
    pub date: Option<i32>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub minute: Option<i32>,
    pub rating: Option<f64>,
}

/// The lightweight movie columns loaded for search result pages.
#[derive(Debug, Clone, FromRow)]
pub struct MovieSummaryRow {
    pub id: DbId,
    pub name: String,
    pub date: Option<i32>,
    pub rating: Option<f64>,
    pub minute: Option<i32>,
}

/// The columns loaded for typeahead suggestions. Rating influences the SQL
/// ordering but is never selected.
#[derive(Debug, Clone, FromRow)]
pub struct SuggestionRow {
    pub id: DbId,
    pub name: String,
    pub date: Option<i32>,
}

/// An actor credit: one person in one role. The same actor may recur with
/// different roles in the same movie.
#[derive(Debug, Clone, FromRow)]
pub struct ActorRow {
    pub actor: String,
    pub role: Option<String>,
}

/// A crew credit. The same person may hold multiple roles.
#[derive(Debug, Clone, FromRow)]
pub struct CrewRow {
    pub role: Option<String>,
    pub name: String,
}

/// A language entry; `kind` discriminates spoken/subtitle/etc.
#[derive(Debug, Clone, FromRow)]
pub struct LanguageRow {
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub language: String,
}

/// A per-country release record.
#[derive(Debug, Clone, FromRow)]
pub struct ReleaseRow {
    pub country: Option<String>,
    pub date: Option<NaiveDate>,
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub rating: Option<String>,
}

/// An Oscar nomination or win linked to a movie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OscarRow {
    pub year_film: Option<i32>,
    pub year_ceremony: Option<i32>,
    pub ceremony: Option<i32>,
    pub category: String,
    pub name: String,
    pub winner: bool,
}

/// All child collections of one movie, eagerly fetched.
#[derive(Debug, Clone, Default)]
pub struct MovieChildren {
    pub actors: Vec<ActorRow>,
    pub crews: Vec<CrewRow>,
    pub languages: Vec<LanguageRow>,
    pub posters: Vec<String>,
    pub releases: Vec<ReleaseRow>,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub themes: Vec<String>,
    pub countries: Vec<String>,
    pub oscars: Vec<OscarRow>,
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

/// A compact search result entry.
#[derive(Debug, Clone, Serialize)]
pub struct MovieListItem {
    pub id: DbId,
    pub name: String,
    pub date: Option<i32>,
    pub rating: Option<f64>,
    pub minute: Option<i32>,
    pub poster_url: Option<String>,
    pub genres: Vec<String>,
}

impl MovieListItem {
    /// Build a list entry from a summary row plus its decoration
    /// (genre tags and canonical poster, fetched separately).
    pub fn assemble(
        row: MovieSummaryRow,
        genres: Vec<String>,
        poster_url: Option<String>,
    ) -> Self {
        Self {
            id: row.id,
            name: row.name,
            date: row.date,
            rating: row.rating,
            minute: row.minute,
            poster_url,
            genres,
        }
    }
}

// ---------------------------------------------------------------------------
// Suggestion view
// ---------------------------------------------------------------------------

/// A typeahead suggestion. Deliberately minimal: no genres, no rating.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub id: DbId,
    pub name: String,
    pub date: Option<i32>,
    pub poster_url: Option<String>,
}

impl Suggestion {
    pub fn assemble(row: SuggestionRow, poster_url: Option<String>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            date: row.date,
            poster_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

/// The canonical poster reference. `alt` is populated even when no poster
/// exists so the UI always has a caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterInfo {
    pub url: Option<String>,
    pub alt: String,
}

/// Rating and distribution type of one release. Missing values become
/// empty strings rather than nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    pub rating: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The fully aggregated movie document.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    pub id: DbId,
    pub name: String,
    pub date: Option<i32>,
    pub rating: Option<f64>,
    pub minute: Option<i32>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub poster: PosterInfo,
    /// Role -> actor names sharing that role. NULL roles group under "".
    pub actors: IndexMap<String, Vec<String>>,
    /// Role -> crew member names. NULL roles group under "".
    pub crews: IndexMap<String, Vec<String>>,
    /// Language type -> language names. NULL types group under "".
    pub languages: IndexMap<String, Vec<String>>,
    /// Country -> ISO-8601 date -> release info. Duplicate (country, date)
    /// pairs are not deduplicated; the last row wins.
    pub releases: IndexMap<String, IndexMap<String, ReleaseInfo>>,
    pub genres: Vec<String>,
    pub studios: Vec<String>,
    pub themes: Vec<String>,
    pub countries: Vec<String>,
    pub oscars: Vec<OscarRow>,
}

impl MovieDetail {
    /// Collapse one movie row and its ten child collections into a single
    /// nested document. Pure and deterministic: row order in, key order out.
    pub fn assemble(movie: MovieRow, children: MovieChildren) -> Self {
        let poster = PosterInfo {
            url: children.posters.first().cloned(),
            alt: format!("Poster di {}", movie.name),
        };

        let mut actors: IndexMap<String, Vec<String>> = IndexMap::new();
        for credit in children.actors {
            actors
                .entry(credit.role.unwrap_or_default())
                .or_default()
                .push(credit.actor);
        }

        let mut crews: IndexMap<String, Vec<String>> = IndexMap::new();
        for credit in children.crews {
            crews
                .entry(credit.role.unwrap_or_default())
                .or_default()
                .push(credit.name);
        }

        let mut languages: IndexMap<String, Vec<String>> = IndexMap::new();
        for lang in children.languages {
            languages
                .entry(lang.kind.unwrap_or_default())
                .or_default()
                .push(lang.language);
        }

        let mut releases: IndexMap<String, IndexMap<String, ReleaseInfo>> = IndexMap::new();
        for release in children.releases {
            // A release without a date cannot be keyed; skip it.
            let Some(date) = release.date else {
                continue;
            };
            releases
                .entry(release.country.unwrap_or_default())
                .or_default()
                .insert(
                    date.format("%Y-%m-%d").to_string(),
                    ReleaseInfo {
                        rating: release.rating.unwrap_or_default(),
                        kind: release.kind.unwrap_or_default(),
                    },
                );
        }

        Self {
            id: movie.id,
            name: movie.name,
            date: movie.date,
            rating: movie.rating,
            minute: movie.minute,
            tagline: movie.tagline,
            description: movie.description,
            poster,
            actors,
            crews,
            languages,
            releases,
            genres: children.genres,
            studios: children.studios,
            themes: children.themes,
            countries: children.countries,
            oscars: children.oscars,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
