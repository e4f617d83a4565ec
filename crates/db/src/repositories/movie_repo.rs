//! Repository for the movie catalog: filtered search, detail aggregation,
//! and typeahead suggestions.
//!
//! The search planner's central invariant: the total count is computed
//! against the predicate set BEFORE any one-to-many decoration touches the
//! row set, so join fan-out can never inflate `total_count`. Decoration
//! (genre tags, canonical poster) happens afterwards via batched queries
//! keyed by the page's movie ids.

use std::collections::HashMap;

use sqlx::PgPool;

use cineteca_core::filters::{
    clean_suggestion_query, SearchFilters, SortBy, SortOrder, DEFAULT_SUGGESTION_LIMIT,
    MAX_SUGGESTION_LIMIT, TVMOVIE_MINUTE_THRESHOLD, UPCOMING_CUTOFF_YEAR,
};
use cineteca_core::types::DbId;

use crate::models::movie::{
    ActorRow, CrewRow, LanguageRow, MovieChildren, MovieDetail, MovieListItem, MovieRow,
    MovieSummaryRow, OscarRow, ReleaseRow, Suggestion, SuggestionRow,
};

/// Data-quality guard applied to every query: movies without a usable name
/// are invisible to the whole API.
const NAME_GUARD: &str = "m.name IS NOT NULL AND m.name <> ''";

/// Column list for detail/summary queries against `movies`.
const MOVIE_COLUMNS: &str = "m.id, m.name, m.date, m.tagline, m.description, m.minute, m.rating";

/// Provides read operations over the movie catalog.
pub struct MovieRepo;

impl MovieRepo {
    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Execute a filtered, sorted, paginated search.
    ///
    /// Returns the page of assembled list items and the total number of
    /// movies matching the predicates. An empty page is a normal result,
    /// not an error.
    pub async fn search(
        pool: &PgPool,
        filters: &SearchFilters,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<MovieListItem>, i64), sqlx::Error> {
        // Saturating: an absurd page number must yield an empty page, not
        // an arithmetic overflow.
        let offset = page.saturating_sub(1).saturating_mul(per_page);

        // Build dynamic WHERE clauses with positional binds.
        let mut conditions: Vec<String> = vec![NAME_GUARD.to_string()];
        let mut bind_idx = 1u32;

        if filters.title.is_some() {
            conditions.push(format!("m.name ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.min_rating.is_some() {
            conditions.push(format!("m.rating >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.max_rating.is_some() {
            conditions.push(format!("m.rating <= ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.year_from.is_some() {
            conditions.push(format!("m.date >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.year_to.is_some() {
            conditions.push(format!("m.date <= ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.min_duration.is_some() {
            conditions.push(format!("m.minute >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.max_duration.is_some() {
            conditions.push(format!("m.minute <= ${bind_idx}"));
            bind_idx += 1;
        }
        // One EXISTS per requested genre: AND semantics, and no fan-out into
        // the counted row set.
        if let Some(genres) = &filters.genres {
            for _ in genres {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM genres g \
                     WHERE g.id_movie = m.id AND g.genre = ${bind_idx})"
                ));
                bind_idx += 1;
            }
        }
        // Unset collapses to the <= branch: the released/feature-length
        // side always applies unless explicitly asked for the other.
        match filters.upcoming {
            Some(true) => conditions.push(format!("m.date >= {UPCOMING_CUTOFF_YEAR}")),
            _ => conditions.push(format!("m.date <= {UPCOMING_CUTOFF_YEAR}")),
        }
        match filters.tvmovie {
            Some(true) => conditions.push(format!("m.minute >= {TVMOVIE_MINUTE_THRESHOLD}")),
            _ => conditions.push(format!("m.minute <= {TVMOVIE_MINUTE_THRESHOLD}")),
        }

        let where_clause = conditions.join(" AND ");
        tracing::debug!(predicates = conditions.len(), page, per_page, "Executing movie search");

        // Total count over the bare predicate set, before any decoration.
        let count_sql = format!("SELECT COUNT(*) FROM movies m WHERE {where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        count_query = bind_filter_params_scalar(count_query, filters);
        let total_count = count_query.fetch_one(pool).await?;

        // Page of summary rows.
        let order_clause = order_clause(filters.sort_by, filters.order_by);
        let page_sql = format!(
            "SELECT m.id, m.name, m.date, m.rating, m.minute \
             FROM movies m \
             WHERE {where_clause} \
             {order_clause} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );
        let mut page_query = sqlx::query_as::<_, MovieSummaryRow>(&page_sql);
        page_query = bind_filter_params(page_query, filters);
        let rows = page_query.bind(per_page).bind(offset).fetch_all(pool).await?;

        // Decorate the page with genre tags and the canonical poster.
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut genres = Self::genres_by_movie(pool, &ids).await?;
        let mut posters = Self::first_poster_by_movie(pool, &ids).await?;

        let movies = rows
            .into_iter()
            .map(|row| {
                let tags = genres.remove(&row.id).unwrap_or_default();
                let poster = posters.remove(&row.id);
                MovieListItem::assemble(row, tags, poster)
            })
            .collect();

        Ok((movies, total_count))
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    /// Fetch one movie with all child collections and assemble the nested
    /// detail document. Returns `Ok(None)` when the id has no name-valid row.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<MovieDetail>, sqlx::Error> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies m WHERE m.id = $1 AND {NAME_GUARD}");
        let movie = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        let Some(movie) = movie else {
            return Ok(None);
        };

        // Eager, explicit child fetches; `ORDER BY id` keeps grouping output
        // deterministic in ingestion order.
        let actors = sqlx::query_as::<_, ActorRow>(
            "SELECT actor, role FROM actors WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let crews = sqlx::query_as::<_, CrewRow>(
            "SELECT role, name FROM crews WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let languages = sqlx::query_as::<_, LanguageRow>(
            "SELECT type, language FROM languages WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let posters = sqlx::query_scalar::<_, String>(
            "SELECT link FROM posters WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let releases = sqlx::query_as::<_, ReleaseRow>(
            "SELECT country, date, type, rating FROM releases WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let genres = sqlx::query_scalar::<_, String>(
            "SELECT genre FROM genres WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let studios = sqlx::query_scalar::<_, String>(
            "SELECT studio FROM studios WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let themes = sqlx::query_scalar::<_, String>(
            "SELECT theme FROM themes WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let countries = sqlx::query_scalar::<_, String>(
            "SELECT country FROM countries WHERE id_movie = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let oscars = sqlx::query_as::<_, OscarRow>(
            "SELECT year_film, year_ceremony, ceremony, category, name, winner \
             FROM oscars WHERE id_movie = $1 ORDER BY year_ceremony, id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let children = MovieChildren {
            actors,
            crews,
            languages,
            posters,
            releases,
            genres,
            studios,
            themes,
            countries,
            oscars,
        };

        Ok(Some(MovieDetail::assemble(movie, children)))
    }

    // -----------------------------------------------------------------------
    // Suggestions
    // -----------------------------------------------------------------------

    /// Typeahead lookup over movie titles.
    ///
    /// A trimmed query shorter than 2 characters returns an empty list
    /// immediately. Ordering is fixed: rating descending (nulls last),
    /// then name ascending.
    pub async fn suggestions(
        pool: &PgPool,
        query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Suggestion>, sqlx::Error> {
        let Some(cleaned) = clean_suggestion_query(query) else {
            return Ok(Vec::new());
        };
        let limit = limit
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
            .max(1)
            .min(MAX_SUGGESTION_LIMIT);

        let sql = format!(
            "SELECT m.id, m.name, m.date \
             FROM movies m \
             WHERE m.name ILIKE $1 AND {NAME_GUARD} \
             ORDER BY m.rating DESC NULLS LAST, m.name ASC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, SuggestionRow>(&sql)
            .bind(format!("%{cleaned}%"))
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut posters = Self::first_poster_by_movie(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let poster = posters.remove(&row.id);
                Suggestion::assemble(row, poster)
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Batched decoration helpers
    // -----------------------------------------------------------------------

    /// Genre tags for a batch of movies, grouped by movie id.
    async fn genres_by_movie(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<String>>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT id_movie, genre FROM genres WHERE id_movie = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<String>> = HashMap::new();
        for (movie_id, genre) in rows {
            grouped.entry(movie_id).or_default().push(genre);
        }
        Ok(grouped)
    }

    /// The canonical (first) poster link for a batch of movies.
    async fn first_poster_by_movie(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, String>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(DbId, String)> = sqlx::query_as(
            "SELECT DISTINCT ON (id_movie) id_movie, link \
             FROM posters WHERE id_movie = ANY($1) \
             ORDER BY id_movie, id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Translate the validated sort options into an ORDER BY clause.
///
/// `Random` yields an arbitrary per-query order: pagination is NOT stable
/// across requests in that mode. NULLS LAST applies in both directions for
/// column sorts.
fn order_clause(sort_by: SortBy, order: SortOrder) -> String {
    let dir = match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    match sort_by {
        SortBy::Random => "ORDER BY RANDOM()".to_string(),
        SortBy::Rating => format!("ORDER BY m.rating {dir} NULLS LAST"),
        SortBy::Date => format!("ORDER BY m.date {dir} NULLS LAST"),
        SortBy::Name => format!("ORDER BY m.name {dir} NULLS LAST"),
        SortBy::Duration => format!("ORDER BY m.minute {dir} NULLS LAST"),
        SortBy::Base => "ORDER BY m.date DESC NULLS LAST, m.rating DESC NULLS LAST".to_string(),
    }
}

/// Bind the present filter fields, in condition order, onto a row query.
fn bind_filter_params<'q, O>(
    mut query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    filters: &'q SearchFilters,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    if let Some(title) = &filters.title {
        query = query.bind(format!("%{title}%"));
    }
    if let Some(min_rating) = filters.min_rating {
        query = query.bind(min_rating);
    }
    if let Some(max_rating) = filters.max_rating {
        query = query.bind(max_rating);
    }
    if let Some(year_from) = filters.year_from {
        query = query.bind(year_from);
    }
    if let Some(year_to) = filters.year_to {
        query = query.bind(year_to);
    }
    if let Some(min_duration) = filters.min_duration {
        query = query.bind(min_duration);
    }
    if let Some(max_duration) = filters.max_duration {
        query = query.bind(max_duration);
    }
    if let Some(genres) = &filters.genres {
        for genre in genres {
            query = query.bind(genre.as_str());
        }
    }
    query
}

/// Same bind sequence for scalar (COUNT) queries.
fn bind_filter_params_scalar<'q, O>(
    mut query: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    filters: &'q SearchFilters,
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    if let Some(title) = &filters.title {
        query = query.bind(format!("%{title}%"));
    }
    if let Some(min_rating) = filters.min_rating {
        query = query.bind(min_rating);
    }
    if let Some(max_rating) = filters.max_rating {
        query = query.bind(max_rating);
    }
    if let Some(year_from) = filters.year_from {
        query = query.bind(year_from);
    }
    if let Some(year_to) = filters.year_to {
        query = query.bind(year_to);
    }
    if let Some(min_duration) = filters.min_duration {
        query = query.bind(min_duration);
    }
    if let Some(max_duration) = filters.max_duration {
        query = query.bind(max_duration);
    }
    if let Some(genres) = &filters.genres {
        for genre in genres {
            query = query.bind(genre.as_str());
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_sort_is_date_then_rating_descending() {
        assert_eq!(
            order_clause(SortBy::Base, SortOrder::Desc),
            "ORDER BY m.date DESC NULLS LAST, m.rating DESC NULLS LAST"
        );
    }

    #[test]
    fn column_sorts_honor_direction_with_nulls_last() {
        assert_eq!(
            order_clause(SortBy::Rating, SortOrder::Asc),
            "ORDER BY m.rating ASC NULLS LAST"
        );
        assert_eq!(
            order_clause(SortBy::Duration, SortOrder::Desc),
            "ORDER BY m.minute DESC NULLS LAST"
        );
    }

    #[test]
    fn random_sort_ignores_direction() {
        assert_eq!(
            order_clause(SortBy::Random, SortOrder::Asc),
            "ORDER BY RANDOM()"
        );
    }
}
