use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr, Order},
};
use tracing::debug;

use crate::{
    entities::movie,
    error::AppResult,
    models::{ListFilters, Movie, MovieListing, SortSpec, contains_pattern},
    store::{MovieQuery, MovieStore},
};

pub const TOP_PICKS_LIMIT: u64 = 12;

/// Filtered, single-key sorted listing plus the genre and year option lists.
/// The option lists always cover the whole catalog, whatever the filters.
pub async fn list_movies(
    store: &dyn MovieStore,
    filters: &ListFilters,
    sort: SortSpec,
) -> AppResult<MovieListing> {
    let genre_options = store.distinct_genres().await?;
    let year_options = store.distinct_years().await?;

    let query = MovieQuery::new(filter_condition(filters))
        .order_by(sort.key.column(), sort.direction.order());
    let movies = store.find_all(query).await?;

    debug!(
        count = movies.len(),
        sort = sort.key.as_str(),
        dir = sort.direction.as_str(),
        "listed movies"
    );

    Ok(MovieListing { movies, genre_options, year_options })
}

/// Flagged movies by rating, ties broken by title, capped at
/// `TOP_PICKS_LIMIT`.
pub async fn top_picks(store: &dyn MovieStore) -> AppResult<Vec<Movie>> {
    let query = MovieQuery::new(Condition::all().add(movie::Column::IsTopPick.eq(true)))
        .order_by(movie::Column::Rating, Order::Desc)
        .order_by(movie::Column::Title, Order::Asc)
        .limit(TOP_PICKS_LIMIT);

    let picks = store.find_all(query).await?;
    debug!(count = picks.len(), "selected top picks");
    Ok(picks)
}

/// Every non-empty genre in the catalog, each a ready-made listing filter.
pub async fn genre_index(store: &dyn MovieStore) -> AppResult<Vec<String>> {
    let genres = store.distinct_genres().await?;
    debug!(count = genres.len(), "listed genres");
    Ok(genres)
}

pub fn filter_condition(filters: &ListFilters) -> Condition {
    let mut condition = Condition::all();

    if let Some(text) = trimmed(filters.search.as_deref()) {
        let pattern = LikeExpr::new(contains_pattern(text)).escape('\\');
        condition = condition.add(
            Condition::any()
                .add(movie::Column::Title.like(pattern.clone()))
                .add(movie::Column::Director.like(pattern)),
        );
    }

    if let Some(genre) = trimmed(filters.genre.as_deref()) {
        // SQLite's LOWER folds ASCII only; fold the value the same way.
        let genre = genre.to_ascii_lowercase();
        condition = condition
            .add(Expr::expr(Func::lower(Expr::col((movie::Entity, movie::Column::Genre)))).eq(genre));
    }

    if let Some(year) = filters.year {
        condition = condition.add(movie::Column::Year.eq(year));
    }

    if let Some(rating_min) = filters.rating_min {
        condition = condition.add(movie::Column::Rating.gte(rating_min));
    }

    condition
}

fn trimmed(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    use super::*;

    fn sql_for(filters: &ListFilters) -> String {
        movie::Entity::find().filter(filter_condition(filters)).build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn no_filters_no_where_clause() {
        assert!(!sql_for(&ListFilters::default()).contains("WHERE"));
    }

    #[test]
    fn blank_text_filters_are_ignored() {
        let filters = ListFilters {
            search: Some("   ".to_string()),
            genre: Some("".to_string()),
            ..Default::default()
        };
        assert!(!sql_for(&filters).contains("WHERE"));
    }

    #[test]
    fn search_matches_title_or_director() {
        let sql = sql_for(&ListFilters { search: Some("  Nolan ".to_string()), ..Default::default() });
        assert!(sql.contains(r#""movies"."title" LIKE '%Nolan%'"#), "{sql}");
        assert!(sql.contains(r#""movies"."director" LIKE '%Nolan%'"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
    }

    #[test]
    fn genre_is_compared_lowercased() {
        let sql = sql_for(&ListFilters { genre: Some(" Drama ".to_string()), ..Default::default() });
        assert!(sql.contains(r#"LOWER("movies"."genre") = 'drama'"#), "{sql}");
    }

    #[test]
    fn genre_folding_leaves_non_ascii_alone() {
        let sql = sql_for(&ListFilters { genre: Some("Émotion".to_string()), ..Default::default() });
        assert!(sql.contains(r#"LOWER("movies"."genre") = 'Émotion'"#), "{sql}");
    }

    #[test]
    fn numeric_filters_combine_with_and() {
        let sql = sql_for(&ListFilters { year: Some(1999), rating_min: Some(8), ..Default::default() });
        assert!(sql.contains(r#""movies"."year" = 1999"#), "{sql}");
        assert!(sql.contains(r#""movies"."rating" >= 8"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }
}
