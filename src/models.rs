use sea_orm::sea_query::Order;
use serde::Deserialize;

use crate::entities::movie;

pub type Movie = movie::Model;

/// Candidate record submitted for create or update, before validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieInput {
    pub id: Option<i32>,
    pub title: String,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub runtime_mins: Option<i32>,
    pub rating: Option<i32>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub is_top_pick: bool,
}

/// A candidate that passed validation. Carries no id; the store assigns one
/// on insert and the caller supplies one on replace.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub director: Option<String>,
    pub year: i32,
    pub genre: Option<String>,
    pub runtime_mins: i32,
    pub rating: i32,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub is_top_pick: bool,
}

impl NewMovie {
    pub fn with_id(self, id: i32) -> Movie {
        Movie {
            id,
            title: self.title,
            director: self.director,
            year: self.year,
            genre: self.genre,
            runtime_mins: self.runtime_mins,
            rating: self.rating,
            description: self.description,
            poster_url: self.poster_url,
            is_top_pick: self.is_top_pick,
        }
    }
}

/// Raw urlencoded movie form. Every field stays a string so a rejected
/// submission can be rendered back exactly as typed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub runtime_mins: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster_url: String,
    pub is_top_pick: Option<String>,
}

impl MovieForm {
    pub fn to_input(&self) -> MovieInput {
        MovieInput {
            id: parse_int(&self.id),
            title: self.title.trim().to_string(),
            director: non_empty(&self.director),
            year: parse_int(&self.year),
            genre: non_empty(&self.genre),
            runtime_mins: parse_int(&self.runtime_mins),
            rating: parse_int(&self.rating),
            description: non_empty(&self.description),
            poster_url: non_empty(&self.poster_url),
            is_top_pick: self.is_top_pick.as_deref().is_some_and(|v| v != "false"),
        }
    }
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            director: movie.director.clone().unwrap_or_default(),
            year: movie.year.to_string(),
            genre: movie.genre.clone().unwrap_or_default(),
            runtime_mins: movie.runtime_mins.to_string(),
            rating: movie.rating.to_string(),
            description: movie.description.clone().unwrap_or_default(),
            poster_url: movie.poster_url.clone().unwrap_or_default(),
            is_top_pick: movie.is_top_pick.then(|| "true".to_string()),
        }
    }
}

/// Optional listing filters, AND-combined. Values are taken as given;
/// trimming and case folding happen when the predicate is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub rating_min: Option<i32>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortKey {
    Title,
    Year,
    #[default]
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Title, SortKey::Year, SortKey::Rating];

    /// Case-insensitive; anything unrecognized falls back to `Rating`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("title") => SortKey::Title,
            Some("year") => SortKey::Year,
            _ => SortKey::Rating,
        }
    }

    pub fn column(self) -> movie::Column {
        match self {
            SortKey::Title => movie::Column::Title,
            SortKey::Year => movie::Column::Year,
            SortKey::Rating => movie::Column::Rating,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Year => "year",
            SortKey::Rating => "rating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Year => "Year",
            SortKey::Rating => "Rating",
        }
    }
}

/// Listing direction. `Desc` is the single default: it applies when the
/// parameter is missing and when it holds anything other than asc/desc.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::default(),
        }
    }

    pub fn order(self) -> Order {
        match self {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

#[derive(Clone, Debug)]
pub struct MovieListing {
    pub movies: Vec<Movie>,
    pub genre_options: Vec<String>,
    pub year_options: Vec<i32>,
}

/// Wraps a string for a LIKE comparison as a literal substring match.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_falls_back_to_rating() {
        assert_eq!(SortKey::parse(Some("title")), SortKey::Title);
        assert_eq!(SortKey::parse(Some("YEAR")), SortKey::Year);
        assert_eq!(SortKey::parse(Some("rating")), SortKey::Rating);
        assert_eq!(SortKey::parse(Some("runtime")), SortKey::Rating);
        assert_eq!(SortKey::parse(Some("")), SortKey::Rating);
        assert_eq!(SortKey::parse(None), SortKey::Rating);
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some(" ASC ")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("Desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Nolan"), "%Nolan%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn form_normalizes_text_and_numbers() {
        let form = MovieForm {
            id: "7".to_string(),
            title: "  Heat  ".to_string(),
            director: "   ".to_string(),
            year: "1995".to_string(),
            genre: " Crime ".to_string(),
            runtime_mins: "abc".to_string(),
            rating: "".to_string(),
            is_top_pick: Some("true".to_string()),
            ..Default::default()
        };

        let input = form.to_input();
        assert_eq!(input.id, Some(7));
        assert_eq!(input.title, "Heat");
        assert_eq!(input.director, None);
        assert_eq!(input.year, Some(1995));
        assert_eq!(input.genre.as_deref(), Some("Crime"));
        assert_eq!(input.runtime_mins, None);
        assert_eq!(input.rating, None);
        assert!(input.is_top_pick);
    }

    #[test]
    fn unchecked_top_pick_is_false() {
        let form = MovieForm::default();
        assert!(!form.to_input().is_top_pick);

        let form = MovieForm { is_top_pick: Some("false".to_string()), ..Default::default() };
        assert!(!form.to_input().is_top_pick);
    }
}
