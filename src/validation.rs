use std::fmt;

use crate::models::{MovieInput, NewMovie};

pub const TITLE_MAX: usize = 120;
pub const DIRECTOR_MAX: usize = 80;
pub const GENRE_MAX: usize = 40;
pub const DESCRIPTION_MAX: usize = 1000;
pub const POSTER_URL_MAX: usize = 300;
pub const YEAR_RANGE: (i32, i32) = (1900, 2100);
pub const RUNTIME_RANGE: (i32, i32) = (1, 500);
pub const RATING_RANGE: (i32, i32) = (1, 10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint a candidate violated, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> {
        self.errors.iter().filter(move |e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

pub fn validate_movie(input: &MovieInput) -> Result<NewMovie, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if input.title.trim().is_empty() {
        errors.push("title", "Title is required");
    }
    check_len(&mut errors, "title", "Title", Some(input.title.as_str()), TITLE_MAX);
    check_len(&mut errors, "director", "Director", input.director.as_deref(), DIRECTOR_MAX);
    let year = check_range(&mut errors, "year", "Year", input.year, YEAR_RANGE);
    check_len(&mut errors, "genre", "Genre", input.genre.as_deref(), GENRE_MAX);
    let runtime_mins =
        check_range(&mut errors, "runtime_mins", "Runtime (mins)", input.runtime_mins, RUNTIME_RANGE);
    let rating = check_range(&mut errors, "rating", "Rating", input.rating, RATING_RANGE);
    check_len(
        &mut errors,
        "description",
        "Description",
        input.description.as_deref(),
        DESCRIPTION_MAX,
    );
    check_len(&mut errors, "poster_url", "Poster URL", input.poster_url.as_deref(), POSTER_URL_MAX);
    if let Some(raw) = input.poster_url.as_deref() {
        if !is_web_url(raw) {
            errors.push("poster_url", "Poster URL must be a valid http, https or ftp URL");
        }
    }

    match (year, runtime_mins, rating) {
        (Some(year), Some(runtime_mins), Some(rating)) if errors.is_empty() => Ok(NewMovie {
            title: input.title.clone(),
            director: input.director.clone(),
            year,
            genre: input.genre.clone(),
            runtime_mins,
            rating,
            description: input.description.clone(),
            poster_url: input.poster_url.clone(),
            is_top_pick: input.is_top_pick,
        }),
        _ => Err(errors),
    }
}

fn check_len(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(value) = value {
        if value.chars().count() > max {
            errors.push(field, format!("{label} must be at most {max} characters"));
        }
    }
}

fn check_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<i32>,
    (min, max): (i32, i32),
) -> Option<i32> {
    match value {
        None => {
            errors.push(field, format!("{label} is required"));
            None
        },
        Some(v) if !(min..=max).contains(&v) => {
            errors.push(field, format!("{label} must be between {min} and {max}"));
            None
        },
        Some(v) => Some(v),
    }
}

fn is_web_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> MovieInput {
        MovieInput {
            id: None,
            title: "Inception".to_string(),
            director: Some("Christopher Nolan".to_string()),
            year: Some(2010),
            genre: Some("Sci-Fi".to_string()),
            runtime_mins: Some(148),
            rating: Some(9),
            description: None,
            poster_url: Some("https://example.com/inception.jpg".to_string()),
            is_top_pick: true,
        }
    }

    #[test]
    fn test_valid_movie_passes() {
        let movie = validate_movie(&valid_input()).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.runtime_mins, 148);
        assert_eq!(movie.rating, 9);
        assert!(movie.is_top_pick);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut input = valid_input();
        input.year = Some(1900);
        input.runtime_mins = Some(500);
        input.rating = Some(10);
        assert!(validate_movie(&input).is_ok());

        input.year = Some(2100);
        input.runtime_mins = Some(1);
        input.rating = Some(1);
        assert!(validate_movie(&input).is_ok());

        input.year = Some(1899);
        assert!(validate_movie(&input).unwrap_err().has("year"));
        input.year = Some(2101);
        assert!(validate_movie(&input).unwrap_err().has("year"));
    }

    #[test]
    fn test_reports_every_violation() {
        let input = MovieInput {
            id: None,
            title: "   ".to_string(),
            director: Some("d".repeat(81)),
            year: None,
            genre: Some("g".repeat(41)),
            runtime_mins: Some(0),
            rating: Some(11),
            description: Some("x".repeat(1001)),
            poster_url: Some("not a url".to_string()),
            is_top_pick: false,
        };

        let errors = validate_movie(&input).unwrap_err();
        for field in [
            "title",
            "director",
            "year",
            "genre",
            "runtime_mins",
            "rating",
            "description",
            "poster_url",
        ] {
            assert!(errors.has(field), "missing error for {field}");
        }
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut input = valid_input();
        input.title = "é".repeat(TITLE_MAX);
        assert!(validate_movie(&input).is_ok());

        input.title = "é".repeat(TITLE_MAX + 1);
        let errors = validate_movie(&input).unwrap_err();
        assert_eq!(errors.for_field("title").count(), 1);
    }

    #[test]
    fn test_poster_url() {
        assert!(is_web_url("https://image.tmdb.org/t/p/w500/poster.jpg"));
        assert!(is_web_url("http://example.com"));
        assert!(is_web_url("ftp://files.example.com/poster.png"));
        assert!(!is_web_url("example.com/poster.jpg"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("mailto:someone@example.com"));

        let mut input = valid_input();
        input.poster_url = Some(format!("https://example.com/{}", "p".repeat(POSTER_URL_MAX)));
        let errors = validate_movie(&input).unwrap_err();
        assert_eq!(errors.for_field("poster_url").count(), 1);
    }
}
