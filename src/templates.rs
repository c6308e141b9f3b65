use maud::{DOCTYPE, Markup, html};

use crate::{
    models::{ListFilters, Movie, MovieForm, MovieListing, SortDirection, SortKey, SortSpec},
    validation::{RATING_RANGE, ValidationErrors},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";
const LINK_CLASS: &str = "text-blue-600 hover:text-blue-800";

#[derive(Clone, Copy, Debug)]
pub enum FormMode {
    Create,
    Edit(i32),
}

pub fn home_page() -> String {
    page(
        "MoviesHub",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-3xl font-bold text-gray-900" { "MoviesHub" }
                p class="mt-2 text-gray-600" { "Browse, filter and curate a catalog of movies." }
                div class="mt-8 flex gap-4" {
                    a class=(BUTTON_CLASS) href="/movies" { "Browse the catalog" }
                    a class="rounded-md border border-gray-300 px-4 py-2 font-semibold text-gray-700 hover:bg-gray-100" href="/top-picks" { "Top picks" }
                }
            }
        },
    )
}

pub fn movies_page(listing: &MovieListing, filters: &ListFilters, sort: SortSpec) -> String {
    page(
        "Movies",
        html! {
            div class="flex items-start justify-between gap-6" {
                h1 class="text-3xl font-bold text-gray-900" { "Movies" }
                a class=(BUTTON_CLASS) href="/movies/new" { "Add movie" }
            }

            (filter_form(listing, filters, sort))

            @if listing.movies.is_empty() {
                div class="mt-8 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies match these filters." }
                }
            } @else {
                div class="mt-8 overflow-x-auto bg-white shadow rounded-lg" {
                    table class="min-w-full divide-y divide-gray-200" {
                        thead class="bg-gray-50" {
                            tr {
                                th class="px-4 py-3 text-left text-sm font-semibold text-gray-700" { (sort_link(SortKey::Title, filters, sort)) }
                                th class="px-4 py-3 text-left text-sm font-semibold text-gray-700" { "Director" }
                                th class="px-4 py-3 text-left text-sm font-semibold text-gray-700" { (sort_link(SortKey::Year, filters, sort)) }
                                th class="px-4 py-3 text-left text-sm font-semibold text-gray-700" { "Genre" }
                                th class="px-4 py-3 text-left text-sm font-semibold text-gray-700" { (sort_link(SortKey::Rating, filters, sort)) }
                                th {}
                            }
                        }
                        tbody class="divide-y divide-gray-100" {
                            @for movie in &listing.movies {
                                tr {
                                    td class="px-4 py-3 text-gray-900" {
                                        a class=(LINK_CLASS) href=(format!("/movies/{}", movie.id)) { (movie.title) }
                                        @if movie.is_top_pick {
                                            span class="ml-2 rounded bg-yellow-100 px-2 text-xs text-yellow-800" { "Top pick" }
                                        }
                                    }
                                    td class="px-4 py-3 text-gray-700" { (movie.director.as_deref().unwrap_or("—")) }
                                    td class="px-4 py-3 text-gray-700" { (movie.year) }
                                    td class="px-4 py-3 text-gray-700" { (movie.genre.as_deref().unwrap_or("—")) }
                                    td class="px-4 py-3 text-gray-700" { (movie.rating) "/10" }
                                    td class="px-4 py-3 text-right text-sm whitespace-nowrap" {
                                        a class=(LINK_CLASS) href=(format!("/movies/{}/edit", movie.id)) { "Edit" }
                                        " · "
                                        a class="text-red-600 hover:text-red-800" href=(format!("/movies/{}/delete", movie.id)) { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_details_page(movie: &Movie) -> String {
    page(
        &movie.title,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                (movie_summary(movie))
                div class="mt-8 flex gap-4" {
                    a class=(BUTTON_CLASS) href=(format!("/movies/{}/edit", movie.id)) { "Edit" }
                    a class="rounded-md border border-red-300 px-4 py-2 font-semibold text-red-700 hover:bg-red-50" href=(format!("/movies/{}/delete", movie.id)) { "Delete" }
                    a class="px-4 py-2 text-gray-600 hover:text-gray-800" href="/movies" { "Back to list" }
                }
            }
        },
    )
}

pub fn movie_form_page(mode: FormMode, form: &MovieForm, errors: &ValidationErrors) -> String {
    let (title, action) = match mode {
        FormMode::Create => ("Add movie".to_string(), "/movies".to_string()),
        FormMode::Edit(id) => ("Edit movie".to_string(), format!("/movies/{id}/edit")),
    };

    page(
        &title,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { (title) }

                @if !errors.is_empty() {
                    div class="mt-4 rounded-md bg-red-50 p-4" {
                        p class="text-sm font-semibold text-red-800" { "Please fix the following:" }
                        ul class="mt-2 list-disc pl-5 text-sm text-red-700" {
                            @for error in errors.iter() {
                                li { (error.message) }
                            }
                        }
                    }
                }

                form class="mt-6 space-y-5" method="post" action=(action) {
                    @if let FormMode::Edit(id) = mode {
                        input type="hidden" name="id" value=(id);
                    }
                    (text_field("title", "Title", &form.title, errors, true))
                    (text_field("director", "Director", &form.director, errors, false))
                    div class="grid gap-5 md:grid-cols-3" {
                        (number_field("year", "Year", &form.year, errors))
                        (number_field("runtime_mins", "Runtime (mins)", &form.runtime_mins, errors))
                        (number_field("rating", "Rating (1-10)", &form.rating, errors))
                    }
                    (text_field("genre", "Genre", &form.genre, errors, false))
                    div {
                        label class="block text-sm font-medium text-gray-700" for="description" { "Description" }
                        textarea class=(INPUT_CLASS) name="description" id="description" rows="4" { (form.description) }
                        (field_errors("description", errors))
                    }
                    (text_field("poster_url", "Poster URL", &form.poster_url, errors, false))
                    div class="flex items-center gap-2" {
                        input type="checkbox" name="is_top_pick" id="is_top_pick" value="true" checked[form.is_top_pick.as_deref().is_some_and(|v| v != "false")];
                        label class="text-sm font-medium text-gray-700" for="is_top_pick" { "Top pick" }
                    }
                    div class="flex gap-4" {
                        button class=(BUTTON_CLASS) type="submit" { "Save" }
                        a class="px-4 py-2 text-gray-600 hover:text-gray-800" href="/movies" { "Cancel" }
                    }
                }
            }
        },
    )
}

pub fn delete_confirm_page(movie: &Movie) -> String {
    page(
        "Delete movie",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Delete this movie?" }
                div class="mt-6" { (movie_summary(movie)) }
                form class="mt-8 flex gap-4" method="post" action=(format!("/movies/{}/delete", movie.id)) {
                    button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                    a class="px-4 py-2 text-gray-600 hover:text-gray-800" href="/movies" { "Cancel" }
                }
            }
        },
    )
}

pub fn top_picks_page(picks: &[Movie]) -> String {
    page(
        "Top picks",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Top picks" }
            @if picks.is_empty() {
                div class="mt-8 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies have been picked yet." }
                }
            } @else {
                div class="mt-8 grid gap-6 sm:grid-cols-2 lg:grid-cols-3" {
                    @for movie in picks {
                        a class="block bg-white shadow rounded-lg overflow-hidden hover:shadow-md" href=(format!("/movies/{}", movie.id)) {
                            @if let Some(poster) = &movie.poster_url {
                                img class="h-64 w-full object-cover" src=(poster) alt=(movie.title);
                            }
                            div class="p-4" {
                                h2 class="text-lg font-semibold text-gray-900" { (movie.title) }
                                p class="text-sm text-gray-500" { (movie.year) " · " (movie.rating) "/10" }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn genres_page(genres: &[String]) -> String {
    page(
        "Genres",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Genres" }
            @if genres.is_empty() {
                div class="mt-8 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies have a genre yet." }
                }
            } @else {
                ul class="mt-8 grid gap-4 sm:grid-cols-2 lg:grid-cols-3" {
                    @for genre in genres {
                        li {
                            a class="block bg-white shadow rounded-lg p-4 text-lg font-semibold text-gray-900 hover:shadow-md" href=(genre_url(genre)) { (genre) }
                        }
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> String {
    error_page("That movie could not be found.".to_string())
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Error" }
                p class="mt-4 text-gray-700" { (message) }
                a class=(format!("mt-6 inline-block {LINK_CLASS}")) href="/movies" { "Back" }
            }
        },
    )
}

/// Query string for the listing that keeps `filters` and applies `sort`.
pub fn listing_url(filters: &ListFilters, sort: SortSpec) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(q) = filters.search.as_deref().filter(|s| !s.trim().is_empty()) {
        params.push(("q", q.to_string()));
    }
    if let Some(genre) = filters.genre.as_deref().filter(|s| !s.trim().is_empty()) {
        params.push(("genre", genre.to_string()));
    }
    if let Some(year) = filters.year {
        params.push(("year", year.to_string()));
    }
    if let Some(rating_min) = filters.rating_min {
        params.push(("ratingMin", rating_min.to_string()));
    }
    params.push(("sort", sort.key.as_str().to_string()));
    params.push(("dir", sort.direction.as_str().to_string()));

    let query: Vec<String> =
        params.iter().map(|(k, v)| format!("{k}={}", urlencoding::encode(v))).collect();
    format!("/movies?{}", query.join("&"))
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · MoviesHub" }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                nav class="bg-white shadow" {
                    div class="max-w-5xl mx-auto px-6 py-4 flex gap-6" {
                        a class="font-bold text-gray-900" href="/" { "MoviesHub" }
                        a class="text-gray-600 hover:text-gray-900" href="/movies" { "Movies" }
                        a class="text-gray-600 hover:text-gray-900" href="/top-picks" { "Top picks" }
                        a class="text-gray-600 hover:text-gray-900" href="/genres" { "Genres" }
                    }
                }
                main class="max-w-5xl mx-auto px-6 py-10" { (body) }
            }
        }
    }
    .into_string()
}

fn filter_form(listing: &MovieListing, filters: &ListFilters, sort: SortSpec) -> Markup {
    let current_genre = selected_genre(
        &listing.genre_options,
        filters.genre.as_deref().map(str::trim).unwrap_or(""),
    );

    html! {
        form class="mt-6 grid gap-4 bg-white shadow rounded-lg p-6 md:grid-cols-6" method="get" action="/movies" {
            div class="md:col-span-2" {
                label class="block text-sm font-medium text-gray-700" for="q" { "Search" }
                input class=(INPUT_CLASS) type="search" name="q" id="q" placeholder="Title or director" value=(filters.search.as_deref().unwrap_or(""));
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="genre" { "Genre" }
                select class=(INPUT_CLASS) name="genre" id="genre" {
                    option value="" { "All" }
                    @for genre in &listing.genre_options {
                        option value=(genre) selected[current_genre == Some(genre.as_str())] { (genre) }
                    }
                }
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="year" { "Year" }
                select class=(INPUT_CLASS) name="year" id="year" {
                    option value="" { "All" }
                    @for year in &listing.year_options {
                        option value=(year) selected[filters.year == Some(*year)] { (year) }
                    }
                }
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="ratingMin" { "Min rating" }
                select class=(INPUT_CLASS) name="ratingMin" id="ratingMin" {
                    option value="" { "Any" }
                    @for rating in (RATING_RANGE.0..=RATING_RANGE.1).rev() {
                        option value=(rating) selected[filters.rating_min == Some(rating)] { (rating) "+" }
                    }
                }
            }
            div {
                label class="block text-sm font-medium text-gray-700" for="sort" { "Sort by" }
                div class="flex gap-2" {
                    select class=(INPUT_CLASS) name="sort" id="sort" {
                        @for key in SortKey::ALL {
                            option value=(key.as_str()) selected[sort.key == key] { (key.label()) }
                        }
                    }
                    select class=(INPUT_CLASS) name="dir" {
                        option value="desc" selected[sort.direction == SortDirection::Desc] { "Desc" }
                        option value="asc" selected[sort.direction == SortDirection::Asc] { "Asc" }
                    }
                }
            }
            div class="md:col-span-6 flex gap-4" {
                button class=(BUTTON_CLASS) type="submit" { "Apply" }
                a class="px-4 py-2 text-gray-600 hover:text-gray-800" href="/movies" { "Reset" }
            }
        }
    }
}

fn sort_link(key: SortKey, filters: &ListFilters, sort: SortSpec) -> Markup {
    let (direction, marker) = if sort.key == key {
        let marker = match sort.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        };
        (sort.direction.reversed(), marker)
    } else if key == SortKey::Title {
        (SortDirection::Asc, "")
    } else {
        (SortDirection::Desc, "")
    };

    html! {
        a class="hover:text-gray-900" href=(listing_url(filters, SortSpec { key, direction })) {
            (key.label()) (marker)
        }
    }
}

fn movie_summary(movie: &Movie) -> Markup {
    html! {
        div class="flex gap-6" {
            @if let Some(poster) = &movie.poster_url {
                img class="h-48 w-32 rounded object-cover" src=(poster) alt=(movie.title);
            }
            div {
                h1 class="text-3xl font-bold text-gray-900" {
                    (movie.title)
                    span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                }
                dl class="mt-4 grid grid-cols-2 gap-x-6 gap-y-2 text-sm" {
                    dt class="font-medium text-gray-500" { "Director" }
                    dd class="text-gray-900" { (movie.director.as_deref().unwrap_or("—")) }
                    dt class="font-medium text-gray-500" { "Genre" }
                    dd class="text-gray-900" { (movie.genre.as_deref().unwrap_or("—")) }
                    dt class="font-medium text-gray-500" { "Runtime" }
                    dd class="text-gray-900" { (movie.runtime_mins) " mins" }
                    dt class="font-medium text-gray-500" { "Rating" }
                    dd class="text-gray-900" { (movie.rating) "/10" }
                    dt class="font-medium text-gray-500" { "Top pick" }
                    dd class="text-gray-900" { @if movie.is_top_pick { "Yes" } @else { "No" } }
                }
                @if let Some(description) = &movie.description {
                    p class="mt-4 text-gray-700" { (description) }
                }
            }
        }
    }
}

fn text_field(
    name: &str,
    label: &str,
    value: &str,
    errors: &ValidationErrors,
    required: bool,
) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) type="text" name=(name) id=(name) value=(value) required[required];
            (field_errors(name, errors))
        }
    }
}

fn number_field(name: &str, label: &str, value: &str, errors: &ValidationErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) type="number" name=(name) id=(name) value=(value);
            (field_errors(name, errors))
        }
    }
}

fn field_errors(name: &str, errors: &ValidationErrors) -> Markup {
    html! {
        @for message in errors.for_field(name) {
            p class="mt-1 text-sm text-red-600" { (message) }
        }
    }
}

fn genre_url(genre: &str) -> String {
    listing_url(&ListFilters { genre: Some(genre.to_string()), ..Default::default() }, SortSpec::default())
}

/// At most one option is marked: the exact match if the catalog has one,
/// otherwise the first option that differs only in ASCII case.
fn selected_genre<'a>(options: &'a [String], current: &str) -> Option<&'a str> {
    if current.is_empty() {
        return None;
    }
    options
        .iter()
        .find(|genre| *genre == current)
        .or_else(|| options.iter().find(|genre| genre.eq_ignore_ascii_case(current)))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre_form(current: &str) -> String {
        let listing = MovieListing {
            movies: Vec::new(),
            genre_options: vec!["Action".to_string(), "Sci-Fi".to_string(), "sci-fi".to_string()],
            year_options: Vec::new(),
        };
        let filters = ListFilters { genre: Some(current.to_string()), ..Default::default() };
        filter_form(&listing, &filters, SortSpec::default()).into_string()
    }

    #[test]
    fn genre_select_marks_exactly_one_case_variant() {
        let html = genre_form("sci-fi");
        assert!(html.contains(r#"value="sci-fi" selected"#), "{html}");
        assert!(!html.contains(r#"value="Sci-Fi" selected"#), "{html}");

        let html = genre_form("Sci-Fi");
        assert!(html.contains(r#"value="Sci-Fi" selected"#), "{html}");
        assert!(!html.contains(r#"value="sci-fi" selected"#), "{html}");

        let html = genre_form(" SCI-FI ");
        assert!(html.contains(r#"value="Sci-Fi" selected"#), "{html}");
        assert!(!html.contains(r#"value="sci-fi" selected"#), "{html}");
    }

    #[test]
    fn listing_url_keeps_active_filters() {
        let filters = ListFilters {
            search: Some("dark knight".to_string()),
            genre: Some("Action".to_string()),
            year: None,
            rating_min: Some(8),
        };
        let url = listing_url(
            &filters,
            SortSpec { key: SortKey::Title, direction: SortDirection::Asc },
        );
        assert_eq!(url, "/movies?q=dark%20knight&genre=Action&ratingMin=8&sort=title&dir=asc");
    }

    #[test]
    fn genre_links_are_encoded_listing_filters() {
        assert_eq!(genre_url("Sci-Fi"), "/movies?genre=Sci-Fi&sort=rating&dir=desc");
        assert_eq!(genre_url("Film Noir"), "/movies?genre=Film%20Noir&sort=rating&dir=desc");
    }

    #[test]
    fn listing_url_without_filters() {
        let url = listing_url(&ListFilters::default(), SortSpec::default());
        assert_eq!(url, "/movies?sort=rating&dir=desc");
    }
}
