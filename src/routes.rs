use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    listing, models,
    models::{ListFilters, MovieForm, SortDirection, SortKey, SortSpec},
    records,
    templates::{self, FormMode},
    validation::ValidationErrors,
};

/// Listing query string. Everything arrives as text so that empty form
/// selects and malformed numbers read as "no filter" instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    q: Option<String>,
    genre: Option<String>,
    year: Option<String>,
    #[serde(rename = "ratingMin")]
    rating_min: Option<String>,
    sort: Option<String>,
    dir: Option<String>,
}

impl ListingQuery {
    pub fn filters(&self) -> ListFilters {
        ListFilters {
            search: self.q.as_deref().and_then(models::non_empty),
            genre: self.genre.as_deref().and_then(models::non_empty),
            year: self.year.as_deref().and_then(models::parse_int),
            rating_min: self.rating_min.as_deref().and_then(models::parse_int),
        }
    }

    pub fn sort(&self) -> SortSpec {
        SortSpec {
            key: SortKey::parse(self.sort.as_deref()),
            direction: SortDirection::parse(self.dir.as_deref()),
        }
    }
}

pub async fn home() -> Html<String> {
    Html(templates::home_page())
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> AppResult<Html<String>> {
    let filters = query.filters();
    let sort = query.sort();
    let listing = listing::list_movies(state.store.as_ref(), &filters, sort).await?;
    Ok(Html(templates::movies_page(&listing, &filters, sort)))
}

pub async fn top_picks(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let picks = listing::top_picks(state.store.as_ref()).await?;
    Ok(Html(templates::top_picks_page(&picks)))
}

pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let genres = listing::genre_index(state.store.as_ref()).await?;
    Ok(Html(templates::genres_page(&genres)))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = records::get_movie(state.store.as_ref(), id).await?;
    Ok(Html(templates::movie_details_page(&movie)))
}

pub async fn new_form() -> Html<String> {
    Html(templates::movie_form_page(
        FormMode::Create,
        &MovieForm::default(),
        &ValidationErrors::default(),
    ))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    match records::create_movie(state.store.as_ref(), &form.to_input()).await {
        Ok(_) => Ok(Redirect::to("/movies").into_response()),
        Err(AppError::Validation(errors)) => Ok(rejected_form(FormMode::Create, &form, &errors)),
        Err(err) => Err(err),
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = records::get_movie(state.store.as_ref(), id).await?;
    Ok(Html(templates::movie_form_page(
        FormMode::Edit(id),
        &MovieForm::from(&movie),
        &ValidationErrors::default(),
    )))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<MovieForm>,
) -> AppResult<Response> {
    match records::update_movie(state.store.as_ref(), id, &form.to_input()).await {
        Ok(_) => Ok(Redirect::to("/movies").into_response()),
        Err(AppError::Validation(errors)) => Ok(rejected_form(FormMode::Edit(id), &form, &errors)),
        Err(err) => Err(err),
    }
}

pub async fn delete_confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = records::get_movie(state.store.as_ref(), id).await?;
    Ok(Html(templates::delete_confirm_page(&movie)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    records::delete_movie(state.store.as_ref(), id).await?;
    Ok(Redirect::to("/movies"))
}

fn rejected_form(mode: FormMode, form: &MovieForm, errors: &ValidationErrors) -> Response {
    let body = templates::movie_form_page(mode, form, errors);
    (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
}
