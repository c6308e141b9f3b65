pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod listing;
pub mod models;
pub mod records;
pub mod routes;
pub mod store;
pub mod templates;
pub mod validation;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::store::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
}

impl AppState {
    pub fn new(store: impl MovieStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/movies", get(routes::list).post(routes::create))
        .route("/movies/new", get(routes::new_form))
        .route("/movies/{id}", get(routes::details))
        .route("/movies/{id}/edit", get(routes::edit_form).post(routes::update))
        .route("/movies/{id}/delete", get(routes::delete_confirm).post(routes::delete))
        .route("/top-picks", get(routes::top_picks))
        .route("/genres", get(routes::genres))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
