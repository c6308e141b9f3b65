use tracing::{debug, info, warn};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieInput},
    store::MovieStore,
    validation::validate_movie,
};

pub async fn get_movie(store: &dyn MovieStore, id: i32) -> AppResult<Movie> {
    store.find_by_id(id).await?.ok_or(AppError::NotFound(id))
}

pub async fn create_movie(store: &dyn MovieStore, input: &MovieInput) -> AppResult<Movie> {
    let movie = validate_movie(input)?;
    let created = store.insert(movie).await?;
    info!(movie_id = created.id, title = %created.title, "created movie");
    Ok(created)
}

/// Full replacement of an existing movie. The payload id has to name the
/// same record as `id`. A row deleted underneath the write is reported as
/// not found; nothing is retried.
pub async fn update_movie(store: &dyn MovieStore, id: i32, input: &MovieInput) -> AppResult<Movie> {
    if input.id != Some(id) {
        debug!(movie_id = id, payload_id = ?input.id, "movie id mismatch");
        return Err(AppError::NotFound(id));
    }

    let movie = validate_movie(input)?.with_id(id);
    match store.replace(movie).await? {
        Some(updated) => {
            info!(movie_id = id, title = %updated.title, "updated movie");
            Ok(updated)
        },
        None => {
            warn!(movie_id = id, "movie vanished before update");
            Err(AppError::NotFound(id))
        },
    }
}

/// Deleting a movie that does not exist is not an error.
pub async fn delete_movie(store: &dyn MovieStore, id: i32) -> AppResult<()> {
    if store.remove(id).await? {
        info!(movie_id = id, "deleted movie");
    } else {
        debug!(movie_id = id, "delete of missing movie ignored");
    }
    Ok(())
}
