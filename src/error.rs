use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{templates, validation::ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid movie: {0}")]
    Validation(ValidationErrors),

    #[error("movie {0} not found")]
    NotFound(i32),

    #[error("database error: {0}")]
    Store(#[from] sea_orm::DbErr),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Html(templates::not_found_page())).into_response()
            },
            AppError::Validation(errors) => {
                let body = templates::error_page(errors.to_string());
                (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
            },
            AppError::Store(err) => {
                tracing::error!(error = %err, "database error");
                let body = templates::error_page("A database error occurred".to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;
    use crate::models::MovieInput;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_each_variant_maps_to_its_status() {
        assert_eq!(status_of(AppError::NotFound(7)), StatusCode::NOT_FOUND);

        let errors = crate::validation::validate_movie(&MovieInput::default()).unwrap_err();
        assert_eq!(status_of(errors.into()), StatusCode::UNPROCESSABLE_ENTITY);

        let store_err = AppError::from(DbErr::Custom("disk full".to_string()));
        assert_eq!(status_of(store_err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
