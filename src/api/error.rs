use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::todo::Response;
use crate::repository::RepositoryError;

/// The only message clients ever see for a failed request.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    Decode(String),

    #[error("todo not found")]
    NotFound,

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(todo_id) => {
                tracing::info!(todo_id, "todo not found");
                ApiError::NotFound
            }
            other => ApiError::Repository(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Repository(_) | ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::NotFound => HttpResponse::NotFound().finish(),
            ApiError::Decode(_) => {
                tracing::warn!(error = %self, "rejecting request");
                HttpResponse::BadRequest().json(Response::new(GENERIC_FAILURE))
            }
            ApiError::Repository(_) | ApiError::Blocking(_) => {
                tracing::error!(error = %self, "request failed");
                HttpResponse::InternalServerError().json(Response::new(GENERIC_FAILURE))
            }
        }
    }
}
