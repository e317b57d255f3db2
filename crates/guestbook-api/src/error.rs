use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use guestbook_db::DbError;

use crate::response::PrettyJson;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Validation error", msg)
            }
            ApiError::Db(e) if e.is_conflict() => (StatusCode::CONFLICT, "Conflict", e.to_string()),
            ApiError::Db(e) => {
                error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error", e.to_string())
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error", msg)
            }
        };

        (status, PrettyJson(json!({ "error": error, "detail": detail }))).into_response()
    }
}
