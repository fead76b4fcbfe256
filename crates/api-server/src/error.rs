//! Error mapping boundary between store outcomes and HTTP responses
//!
//! Handlers return `Result<_, ApiError>`; conversion to a status code and
//! JSON body happens here once instead of per operation. Storage failures
//! are logged with their detail and surface to the client as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Core(#[from] todo_core::Error),
}

impl ApiError {
    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound(format!("Category {id} not found"))
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::NotFound(format!("Task {id} not found"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Core(todo_core::Error::CategoryNotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Category {id} not found"))
            }
            ApiError::Core(todo_core::Error::TaskNotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Task {id} not found"))
            }
            ApiError::Core(err) => {
                tracing::error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
