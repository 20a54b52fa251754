mod categories;
mod questions;
mod quizzes;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable(#[source] sqlx::Error),
    /// Well-formed JSON whose fields can not be used.
    #[error("unprocessable")]
    UnprocessableInput,
    #[error("internal server error")]
    Internal(#[source] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) | ApiError::UnprocessableInput => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unprocessable(e) => tracing::error!("Storage refused the request: {e}"),
            ApiError::Internal(e) => tracing::error!("Query failed: {e}"),
            other => tracing::debug!("Request rejected: {other}"),
        }
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// read paths surface storage failures as 500, write paths pick 422 explicitly
impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        ApiError::Internal(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> ApiError {
        tracing::debug!("Malformed body: {}", rejection.body_text());
        ApiError::BadRequest
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> ApiError {
        tracing::debug!("Malformed query: {}", rejection.body_text());
        ApiError::BadRequest
    }
}

// ids are integers in the route, anything else does not name a resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> ApiError {
        tracing::debug!("Bad path: {}", rejection.body_text());
        ApiError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn envelope(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn error_envelopes() {
        let cases = [
            (ApiError::BadRequest, 400, "bad request"),
            (ApiError::NotFound, 404, "resource not found"),
            (ApiError::MethodNotAllowed, 405, "method not allowed"),
            (
                ApiError::Unprocessable(sqlx::Error::RowNotFound),
                422,
                "unprocessable",
            ),
            (ApiError::UnprocessableInput, 422, "unprocessable"),
            (
                ApiError::Internal(sqlx::Error::PoolClosed),
                500,
                "internal server error",
            ),
        ];
        for (error, code, message) in cases {
            let (status, body) = envelope(error).await;
            assert_eq!(status.as_u16(), code);
            assert_eq!(
                body,
                serde_json::json!({"success": false, "error": code, "message": message})
            );
        }
    }

    #[test]
    fn storage_errors_default_to_internal() {
        let error = ApiError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
