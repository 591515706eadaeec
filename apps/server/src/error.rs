use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kingston_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    // Surface the underlying error message to help debugging during development
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::UniqueViolation(_))
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::CONFLICT,
        CoreError::InvariantViolation(_)
        | CoreError::Database(_)
        | CoreError::Repository(_)
        | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => {
                let status = core_status(e);
                if let CoreError::InvariantViolation(detail) = e {
                    tracing::error!("Invariant violation: {}", detail);
                } else if status.is_server_error() {
                    tracing::error!("Request failed: {}", e);
                }
                (status, e.to_string())
            }
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
