use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use motorpool_core::storage::{repository_error_to_status_code, RepositoryError};

/// Application error returned by the HTTP handlers.
///
/// Validation problems (missing field, unknown type, bad year, routing-verb
/// ids) are client errors with an explicit status; everything else goes
/// through the repository error table, so storage failures come back as
/// server errors and duplicate ids as a conflict.
pub enum AppError {
    Client(StatusCode, String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Client(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Client(StatusCode::NOT_FOUND, message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Client(status, message) => {
                tracing::warn!(%status, %message, "request rejected");
                (status, message)
            }
            AppError::Internal(error) => {
                let status = match error.downcast_ref::<RepositoryError>() {
                    Some(repo_error) => {
                        StatusCode::from_u16(repository_error_to_status_code(repo_error))
                            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                    None => StatusCode::INTERNAL_SERVER_ERROR,
                };
                tracing::error!(%status, %error, "request failed");
                (status, error.to_string())
            }
        };

        (
            status,
            Json(serde_json::json!({ "ok": false, "error": message })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
