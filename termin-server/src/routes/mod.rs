pub mod auth;
pub mod events;
pub mod feed;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use termin_core::TerminError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses, mapping the core taxonomy to status
/// codes where one applies.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<TerminError>() {
            Some(TerminError::Auth) => StatusCode::UNAUTHORIZED,
            Some(TerminError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(TerminError::Config(_)) => StatusCode::BAD_REQUEST,
            Some(TerminError::Store(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
