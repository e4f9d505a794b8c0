use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::validation::Violation;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(Violation),

    #[error("Authentication required. Please login again.")]
    Unauthorized,

    #[error("Scheduler error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed scheduler response: {0}")]
    MalformedResponse(String),

    #[error("Cannot {action} from step {step}")]
    InvalidTransition { action: &'static str, step: String },

    #[error("Read only: {0}")]
    ReadOnly(String),

    #[error("A request is already in flight")]
    Busy,

    #[error("The wizard has already finished")]
    Finished,

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<Violation> for AppError {
    fn from(violation: Violation) -> Self {
        AppError::Validation(violation)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Errors raised by configuration mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{collection} index {index} is out of range")]
    IndexOutOfRange { collection: &'static str, index: usize },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfBounds {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Remote { .. } | AppError::Transport(_) | AppError::MalformedResponse(_) => {
                error!("scheduler failure: {}", self);
                StatusCode::BAD_GATEWAY
            }
            AppError::InvalidTransition { .. }
            | AppError::ReadOnly(_)
            | AppError::Busy
            | AppError::Finished => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
