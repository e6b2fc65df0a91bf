use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Error taxonomy for the seat reservation subsystem.
///
/// Each variant carries its own user-visible message and maps to exactly one
/// HTTP status code via [`AppError::status_code`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("You don't have permission to do that")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("This event is not currently available for booking.")]
    InvalidState(String),

    #[error("Seat {0} is no longer available. Please choose another.")]
    SeatConflict(String),

    #[error("External service unavailable: {0}")]
    ExternalUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidState(_) => StatusCode::BAD_REQUEST,
            Self::SeatConflict(_) => StatusCode::CONFLICT,
            Self::ExternalUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind, matching the error taxonomy table.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::SeatConflict(_) => "SEAT_CONFLICT",
            Self::ExternalUnavailable(_) => "EXTERNAL_UNAVAILABLE",
            Self::Internal(_) | Self::Database(_) => "INTERNAL",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_) | Self::Database(_)) {
            tracing::error!(error = %self, "internal error");
        }

        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
