use axum::http::StatusCode;
use thiserror::Error;

/// Domain errors raised by the progress store and session controller.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The key-value store could not be read or written.
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// A stored record exists but does not decode.
    #[error("malformed record under {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    /// An action referenced a day outside the plan.
    #[error("invalid day {day}: must be between 1 and 20")]
    InvalidDay { day: u32 },
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable {
            message: err.to_string(),
        }
    }

    pub fn malformed(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::MalformedRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidDay { .. } => Self::bad_request(err.to_string()),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
