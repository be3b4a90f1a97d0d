use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the calendar aggregation. Unknown workout types and empty
/// input are not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("workout {id} has malformed date '{value}'")]
    MalformedDate { id: u64, value: String },

    #[error("window size must be between 1 and 12 months, got {0}")]
    InvalidWindowSize(u8),

    #[error("calendar window falls outside the supported date range")]
    DateOutOfRange,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} '{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("week start must be 'sunday' or 'monday', got '{0}'")]
    InvalidWeekStart(String),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
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

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
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

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Calendar(err) => err.into(),
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        let status = match err {
            CalendarError::MalformedDate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CalendarError::InvalidWindowSize(_) | CalendarError::DateOutOfRange => {
                StatusCode::BAD_REQUEST
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
