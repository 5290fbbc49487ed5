//! REST error types.

use reqwest::StatusCode;
use thiserror::Error;

use crate::version::VersionParseError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    /// The server answered with a non-success status code. A 204 on a
    /// prediction endpoint means "no prediction exists yet" and is mapped
    /// to this variant as well.
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid platform version: {0}")]
    Version(#[from] VersionParseError),
}

impl RestError {
    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            RestError::Status { status, .. } => Some(*status),
            RestError::Network(error) => error.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_accessor() {
        let error = RestError::Status {
            status: StatusCode::NO_CONTENT,
            message: String::new(),
        };
        assert_eq!(error.status_code(), Some(StatusCode::NO_CONTENT));

        let error = RestError::Version(VersionParseError::new("bad"));
        assert_eq!(error.status_code(), None);
    }
}
