//! api::error
//!
//! API errors and their HTTP status codes.

use serde_json::{json, Value};
use thiserror::Error;

use crate::gitconfig::WriteError;

/// Errors surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No accessible repository at the requested path. Carries no detail.
    #[error("Forbidden")]
    Forbidden,

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Unknown route.
    #[error("{0}")]
    NotFound(String),

    /// Route exists but not for this method.
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Recognized but unsupported request.
    #[error("{0}")]
    NotImplemented(String),

    /// Provider failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Forbidden => 403,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::Internal(_) => 500,
            ApiError::NotImplemented(_) => 501,
        }
    }

    /// JSON error body.
    ///
    /// ```
    /// use gitapi::api::ApiError;
    ///
    /// let body = ApiError::BadRequest("Config entry value must be provided".into()).to_body();
    /// assert_eq!(body["HttpCode"], 400);
    /// assert_eq!(body["Message"], "Config entry value must be provided");
    /// ```
    pub fn to_body(&self) -> Value {
        json!({
            "HttpCode": self.status_code(),
            "Code": 0,
            "Message": self.to_string(),
            "Severity": "Error",
        })
    }
}

impl From<WriteError> for ApiError {
    fn from(err: WriteError) -> Self {
        if err.is_not_implemented() {
            ApiError::NotImplemented(err.to_string())
        } else {
            ApiError::BadRequest(err.to_string())
        }
    }
}
