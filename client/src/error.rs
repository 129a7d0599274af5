//! Client error handling
//!
//! Every failed facade operation is reported as one [`ApiError`]. UI code
//! branches on the variant (or on [`ApiError::status`]) and shows
//! [`ApiError::user_message`].

use std::time::Duration;

use gym_tracker_shared::types::extract_error_message;
use gym_tracker_shared::ValidationError;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// Status reported for failures where no response was received
pub const STATUS_NO_RESPONSE: u16 = 0;

/// Status reported for client-side timeouts
pub const STATUS_TIMEOUT: u16 = 408;

/// API error type returned by every facade operation
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input rejected before any store or network call
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 401 or 403
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    /// 400 or 422
    #[error("Rejected ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    #[error("Resource not found: {message}")]
    NotFound {
        message: String,
        payload: Option<Value>,
    },

    /// Any other non-2xx response
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// No response received at all
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Classify a non-success HTTP response
    pub fn from_status(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body).ok();
        let server_message = payload.as_ref().and_then(extract_error_message);
        let message = server_message.unwrap_or_else(|| default_message(status).to_string());

        match status {
            401 | 403 => ApiError::Unauthorized {
                status,
                message,
                payload,
            },
            400 | 422 => ApiError::Rejected {
                status,
                message,
                payload,
            },
            404 => ApiError::NotFound { message, payload },
            _ => {
                if status >= 500 {
                    error!(status, %message, "Server failure");
                }
                ApiError::Server {
                    status,
                    message,
                    payload,
                }
            }
        }
    }

    /// Classify a failure where no usable response arrived
    pub fn from_transport(err: reqwest::Error, budget: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(budget)
        } else if err.is_connect() || err.is_request() {
            ApiError::Connectivity(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ApiError::Unexpected(format!("Malformed response: {}", err))
        } else {
            error!("Unexpected HTTP client error: {:?}", err);
            ApiError::Unexpected(err.to_string())
        }
    }

    /// Status code: HTTP status, 408 for timeouts, 0 when nothing was received
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized { status, .. }
            | ApiError::Rejected { status, .. }
            | ApiError::Server { status, .. } => *status,
            ApiError::NotFound { .. } => 404,
            ApiError::Timeout(_) => STATUS_TIMEOUT,
            ApiError::Validation(_) | ApiError::Connectivity(_) | ApiError::Unexpected(_) => {
                STATUS_NO_RESPONSE
            }
        }
    }

    /// Server-supplied error body, when one was parsed
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { payload, .. }
            | ApiError::Rejected { payload, .. }
            | ApiError::NotFound { payload, .. }
            | ApiError::Server { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Whether the caller should send the user back to login
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ApiError::Unauthorized { status: 401, .. })
    }

    /// Short actionable message for the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.user_message(),
            ApiError::Unauthorized { status: 403, .. } => {
                "You do not have permission to do this.".to_string()
            }
            ApiError::Unauthorized { payload, message, .. } => {
                if payload.as_ref().and_then(extract_error_message).is_some() {
                    message.clone()
                } else {
                    "Your session has expired. Please log in again.".to_string()
                }
            }
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::NotFound { .. } => "The requested item was not found.".to_string(),
            ApiError::Server { status, .. } if *status >= 500 => {
                "The server had a problem. Please try again later.".to_string()
            }
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Timeout(_) => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Connectivity(_) => {
                "Could not reach the server. Check your connection.".to_string()
            }
            ApiError::Unexpected(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request",
        401 => "Session expired or invalid credentials",
        403 => "Access denied",
        404 => "Not found",
        422 => "Invalid data",
        500..=599 => "Internal server error",
        _ => "Request failed",
    }
}

/// Result type alias for facade operations
pub type ApiResult<T> = Result<T, ApiError>;
