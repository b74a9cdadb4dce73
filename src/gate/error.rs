//! Gateway error taxonomy and its HTTP envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error envelope returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_providers: Option<Vec<String>>,
}

/// Failure of a single gateway call
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The caller sent something the gateway cannot route
    #[error("{error}")]
    Validation {
        error: String,
        available_providers: Option<Vec<String>>,
    },

    /// The vendor rejected the configured credential
    #[error("invalid API key: {0}")]
    Authentication(String),

    /// The vendor throttled the request
    #[error("rate limit exceeded")]
    RateLimited,

    /// Any other vendor or network failure
    #[error("failed to process message: {0}")]
    Unclassified(String),
}

impl GatewayError {
    pub fn validation(error: impl Into<String>) -> Self {
        GatewayError::Validation {
            error: error.into(),
            available_providers: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Authentication(_) => StatusCode::UNAUTHORIZED,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            GatewayError::Validation {
                error,
                available_providers,
            } => ErrorBody {
                error: error.clone(),
                message: None,
                available_providers: available_providers.clone(),
            },
            GatewayError::Authentication(message) => ErrorBody {
                error: "Invalid API key".to_string(),
                message: Some(message.clone()),
                available_providers: None,
            },
            GatewayError::RateLimited => ErrorBody {
                error: "Rate limit exceeded".to_string(),
                message: Some("Please try again shortly".to_string()),
                available_providers: None,
            },
            GatewayError::Unclassified(message) => ErrorBody {
                error: "Failed to process message".to_string(),
                message: Some(message.clone()),
                available_providers: None,
            },
        }
    }
}

impl From<crate::Error> for GatewayError {
    fn from(err: crate::Error) -> Self {
        if let crate::Error::InvalidRequest(reason) = err {
            return GatewayError::validation(reason);
        }
        if err.is_authentication() {
            GatewayError::Authentication(err.to_string())
        } else if err.is_rate_limited() {
            GatewayError::RateLimited
        } else {
            GatewayError::Unclassified(err.to_string())
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
