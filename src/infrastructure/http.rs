//! HTTP failure classification shared by the provider adapters

use reqwest::StatusCode;
use serde::Deserialize;

use crate::application::ports::{ResponderError, TranscriptionError};

/// Error envelope used by both Gemini and OpenAI
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Why a provider request did not produce a usable response
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HttpFailure {
    Unauthorized,
    RateLimited,
    Timeout,
    Transport(String),
    Status(String),
}

impl HttpFailure {
    /// Classify a non-2xx response, reading its body for the message
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Self::from_status(status, &body)
    }

    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED || body.contains("API_KEY_INVALID") {
            return Self::Unauthorized;
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Self::RateLimited;
        }

        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|wrapper| wrapper.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        Self::Status(format!("HTTP {}: {}", status, message))
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<HttpFailure> for ResponderError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Unauthorized => Self::InvalidApiKey,
            HttpFailure::RateLimited => Self::RateLimited,
            HttpFailure::Timeout => Self::Timeout,
            HttpFailure::Transport(msg) => Self::RequestFailed(msg),
            HttpFailure::Status(msg) => Self::ApiError(msg),
        }
    }
}

impl From<HttpFailure> for TranscriptionError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Unauthorized => Self::InvalidApiKey,
            HttpFailure::RateLimited => Self::RateLimited,
            HttpFailure::Timeout => Self::Timeout,
            HttpFailure::Transport(msg) => Self::RequestFailed(msg),
            HttpFailure::Status(msg) => Self::ApiError(msg),
        }
    }
}
