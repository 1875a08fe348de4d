//! Mapping of lookup failures to HTTP responses.
//!
//! Bad input (unknown city) stays distinguishable from the service being down.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use weather_core::FetchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream refused us for a reason the caller cannot fix (bad key, quota, ...).
    #[error("Upstream rejected request: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "location_not_found",
            Self::BadGateway(_) => "upstream_rejected",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show to the end user. Upstream details only leak for bad input.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => format!("Invalid location: {msg}"),
            Self::NotFound(msg) => format!("Location not found: {msg}"),
            Self::BadGateway(_) => "The weather provider rejected the request".to_string(),
            Self::ServiceUnavailable(_) => {
                "Weather data is temporarily unavailable, try again later".to_string()
            }
            Self::Internal(_) => "An error occurred processing your request".to_string(),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::UpstreamRejected { code: 404, message } => Self::NotFound(message),
            FetchError::UpstreamRejected { code: 400, message } => Self::BadRequest(message),
            FetchError::UpstreamRejected { code, message } => {
                Self::BadGateway(format!("{code}: {message}"))
            }
            FetchError::FetchFailed(reason) => Self::ServiceUnavailable(reason),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.public_message(), code: self.code() };
        (self.status(), Json(body)).into_response()
    }
}
