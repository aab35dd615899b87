//! API error handling
//!
//! Every error leaves the server as `{"error": "..."}`.
//!
//! Author: hephaex@gmail.com

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ner_core::NerError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound,
    PayloadTooLarge,
    ExtractionFailed,
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ExtractionFailed | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::BadRequest(msg) => ApiError::new(msg),
            AppError::NotFound => ApiError::new("Not found"),
            AppError::PayloadTooLarge => ApiError::new("Request body too large"),
            AppError::ExtractionFailed => ApiError::new("Failed to extract entities"),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                ApiError::new("Internal server error")
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<NerError> for AppError {
    fn from(err: NerError) -> Self {
        match err {
            NerError::InvalidInput(msg) => AppError::BadRequest(msg),
            NerError::Extraction(msg) => {
                tracing::error!(error = %msg, "Error extracting entities");
                AppError::ExtractionFailed
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
