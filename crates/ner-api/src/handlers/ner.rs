//! Entity extraction handler
//!
//! `POST /ner` takes either a JSON body `{"text": "..."}` or a
//! url-encoded form with a `text` field.
//!
//! Author: hephaex@gmail.com

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    Form, Json,
};
use ner_core::{Entity, ExtractRequest};
use std::sync::Arc;

/// Request body accepted as JSON or form data
#[derive(Debug)]
pub struct ExtractInput(pub ExtractRequest);

#[async_trait]
impl<S> FromRequest<S> for ExtractInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(body) = Form::<ExtractRequest>::from_request(req, state)
                .await
                .map_err(|rejection| reject(rejection.status(), "Invalid form data"))?;
            return Ok(Self(body));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| reject(rejection.status(), "Invalid JSON format"))?;
        let body = serde_json::from_slice(&bytes)
            .map_err(|_| AppError::BadRequest("Invalid JSON format".to_string()))?;

        Ok(Self(body))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn reject(status: StatusCode, message: &str) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(message.to_string())
    }
}

/// Extract named entities
#[utoipa::path(
    post,
    path = "/ner",
    tag = "ner",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Recognized entities", body = [Entity]),
        (status = 400, description = "Missing text or malformed body", body = crate::error::ApiError),
        (status = 500, description = "Extraction failed", body = crate::error::ApiError)
    )
)]
pub async fn extract_handler(
    State(state): State<Arc<AppState>>,
    ExtractInput(req): ExtractInput,
) -> Result<Json<Vec<Entity>>, AppError> {
    if !req.has_text() {
        return Err(AppError::BadRequest("Text field is required".to_string()));
    }

    let service = state.ner.clone();
    let entities = tokio::task::spawn_blocking(move || service.extract_entities(&req.text))
        .await
        .map_err(|e| AppError::Internal(format!("extraction task failed: {e}")))??;

    Ok(Json(entities))
}
