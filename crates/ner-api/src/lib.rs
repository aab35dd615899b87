//! NER API - HTTP server
//!
//! Endpoints:
//! - `GET /health`: liveness
//! - `GET /version`: build information
//! - `GET /metrics`: request counters
//! - `POST /ner`: extract entities from JSON or form-encoded text
//!
//! Author: hephaex@gmail.com

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::{create_router, MAX_BODY_BYTES};

use ner_core::{BuildInfo, Entity, ExtractRequest};
use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(title = "NER Service", description = "Spanish named entity recognition"),
    paths(
        handlers::health::health_check,
        handlers::health::version,
        handlers::ner::extract_handler,
    ),
    components(schemas(
        Entity,
        ExtractRequest,
        BuildInfo,
        handlers::health::HealthResponse,
        error::ApiError,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "ner", description = "Entity extraction")
    )
)]
pub struct ApiDoc;

/// Router over the built-in rule backend, for tests
#[cfg(any(test, feature = "test-utils"))]
pub fn create_router_for_testing() -> axum::Router {
    use ner_core::config::{AppConfig, Backend};
    use ner_extractor::NerService;
    use std::sync::Arc;

    let config = AppConfig {
        backend: Backend::Rules,
        ..AppConfig::default()
    };
    let state = state::AppState::new(config, NerService::rule_based());
    create_router(Arc::new(state))
}
