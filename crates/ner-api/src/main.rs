//! NER API Server
//!
//! Serves Spanish named entity recognition over HTTP.
//!
//! Author: hephaex@gmail.com

use anyhow::Context;
use ner_api::{create_router, state::AppState};
use ner_core::config::{AppConfig, LoggingConfig};
use ner_extractor::NerService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let ner = NerService::from_config(&config).context("Failed to initialize NER service")?;
    tracing::info!(
        backend = ner.backend_name(),
        model = %config.model_path.display(),
        "NER service initialized"
    );

    let addr = config.listen_addr();
    let state = Arc::new(AppState::new(config, ner));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("ner_api={0},ner_extractor={0},tower_http={0}", logging.level).into()
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
