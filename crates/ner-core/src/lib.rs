//! NER Core - Shared domain types for the NER service
//!
//! Entity records, tag categories, configuration and the error type
//! used by the extractor, the HTTP server and the CLI.
//!
//! Author: hephaex@gmail.com

pub mod config;
pub mod types;
pub mod version;

pub use config::{AppConfig, Backend, ConfigError};
pub use types::{format_score, Entity, EntityCategory, ExtractRequest, ExtractResponse};
pub use version::{build_info, BuildInfo, SERVICE_NAME, VERSION};

use std::path::PathBuf;

// ============================================================================
// Error Types
// ============================================================================

/// NER service error type
#[derive(Debug, thiserror::Error)]
pub enum NerError {
    #[error("Failed to load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NerError>;
