//! Build information

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current service version
pub const VERSION: &str = "1.0.1";

/// Service name reported by health and version endpoints
pub const SERVICE_NAME: &str = "ner-service";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BuildInfo {
    pub version: String,
    pub service: String,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION.to_string(),
        service: SERVICE_NAME.to_string(),
    }
}
