//! NER service adapter
//!
//! Runs a backend and turns its raw detections into client-facing
//! [`Entity`] records: tag codes become category strings, scores get six
//! decimal places, and labels are the covered tokens joined by spaces.

use std::path::Path;
use std::sync::Arc;

use ner_core::config::{AppConfig, Backend};
use ner_core::{Entity, EntityCategory, NerError, Result};

use crate::{EntityExtractor, RawDetection, RuleBasedExtractor};

/// Long-lived extraction service, cheap to clone
#[derive(Clone)]
pub struct NerService {
    extractor: Arc<dyn EntityExtractor>,
}

impl NerService {
    /// Open a MITIE model
    #[cfg(feature = "mitie")]
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        let extractor = crate::MitieExtractor::load(model_path)?;
        Ok(Self::with_extractor(Arc::new(extractor)))
    }

    /// Open a MITIE model
    #[cfg(not(feature = "mitie"))]
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self> {
        Err(NerError::BackendUnavailable(format!(
            "cannot load {}: built without the `mitie` feature",
            model_path.as_ref().display()
        )))
    }

    /// Build the backend selected in configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.backend {
            Backend::Mitie => Self::new(&config.model_path),
            Backend::Rules => Ok(Self::rule_based()),
        }
    }

    /// Service over the built-in Spanish rules
    pub fn rule_based() -> Self {
        Self::with_extractor(Arc::new(RuleBasedExtractor::new()))
    }

    pub fn with_extractor(extractor: Arc<dyn EntityExtractor>) -> Self {
        Self { extractor }
    }

    pub fn backend_name(&self) -> &'static str {
        self.extractor.name()
    }

    /// Extract entities from text
    ///
    /// Blank text yields no entities without calling the backend.
    pub fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let detections = self.extractor.extract(text).map_err(|e| match e {
            NerError::InvalidInput(msg) => NerError::InvalidInput(msg),
            other => NerError::Extraction(format!("failed to extract entities: {other}")),
        })?;

        tracing::debug!(
            backend = self.backend_name(),
            count = detections.len(),
            "Extracted entities"
        );

        Ok(detections.into_iter().map(to_entity).collect())
    }
}

impl std::fmt::Debug for NerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NerService")
            .field("backend", &self.backend_name())
            .finish()
    }
}

fn to_entity(detection: RawDetection) -> Entity {
    Entity::new(
        EntityCategory::from_code(detection.code),
        detection.score,
        detection.label(),
    )
}
