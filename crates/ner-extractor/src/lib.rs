//! NER Extractor - Named entity extraction backends
//!
//! Wraps a statistical NER engine behind the [`EntityExtractor`] trait and
//! adapts its raw detections to [`ner_core::Entity`] records.
//!
//! Backends:
//! - MITIE: native model binding (feature `mitie`)
//! - Rule-based: Spanish gazetteer + capitalization heuristics

use ner_core::Result;
use serde::{Deserialize, Serialize};

/// A detection as reported by a backend, before tag remapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Backend tag code (MITIE: 0 LOC, 1 ORG, 2 PER, 3 MISC)
    pub code: u64,
    /// Backend tag name, when the backend exposes one
    pub tag_name: Option<String>,
    /// Confidence reported by the backend
    pub score: f64,
    /// Tokens covered by the detection
    pub tokens: Vec<String>,
}

impl RawDetection {
    /// Surface text, tokens joined with single spaces
    pub fn label(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Trait for entity extractors
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<RawDetection>>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

pub mod fixtures;
#[cfg(feature = "mitie")]
pub mod mitie;
pub mod rules;
pub mod service;
pub mod tokenizer;

#[cfg(feature = "mitie")]
pub use mitie::MitieExtractor;
pub use rules::RuleBasedExtractor;
pub use service::NerService;
