//! Entity records and tag categories
//!
//! Author: hephaex@gmail.com

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A recognized named entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Entity {
    /// Category string (PERSON, LOCATION, ORGANIZATION, MISC)
    pub tag: String,
    /// Confidence formatted with six decimal places
    pub score: String,
    /// Surface text of the entity
    pub label: String,
}

impl Entity {
    pub fn new(category: EntityCategory, score: f64, label: impl Into<String>) -> Self {
        Self {
            tag: category.to_string(),
            score: format_score(score),
            label: label.into(),
        }
    }

    /// True when tag, score and label are all present
    pub fn is_complete(&self) -> bool {
        !self.tag.is_empty() && !self.score.is_empty() && !self.label.is_empty()
    }
}

/// Extraction request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Text to analyze
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

impl ExtractRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whitespace-only text counts as missing
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Treat `"text": null` like a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wrapped list of entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractResponse {
    pub entities: Vec<Entity>,
}

/// The four categories reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Location,
    Organization,
    Person,
    Misc,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 4] = [
        Self::Person,
        Self::Location,
        Self::Organization,
        Self::Misc,
    ];

    /// Map a MITIE tag code to a category.
    ///
    /// The Spanish models are trained with LOC, ORG, PER and MISC in that
    /// order; anything outside the table is reported as MISC.
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Location,
            1 => Self::Organization,
            2 => Self::Person,
            _ => Self::Misc,
        }
    }

    /// Inverse of [`EntityCategory::from_code`]
    pub fn code(&self) -> u64 {
        match self {
            Self::Location => 0,
            Self::Organization => 1,
            Self::Person => 2,
            Self::Misc => 3,
        }
    }

    /// Map a tag name such as `LOC` or `PERSON` to a category
    pub fn from_tag_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "LOC" | "LOCATION" => Self::Location,
            "ORG" | "ORGANIZATION" => Self::Organization,
            "PER" | "PERSON" => Self::Person,
            _ => Self::Misc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "LOCATION",
            Self::Organization => "ORGANIZATION",
            Self::Person => "PERSON",
            Self::Misc => "MISC",
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render a confidence value with six fixed decimal places
pub fn format_score(score: f64) -> String {
    format!("{score:.6}")
}
