//! Extracted-entity model and flattening.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RawFieldBag;

/// Extraction errors.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid response format: {0}")]
    InvalidFormat(String),

    #[error("extraction service error: {0}")]
    Service(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// One entity reported by the field-extraction service.
///
/// Entities may nest: a table row entity carries its cells as `properties`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedEntity {
    /// Field label assigned by the extractor (free vocabulary).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Raw text matched in the document.
    pub mention_text: String,
    /// Post-processed value, when the service produced one.
    pub normalized_value: Option<NormalizedValue>,
    /// Nested child entities.
    pub properties: Vec<ExtractedEntity>,
}

/// Normalized form of an entity value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedValue {
    pub text: String,
}

impl ExtractedEntity {
    /// Leaf entity with a type and mention text only.
    pub fn new(entity_type: &str, mention_text: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            mention_text: mention_text.to_string(),
            ..Self::default()
        }
    }

    /// Best available value: normalized text when present, raw mention
    /// otherwise. Always trimmed.
    pub fn value(&self) -> &str {
        if let Some(nv) = &self.normalized_value {
            let text = nv.text.trim();
            if !text.is_empty() {
                return text;
            }
        }
        self.mention_text.trim()
    }
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    document: ResponseDocument,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponseDocument {
    entities: Vec<ExtractedEntity>,
}

/// Decode a raw service response into entities.
///
/// Tolerates leading/trailing non-JSON noise around the payload.
pub fn parse_process_response(raw: &str) -> ExtractionResult<Vec<ExtractedEntity>> {
    let start = raw
        .find('{')
        .ok_or_else(|| ExtractionError::InvalidFormat("no JSON object found in response".into()))?;
    let end = raw
        .rfind('}')
        .ok_or_else(|| ExtractionError::InvalidFormat("no closing brace found in response".into()))?;

    let response: ProcessResponse = serde_json::from_str(&raw[start..=end])?;
    Ok(response.document.entities)
}

/// Flatten entities (including all nested children) into one flat bag.
///
/// Traversal is iterative with an explicit work stack, so pathological
/// nesting depth cannot overflow the call stack. Entities with an empty type
/// or empty value are skipped; child keys participate exactly like top-level
/// keys. Within one response a repeated key keeps the last value seen, in
/// document order.
pub fn entities_to_bag(entities: &[ExtractedEntity]) -> RawFieldBag {
    let mut bag = RawFieldBag::new();
    let mut stack: Vec<&ExtractedEntity> = entities.iter().rev().collect();

    while let Some(entity) = stack.pop() {
        for child in entity.properties.iter().rev() {
            stack.push(child);
        }

        let key = entity.entity_type.trim();
        if key.is_empty() {
            continue;
        }
        let value = entity.value();
        if value.is_empty() {
            continue;
        }
        bag.insert(key.to_string(), value.to_string());
    }

    bag
}
