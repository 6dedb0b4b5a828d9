//! Canonical field bag and the canonical key vocabulary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical field names the rest of the system understands.
///
/// Extractor-reported spellings are mapped onto these by the normalizer;
/// everything downstream (presence flags, interpretation, persistence) reads
/// only this vocabulary.
pub mod keys {
    // Oculomotor (VNG / RightEye)
    pub const PURSUITS_SCORE: &str = "pursuits_score";
    pub const SACCADES_SCORE: &str = "saccades_score";
    pub const FIXATIONS_SCORE: &str = "fixations_score";
    pub const DYSFUNCTIONAL_SCALE: &str = "dysfunctional_scale";

    // Posturography (CTSIB / BTrackS) path lengths, cm
    pub const STANDARD_PATH_LENGTH: &str = "standard_path_length";
    pub const PROPRIOCEPTION_PATH_LENGTH: &str = "proprioception_path_length";
    pub const VISUAL_PATH_LENGTH: &str = "visual_path_length";
    pub const VESTIBULAR_PATH_LENGTH: &str = "vestibular_path_length";

    // Posturography percentiles
    pub const STANDARD_SCORE_PERCENTILE: &str = "standard_score_percentile";
    pub const PROPRIOCEPTION_SCORE_PERCENTILE: &str = "proprioception_score_percentile";
    pub const VISUAL_SCORE_PERCENTILE: &str = "visual_score_percentile";
    pub const VESTIBULAR_SCORE_PERCENTILE: &str = "vestibular_score_percentile";

    // Neuropsychiatric screening scales
    pub const RPQ_SCORE: &str = "rpq_score";
    pub const PCL_5_SCORE: &str = "pcl_5_score";
    pub const PSQI_SCORE: &str = "psqi_score";
    pub const PHQ_9_SCORE: &str = "phq_9_score";
    pub const GAD_7_SCORE: &str = "gad_7_score";

    // Cognitive-task percentiles
    pub const ATTENTION_PERCENTILE: &str = "attention_percentile";
    pub const DEDUCTIVE_REASONING_PERCENTILE: &str = "deductive_reasoning_percentile";
    pub const EPISODIC_MEMORY_PERCENTILE: &str = "episodic_memory_percentile";
    pub const MENTAL_ROTATION_PERCENTILE: &str = "mental_rotation_percentile";
    pub const PLANNING_PERCENTILE: &str = "planning_percentile";
    pub const POLYGONS_PERCENTILE: &str = "polygons_percentile";
    pub const RESPONSE_INHIBITION_PERCENTILE: &str = "response_inhibition_percentile";
    pub const SPATIAL_STM_PERCENTILE: &str = "spatial_short_term_memory_percentile";
    pub const VERBAL_REASONING_PERCENTILE: &str = "verbal_reasoning_percentile";
    pub const VERBAL_STM_PERCENTILE: &str = "verbal_short_term_memory_percentile";
    pub const VISUOSPATIAL_WM_PERCENTILE: &str = "visuospatial_working_memory_percentile";
    pub const WORKING_MEMORY_PERCENTILE: &str = "working_memory_percentile";

    // Patient demographics
    pub const PATIENT_NAME: &str = "patient_name";
    pub const DOB: &str = "dob";
    pub const DOI: &str = "doi";
    pub const DOS: &str = "dos";
    pub const SEX: &str = "sex";
}

/// Oculomotor keys that mark a VNG test as present.
pub const OCULOMOTOR_KEYS: [&str; 3] = [
    keys::PURSUITS_SCORE,
    keys::SACCADES_SCORE,
    keys::FIXATIONS_SCORE,
];

/// Posturography keys that mark a CTSIB/BTrackS test as present.
pub const POSTUROGRAPHY_KEYS: [&str; 8] = [
    keys::STANDARD_SCORE_PERCENTILE,
    keys::PROPRIOCEPTION_SCORE_PERCENTILE,
    keys::VISUAL_SCORE_PERCENTILE,
    keys::VESTIBULAR_SCORE_PERCENTILE,
    keys::STANDARD_PATH_LENGTH,
    keys::PROPRIOCEPTION_PATH_LENGTH,
    keys::VISUAL_PATH_LENGTH,
    keys::VESTIBULAR_PATH_LENGTH,
];

/// Screening-scale keys that mark a cognitive battery as present.
pub const SCREENING_KEYS: [&str; 5] = [
    keys::RPQ_SCORE,
    keys::PCL_5_SCORE,
    keys::PSQI_SCORE,
    keys::PHQ_9_SCORE,
    keys::GAD_7_SCORE,
];

/// Cognitive-task percentile keys; any of these also marks the battery.
pub const COGNITIVE_TASK_KEYS: [&str; 12] = [
    keys::ATTENTION_PERCENTILE,
    keys::DEDUCTIVE_REASONING_PERCENTILE,
    keys::EPISODIC_MEMORY_PERCENTILE,
    keys::MENTAL_ROTATION_PERCENTILE,
    keys::PLANNING_PERCENTILE,
    keys::POLYGONS_PERCENTILE,
    keys::RESPONSE_INHIBITION_PERCENTILE,
    keys::SPATIAL_STM_PERCENTILE,
    keys::VERBAL_REASONING_PERCENTILE,
    keys::VERBAL_STM_PERCENTILE,
    keys::VISUOSPATIAL_WM_PERCENTILE,
    keys::WORKING_MEMORY_PERCENTILE,
];

/// Accumulated field set for one patient/report.
///
/// Holds both canonical keys and the verbatim raw spellings (kept for
/// traceability). Writes go through [`insert_if_absent`]: the earliest value
/// seen for a key is retained across files and chunks, and later values for
/// the same key are discarded.
///
/// [`insert_if_absent`]: CanonicalFieldBag::insert_if_absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalFieldBag {
    fields: BTreeMap<String, String>,
}

impl CanonicalFieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key` only when the key is not yet present and
    /// the value is non-empty. Returns whether the value was written.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        if value.is_empty() || self.fields.contains_key(key) {
            return false;
        }
        self.fields.insert(key.to_string(), value.to_string());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Whether any of the given keys is present.
    pub fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.fields.contains_key(*k))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_absent_first_writer_wins() {
        let mut bag = CanonicalFieldBag::new();

        assert!(bag.insert_if_absent(keys::RPQ_SCORE, "27"));
        assert!(!bag.insert_if_absent(keys::RPQ_SCORE, "99"));
        assert_eq!(bag.get(keys::RPQ_SCORE), Some("27"));
    }

    #[test]
    fn test_insert_if_absent_rejects_empty_value() {
        let mut bag = CanonicalFieldBag::new();

        assert!(!bag.insert_if_absent(keys::RPQ_SCORE, ""));
        assert!(bag.is_empty());
    }

    #[test]
    fn test_has_any() {
        let mut bag = CanonicalFieldBag::new();
        bag.insert_if_absent(keys::SACCADES_SCORE, "60");

        assert!(bag.has_any(&OCULOMOTOR_KEYS));
        assert!(!bag.has_any(&SCREENING_KEYS));
    }

    #[test]
    fn test_serializes_with_stable_key_order() {
        let mut bag = CanonicalFieldBag::new();
        bag.insert_if_absent("b", "2");
        bag.insert_if_absent("a", "1");

        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"fields":{"a":"1","b":"2"}}"#);
    }
}
