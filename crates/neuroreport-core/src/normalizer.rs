//! Field-name normalization and multi-source merge.
//!
//! Handles:
//! - Key normalization (casing/spacing/punctuation variants collapse onto one
//!   lookup key)
//! - Alias expansion (extractor vocabulary → canonical field names)
//! - First-writer-wins merge of per-file bags into the patient field set

use std::collections::BTreeMap;

use neuroreport_extract::RawFieldBag;

use crate::models::{keys, CanonicalFieldBag};

/// Normalize an extractor-reported key: lowercase, all non-alphanumeric
/// characters stripped. Idempotent.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Maps extractor key spellings onto the canonical vocabulary and merges
/// per-file bags into the accumulated patient field set.
pub struct FieldNormalizer {
    /// Alias table: normalized key → canonical key. Ordered so that two
    /// variant spellings of one canonical field arriving in the same bag
    /// resolve deterministically.
    aliases: BTreeMap<String, String>,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldNormalizer {
    /// Create a normalizer with the default alias table.
    pub fn new() -> Self {
        Self {
            aliases: Self::default_aliases(),
        }
    }

    /// Build a normalizer from an externally-maintained table of
    /// variant-spelling → canonical-key entries. Variant keys are normalized
    /// on the way in, so the table may be written in natural spelling.
    pub fn from_aliases(table: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut normalizer = Self {
            aliases: BTreeMap::new(),
        };
        for (variant, canonical) in table {
            normalizer.add_alias(&variant, &canonical);
        }
        normalizer
    }

    /// Load an alias table from JSON (`{"variant": "canonical_key", ...}`).
    /// New OCR vocabulary variants are additive data, not code changes.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let table: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_aliases(table))
    }

    /// Register one extra alias.
    pub fn add_alias(&mut self, variant: &str, canonical: &str) {
        self.aliases
            .insert(normalize_key(variant), canonical.to_string());
    }

    /// Merge one file's extracted bag into the accumulated field set.
    ///
    /// Raw keys are retained verbatim (traceability channel); alias hits
    /// additionally write the canonical key. Both writes are first-writer-wins
    /// across files and chunks, and empty values are never written, so
    /// repeated merges are idempotent once all aliases are exhausted.
    pub fn merge(&self, target: &mut CanonicalFieldBag, incoming: &RawFieldBag) {
        for (key, value) in incoming {
            target.insert_if_absent(key, value);
        }

        // Normalized view of the incoming bag. Raw spellings are visited in
        // sorted order so collisions onto one normalized key are stable.
        let mut view: BTreeMap<String, &str> = BTreeMap::new();
        let mut entries: Vec<(&String, &String)> = incoming.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            if value.is_empty() {
                continue;
            }
            view.entry(normalize_key(key)).or_insert(value.as_str());
        }

        for (variant, canonical) in &self.aliases {
            if let Some(value) = view.get(variant) {
                target.insert_if_absent(canonical, value);
            }
        }
    }

    /// Default alias table covering the OCR vocabulary observed across
    /// RightEye, CTSIB/BTrackS and Creyos documents.
    fn default_aliases() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        let mut add = |variant: &str, canonical: &str| {
            map.insert(variant.to_string(), canonical.to_string());
        };

        // RightEye / oculomotor
        add("pursuits", keys::PURSUITS_SCORE);
        add("pursuitsscore", keys::PURSUITS_SCORE);
        add("saccades", keys::SACCADES_SCORE);
        add("saccadesscore", keys::SACCADES_SCORE);
        add("fixations", keys::FIXATIONS_SCORE);
        add("fixationsscore", keys::FIXATIONS_SCORE);
        add("eyeq", keys::DYSFUNCTIONAL_SCALE);
        add("eyeqscore", keys::DYSFUNCTIONAL_SCALE);
        add("dysfunctionalscale", keys::DYSFUNCTIONAL_SCALE);
        add("dysfunctionscale", keys::DYSFUNCTIONAL_SCALE);

        // CTSIB / BTrackS path lengths (cm)
        add("standard", keys::STANDARD_PATH_LENGTH);
        add("standardscore", keys::STANDARD_PATH_LENGTH);
        add("standardpathlength", keys::STANDARD_PATH_LENGTH);
        add("proprioception", keys::PROPRIOCEPTION_PATH_LENGTH);
        add("proprioceptionscore", keys::PROPRIOCEPTION_PATH_LENGTH);
        add("proprioceptionpathlength", keys::PROPRIOCEPTION_PATH_LENGTH);
        add("visual", keys::VISUAL_PATH_LENGTH);
        add("visualscore", keys::VISUAL_PATH_LENGTH);
        add("visualpathlength", keys::VISUAL_PATH_LENGTH);
        add("vestibular", keys::VESTIBULAR_PATH_LENGTH);
        add("vestibularscore", keys::VESTIBULAR_PATH_LENGTH);
        add("vestibularpathlength", keys::VESTIBULAR_PATH_LENGTH);
        // Abbreviated column headers from the baseline results table
        add("std", keys::STANDARD_PATH_LENGTH);
        add("pro", keys::PROPRIOCEPTION_PATH_LENGTH);
        add("vis", keys::VISUAL_PATH_LENGTH);
        add("ves", keys::VESTIBULAR_PATH_LENGTH);

        // CTSIB / BTrackS percentiles (what the report interprets)
        add("standardpercentile", keys::STANDARD_SCORE_PERCENTILE);
        add("standardscorepercentile", keys::STANDARD_SCORE_PERCENTILE);
        add("stdpercentile", keys::STANDARD_SCORE_PERCENTILE);
        add("baselinestandardpercentile", keys::STANDARD_SCORE_PERCENTILE);
        add("percentile1", keys::STANDARD_SCORE_PERCENTILE);
        add("proprioceptionpercentile", keys::PROPRIOCEPTION_SCORE_PERCENTILE);
        add("proprioceptionscorepercentile", keys::PROPRIOCEPTION_SCORE_PERCENTILE);
        add("propercentile", keys::PROPRIOCEPTION_SCORE_PERCENTILE);
        add("baselineproprioceptionpercentile", keys::PROPRIOCEPTION_SCORE_PERCENTILE);
        add("percentile2", keys::PROPRIOCEPTION_SCORE_PERCENTILE);
        add("visualpercentile", keys::VISUAL_SCORE_PERCENTILE);
        add("visualscorepercentile", keys::VISUAL_SCORE_PERCENTILE);
        add("vispercentile", keys::VISUAL_SCORE_PERCENTILE);
        add("baselinevisualpercentile", keys::VISUAL_SCORE_PERCENTILE);
        add("percentile3", keys::VISUAL_SCORE_PERCENTILE);
        add("vestibularpercentile", keys::VESTIBULAR_SCORE_PERCENTILE);
        add("vestibularscorepercentile", keys::VESTIBULAR_SCORE_PERCENTILE);
        add("vespercentile", keys::VESTIBULAR_SCORE_PERCENTILE);
        add("baselinevestibularpercentile", keys::VESTIBULAR_SCORE_PERCENTILE);
        add("percentile4", keys::VESTIBULAR_SCORE_PERCENTILE);

        // Creyos screening scales
        add("rpq", keys::RPQ_SCORE);
        add("rpqscore", keys::RPQ_SCORE);
        add("pcl", keys::PCL_5_SCORE);
        add("pcl5", keys::PCL_5_SCORE);
        add("pcl5score", keys::PCL_5_SCORE);
        add("psqi", keys::PSQI_SCORE);
        add("psqiscore", keys::PSQI_SCORE);
        add("phq", keys::PHQ_9_SCORE);
        add("phq9", keys::PHQ_9_SCORE);
        add("phq9score", keys::PHQ_9_SCORE);
        add("gad", keys::GAD_7_SCORE);
        add("gad7", keys::GAD_7_SCORE);
        add("gad7score", keys::GAD_7_SCORE);

        // Creyos task percentiles
        add("attention", keys::ATTENTION_PERCENTILE);
        add("attentionpercentile", keys::ATTENTION_PERCENTILE);
        add("deductivereasoning", keys::DEDUCTIVE_REASONING_PERCENTILE);
        add("deductivereasoningpercentile", keys::DEDUCTIVE_REASONING_PERCENTILE);
        add("episodicmemory", keys::EPISODIC_MEMORY_PERCENTILE);
        add("episodicmemorypercentile", keys::EPISODIC_MEMORY_PERCENTILE);
        add("mentalrotation", keys::MENTAL_ROTATION_PERCENTILE);
        add("mentalrotationpercentile", keys::MENTAL_ROTATION_PERCENTILE);
        add("planning", keys::PLANNING_PERCENTILE);
        add("planningpercentile", keys::PLANNING_PERCENTILE);
        add("polygons", keys::POLYGONS_PERCENTILE);
        add("polygonspercentile", keys::POLYGONS_PERCENTILE);
        add("responseinhibition", keys::RESPONSE_INHIBITION_PERCENTILE);
        add("responseinhibitionpercentile", keys::RESPONSE_INHIBITION_PERCENTILE);
        add("spatialshorttermmemory", keys::SPATIAL_STM_PERCENTILE);
        add("spatialshorttermmemorypercentile", keys::SPATIAL_STM_PERCENTILE);
        add("verbalreasoning", keys::VERBAL_REASONING_PERCENTILE);
        add("verbalreasoningpercentile", keys::VERBAL_REASONING_PERCENTILE);
        add("verbalshorttermmemory", keys::VERBAL_STM_PERCENTILE);
        add("verbalshorttermmemorypercentile", keys::VERBAL_STM_PERCENTILE);
        add("visuospatialworkingmemory", keys::VISUOSPATIAL_WM_PERCENTILE);
        add("visuospatialworkingmemorypercentile", keys::VISUOSPATIAL_WM_PERCENTILE);
        add("workingmemory", keys::WORKING_MEMORY_PERCENTILE);
        add("workingmemorypercentile", keys::WORKING_MEMORY_PERCENTILE);

        // Patient demographics
        add("patientname", keys::PATIENT_NAME);
        add("patientfullname", keys::PATIENT_NAME);
        add("name", keys::PATIENT_NAME);
        add("dob", keys::DOB);
        add("dateofbirth", keys::DOB);
        add("birthdate", keys::DOB);
        add("doi", keys::DOI);
        add("dateofinjury", keys::DOI);
        add("injurydate", keys::DOI);
        add("dos", keys::DOS);
        add("dateoftesting", keys::DOS);
        add("dateofservice", keys::DOS);
        add("assessmentdate", keys::DOS);
        add("sex", keys::SEX);
        add("gender", keys::SEX);
        add("patientsex", keys::SEX);

        map
    }
}
