//! Report assembly.
//!
//! Composes the canonical field set into the [`ReportModel`] handed to the
//! rendering/storage collaborators: resolves patient identity, derives
//! test-presence flags from key existence, and wires every present score
//! through the interpretation engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domains;
use crate::interpret::{interpret, Scale, NOT_APPLICABLE, RPQ_MAX_SCORE};
use crate::models::{
    keys, CanonicalFieldBag, PatientInfo, ReportModel, ScoreEntry, TestsDetected,
    COGNITIVE_TASK_KEYS, OCULOMOTOR_KEYS, POSTUROGRAPHY_KEYS, SCREENING_KEYS,
};
use crate::parse::{parse_int, parse_percentile, parse_score_with_total, repair_concatenated_denominator};

/// Date format patient demographics arrive in.
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Caller-supplied demographic overrides. An override always beats the
/// extracted value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientOverrides {
    pub patient_name: Option<String>,
    pub dob: Option<String>,
    pub doi: Option<String>,
    pub dos: Option<String>,
    pub sex: Option<String>,
}

/// Build the full report model from the merged field set.
pub fn assemble(fields: &CanonicalFieldBag, overrides: &PatientOverrides) -> ReportModel {
    let patient = resolve_patient(fields, overrides);
    let tests = detect_tests(fields);

    ReportModel {
        patient,
        tests,

        pursuits: dysfunction_entry(fields, keys::PURSUITS_SCORE),
        saccades: dysfunction_entry(fields, keys::SACCADES_SCORE),
        fixations: dysfunction_entry(fields, keys::FIXATIONS_SCORE),
        dysfunctional_scale: dysfunction_entry(fields, keys::DYSFUNCTIONAL_SCALE),

        standard_percentile: percentile_entry(fields, keys::STANDARD_SCORE_PERCENTILE),
        proprioception_percentile: percentile_entry(fields, keys::PROPRIOCEPTION_SCORE_PERCENTILE),
        visual_percentile: percentile_entry(fields, keys::VISUAL_SCORE_PERCENTILE),
        vestibular_percentile: percentile_entry(fields, keys::VESTIBULAR_SCORE_PERCENTILE),

        rpq: rpq_entry(fields),
        pcl_5: screen_entry(fields, keys::PCL_5_SCORE, Scale::Pcl5),
        psqi: screen_entry(fields, keys::PSQI_SCORE, Scale::Psqi),
        phq_9: screen_entry(fields, keys::PHQ_9_SCORE, Scale::Phq9),
        gad_7: screen_entry(fields, keys::GAD_7_SCORE, Scale::Gad7),

        domains: domains::aggregate(fields),
        fields: fields.clone(),
    }
}

/// Test presence is decided purely by canonical-key existence.
pub fn detect_tests(fields: &CanonicalFieldBag) -> TestsDetected {
    TestsDetected {
        vng: fields.has_any(&OCULOMOTOR_KEYS),
        ctsib: fields.has_any(&POSTUROGRAPHY_KEYS),
        cognitive: fields.has_any(&SCREENING_KEYS) || fields.has_any(&COGNITIVE_TASK_KEYS),
    }
}

/// Age in whole years at `today`, or `None` when `dob` does not parse.
pub fn compute_age(dob: &str, today: NaiveDate) -> Option<i64> {
    let birth = NaiveDate::parse_from_str(dob.trim(), DATE_FORMAT).ok()?;
    Some((today - birth).num_days() / 365)
}

fn resolve_patient(fields: &CanonicalFieldBag, overrides: &PatientOverrides) -> PatientInfo {
    let field = |key: &str, over: &Option<String>| -> String {
        over.as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| fields.get(key))
            .unwrap_or_default()
            .to_string()
    };

    let dob = field(keys::DOB, &overrides.dob);
    let age = compute_age(&dob, chrono::Utc::now().date_naive());

    PatientInfo {
        name: field(keys::PATIENT_NAME, &overrides.patient_name),
        doi: field(keys::DOI, &overrides.doi),
        dos: field(keys::DOS, &overrides.dos),
        sex: field(keys::SEX, &overrides.sex),
        dob,
        age,
    }
}

/// Entry for an absent field: no score, not-applicable marker.
fn absent() -> ScoreEntry {
    ScoreEntry {
        score: None,
        interpretation: NOT_APPLICABLE.to_string(),
    }
}

fn dysfunction_entry(fields: &CanonicalFieldBag, key: &str) -> ScoreEntry {
    match fields.get(key) {
        Some(value) => {
            let score = parse_int(Some(value), 0);
            ScoreEntry {
                score: Some(score),
                interpretation: interpret(score, Scale::Dysfunction).to_string(),
            }
        }
        None => absent(),
    }
}

fn percentile_entry(fields: &CanonicalFieldBag, key: &str) -> ScoreEntry {
    match fields.get(key) {
        Some(value) => {
            let score = parse_percentile(Some(value));
            ScoreEntry {
                score: Some(score),
                interpretation: interpret(score, Scale::Posturography).to_string(),
            }
        }
        None => absent(),
    }
}

fn screen_entry(fields: &CanonicalFieldBag, key: &str, scale: Scale) -> ScoreEntry {
    match fields.get(key) {
        Some(value) => {
            let score = parse_score_with_total(Some(value), 0);
            ScoreEntry {
                score: Some(score),
                interpretation: interpret(score, scale).to_string(),
            }
        }
        None => absent(),
    }
}

/// RPQ carries the concatenated-denominator OCR repair: a parsed value over
/// the scale maximum means "numerator/64" was read as one digit run.
fn rpq_entry(fields: &CanonicalFieldBag) -> ScoreEntry {
    match fields.get(keys::RPQ_SCORE) {
        Some(value) => {
            let mut score = parse_score_with_total(Some(value), 0);
            if score > RPQ_MAX_SCORE {
                score = repair_concatenated_denominator(score, RPQ_MAX_SCORE, RPQ_MAX_SCORE);
            }
            ScoreEntry {
                score: Some(score),
                interpretation: interpret(score, Scale::Rpq).to_string(),
            }
        }
        None => absent(),
    }
}
