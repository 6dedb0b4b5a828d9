//! Report model and request-scoped value types.

use serde::{Deserialize, Serialize};

use neuroreport_extract::RawFieldBag;

use super::CanonicalFieldBag;

/// One file submitted for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn pdf(filename: &str, content: Vec<u8>) -> Self {
        Self {
            filename: filename.to_string(),
            content,
            mime_type: "application/pdf".to_string(),
        }
    }
}

/// Per-file processing outcome, collected in submission order.
///
/// A failed file contributes no fields to the merge but never aborts the
/// request; the failure reason is carried here instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileOutcome {
    pub filename: String,
    /// Object-store URI of the stored upload.
    pub uri: Option<String>,
    pub result: Result<RawFieldBag, String>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A derived score together with its categorical interpretation.
///
/// `score` is `None` when the underlying field was absent; the
/// interpretation then carries the not-applicable marker instead of a label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub score: Option<i64>,
    pub interpretation: String,
}

/// Which clinical tests the uploaded documents contained.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestsDetected {
    pub vng: bool,
    pub ctsib: bool,
    pub cognitive: bool,
}

/// Patient identity fields, resolved from overrides and extracted values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientInfo {
    pub name: String,
    /// Date of birth, `MM/DD/YYYY` when extracted cleanly.
    pub dob: String,
    /// Date of injury.
    pub doi: String,
    /// Date of service/testing.
    pub dos: String,
    pub sex: String,
    /// Computed from `dob`; `None` when the date does not parse.
    pub age: Option<i64>,
}

/// One cognitive domain's aggregation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalDomain {
    pub name: String,
    /// Constituent task percentiles in fixed task order; `None` = field absent.
    pub task_percentiles: Vec<Option<i64>>,
    /// Tasks with actual data: present and greater than zero.
    pub actual_count: usize,
    pub impaired: bool,
}

/// Complete data model handed to the rendering/storage collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportModel {
    pub patient: PatientInfo,
    pub tests: TestsDetected,

    // Oculomotor
    pub pursuits: ScoreEntry,
    pub saccades: ScoreEntry,
    pub fixations: ScoreEntry,
    pub dysfunctional_scale: ScoreEntry,

    // Posturography percentiles
    pub standard_percentile: ScoreEntry,
    pub proprioception_percentile: ScoreEntry,
    pub visual_percentile: ScoreEntry,
    pub vestibular_percentile: ScoreEntry,

    // Screening scales
    pub rpq: ScoreEntry,
    pub pcl_5: ScoreEntry,
    pub psqi: ScoreEntry,
    pub phq_9: ScoreEntry,
    pub gad_7: ScoreEntry,

    /// Cognitive-domain impairment results, in fixed domain order.
    pub domains: Vec<ClinicalDomain>,

    /// Full merged field set (canonical keys plus raw spellings).
    pub fields: CanonicalFieldBag,
}

/// Persisted report record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredReport {
    pub report_id: String,
    pub created_at: String,
    pub source_files: Vec<String>,
    pub patient: PatientInfo,
    pub tests: TestsDetected,
    pub fields: CanonicalFieldBag,
    /// Rendered report HTML, when the caller rendered one.
    pub report_html: Option<String>,
    /// Object-store URI of the generated PDF, when one was produced.
    pub pdf_uri: Option<String>,
}

impl StoredReport {
    /// Build a record for a freshly assembled report.
    pub fn new(model: &ReportModel, source_files: Vec<String>) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            source_files,
            patient: model.patient.clone(),
            tests: model.tests,
            fields: model.fields.clone(),
            report_html: None,
            pdf_uri: None,
        }
    }
}
