//! Per-request report pipeline.
//!
//! Coordinates the full flow for one upload request: store each file, run
//! chunk-aware extraction, merge the resulting bags into the canonical field
//! set in submission order, then assemble the report model. The field set is
//! exclusively owned by the call; nothing here is shared across requests.

use thiserror::Error;
use tracing::{info, warn};

use neuroreport_extract::{extract_fields, DocumentExtractor};

use crate::assembler::{assemble, PatientOverrides};
use crate::models::{CanonicalFieldBag, FileOutcome, ReportModel, UploadedFile};
use crate::normalizer::FieldNormalizer;
use crate::storage::{ObjectStore, StorageError};

/// Pipeline errors. Only collaborator-connectivity failures are fatal;
/// per-file extraction problems are carried in the outcome list instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("object store error: {0}")]
    Storage(#[from] StorageError),

    #[error("no files to process")]
    NoFiles,
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result of one upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReport {
    pub model: ReportModel,
    /// Per-file outcomes, in submission order.
    pub file_outcomes: Vec<FileOutcome>,
    /// URI of the first successfully stored upload.
    pub first_uri: Option<String>,
}

impl ProcessedReport {
    pub fn source_files(&self) -> Vec<String> {
        self.file_outcomes.iter().map(|o| o.filename.clone()).collect()
    }
}

/// Full processing pipeline for one request.
pub struct ReportPipeline<E, S> {
    extractor: E,
    objects: S,
    normalizer: FieldNormalizer,
}

impl<E: DocumentExtractor, S: ObjectStore> ReportPipeline<E, S> {
    pub fn new(extractor: E, objects: S) -> Self {
        Self {
            extractor,
            objects,
            normalizer: FieldNormalizer::new(),
        }
    }

    /// Use a custom normalizer (e.g. one loaded from an external alias table).
    pub fn with_normalizer(mut self, normalizer: FieldNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Process one upload request into a report model.
    ///
    /// Files are handled one at a time in submission order. A file whose
    /// extraction fails contributes no fields but does not abort the request;
    /// an object-store failure does, since nothing can proceed without it.
    pub fn process(
        &self,
        files: &[UploadedFile],
        overrides: &PatientOverrides,
    ) -> PipelineResult<ProcessedReport> {
        if files.is_empty() {
            return Err(PipelineError::NoFiles);
        }

        let mut merged = CanonicalFieldBag::new();
        let mut file_outcomes = Vec::with_capacity(files.len());
        let mut first_uri = None;

        for file in files {
            let uri = self.objects.put(&file.content, &file.filename)?;
            if first_uri.is_none() {
                first_uri = Some(uri.clone());
            }

            let result = match extract_fields(&self.extractor, &file.content, &file.mime_type) {
                Ok(bag) => {
                    info!(
                        filename = %file.filename,
                        fields = bag.len(),
                        "extracted fields from file"
                    );
                    self.normalizer.merge(&mut merged, &bag);
                    Ok(bag)
                }
                Err(e) => {
                    warn!(filename = %file.filename, error = %e, "extraction failed for file");
                    Err(e.to_string())
                }
            };

            file_outcomes.push(FileOutcome {
                filename: file.filename.clone(),
                uri: Some(uri),
                result,
            });
        }

        let model = assemble(&merged, overrides);
        info!(
            vng = model.tests.vng,
            ctsib = model.tests.ctsib,
            cognitive = model.tests.cognitive,
            fields = model.fields.len(),
            "assembled report model"
        );

        Ok(ProcessedReport {
            model,
            file_outcomes,
            first_uri,
        })
    }
}
