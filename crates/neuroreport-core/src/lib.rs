//! Neuroreport Core Library
//!
//! Reconciles loosely-typed OCR field bags from heterogeneous clinical-test
//! documents (oculomotor/VNG, balance posturography, cognitive-screening
//! batteries) into one canonical field set per patient, and derives the
//! unified interpretation report.
//!
//! # Architecture
//!
//! ```text
//! Uploaded files → Extraction (chunked) → RawFieldBag per file
//!                                              │
//!                                   FieldNormalizer.merge
//!                              (alias resolution, first-writer-wins)
//!                                              │
//!                                      CanonicalFieldBag
//!                                              │
//!                     ┌────────────────────────┼────────────────────────┐
//!                     │                        │                        │
//!                     ▼                        ▼                        ▼
//!                ScoreParser           InterpretationEngine      DomainAggregator
//!                     └────────────────────────┼────────────────────────┘
//!                                              ▼
//!                                       ReportAssembler
//!                                              │
//!                                         ReportModel
//!                                    (rendering / storage)
//! ```
//!
//! # Core invariant
//!
//! **First-writer-wins.** Once a canonical key is set it is never
//! overwritten: later files, later chunks, and later alias spellings can only
//! fill keys not yet present.
//!
//! # Modules
//!
//! - [`models`]: field bags, report model, per-file outcomes
//! - [`normalizer`]: alias resolution and multi-source merge
//! - [`parse`]: total parsers for OCR'd numbers, percentiles and `X/Y` scores
//! - [`interpret`]: threshold tables → severity labels
//! - [`domains`]: cognitive-domain impairment aggregation
//! - [`assembler`]: report-model assembly
//! - [`pipeline`]: per-request orchestration
//! - [`storage`]: object-store collaborator contract
//! - [`db`]: SQLite report store

pub mod assembler;
pub mod db;
pub mod domains;
pub mod interpret;
pub mod models;
pub mod normalizer;
pub mod parse;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use assembler::{assemble, compute_age, detect_tests, PatientOverrides};
pub use db::ReportStore;
pub use interpret::{interpret, Scale, NOT_APPLICABLE, RPQ_MAX_SCORE};
pub use models::{
    CanonicalFieldBag, ClinicalDomain, FileOutcome, PatientInfo, ReportModel, ScoreEntry,
    StoredReport, TestsDetected, UploadedFile,
};
pub use normalizer::{normalize_key, FieldNormalizer};
pub use pipeline::{PipelineError, ProcessedReport, ReportPipeline};
pub use storage::{MemoryObjectStore, ObjectStore};

pub use neuroreport_extract::RawFieldBag;
