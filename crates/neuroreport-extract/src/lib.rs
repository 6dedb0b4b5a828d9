//! Extraction-service layer for the report engine.
//!
//! Wraps the external OCR/field-extraction service behind the
//! [`DocumentExtractor`] trait and turns its nested entity output into a flat
//! key/value bag. Oversized documents are extracted in page-range chunks and
//! the per-chunk bags merged deterministically.
//!
//! Pipeline position: Document bytes → (chunking) → entities → [`RawFieldBag`]
//!
//! The keys in a [`RawFieldBag`] are extractor vocabulary, not canonical
//! field names; canonicalization happens downstream in the core crate.

pub mod chunking;
pub mod entities;
pub mod extractor;

pub use chunking::{extract_fields, page_ranges, PageRange, MAX_PAGES_PER_CALL};
pub use entities::{
    entities_to_bag, parse_process_response, ExtractedEntity, ExtractionError, ExtractionResult,
    NormalizedValue,
};
pub use extractor::{DocumentExtractor, MockExtractor};

use std::collections::HashMap;

/// Flat extractor-reported key → string value bag, scoped to one file or one
/// chunk of a file.
pub type RawFieldBag = HashMap<String, String>;
