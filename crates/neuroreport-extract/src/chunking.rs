//! Chunked extraction for oversized documents.
//!
//! The extraction service caps how many pages it accepts per call. Documents
//! over the cap are split into contiguous page ranges, extracted per range,
//! and the per-chunk bags merged back in ascending chunk order with
//! first-non-empty-value-wins per key. Merge outcome therefore never depends
//! on extraction latency.

use tracing::debug;

use crate::entities::{entities_to_bag, ExtractionResult};
use crate::extractor::DocumentExtractor;
use crate::RawFieldBag;

/// Page limit accepted by the extraction service in one call.
pub const MAX_PAGES_PER_CALL: u32 = 15;

/// Contiguous 1-based inclusive page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Split a page count into contiguous ranges of at most `max_pages`,
/// preserving page order.
pub fn page_ranges(page_count: u32, max_pages: u32) -> Vec<PageRange> {
    assert!(max_pages > 0, "max_pages must be positive");

    let mut ranges = Vec::new();
    let mut start = 1;
    while start <= page_count {
        let end = (start + max_pages - 1).min(page_count);
        ranges.push(PageRange { start, end });
        start = end + 1;
    }
    ranges
}

/// Extract one document into a flat field bag, chunking when the document
/// exceeds the per-call page limit.
///
/// Documents at or under the limit are extracted in a single call. Chunks are
/// extracted sequentially in page order; a key found in an earlier chunk is
/// never overwritten by a later one.
pub fn extract_fields<E: DocumentExtractor + ?Sized>(
    extractor: &E,
    content: &[u8],
    mime_type: &str,
) -> ExtractionResult<RawFieldBag> {
    let page_count = extractor.page_count(content)?;

    if page_count <= MAX_PAGES_PER_CALL {
        let entities = extractor.extract(content, mime_type)?;
        return Ok(entities_to_bag(&entities));
    }

    let mut merged = RawFieldBag::new();
    for (index, range) in page_ranges(page_count, MAX_PAGES_PER_CALL).iter().enumerate() {
        let entities = extractor.extract_pages(content, mime_type, *range)?;
        let chunk = entities_to_bag(&entities);
        debug!(
            chunk = index,
            pages_start = range.start,
            pages_end = range.end,
            fields = chunk.len(),
            "extracted document chunk"
        );
        merge_chunk_bag(&mut merged, chunk);
    }
    Ok(merged)
}

/// First-non-empty-value-wins merge of one chunk into the accumulator.
fn merge_chunk_bag(target: &mut RawFieldBag, chunk: RawFieldBag) {
    for (key, value) in chunk {
        if value.is_empty() {
            continue;
        }
        target.entry(key).or_insert(value);
    }
}
