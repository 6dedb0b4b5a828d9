//! Extraction-service contract and the mock used in tests.

use crate::chunking::PageRange;
use crate::entities::{ExtractedEntity, ExtractionError, ExtractionResult};

/// Contract for the external field-extraction service.
///
/// Implementations wrap whatever OCR/extraction backend is configured; the
/// engine only needs page counting, whole-document extraction, and
/// extraction restricted to a page range (used for oversized documents).
pub trait DocumentExtractor {
    /// Number of pages in the document.
    fn page_count(&self, content: &[u8]) -> ExtractionResult<u32>;

    /// Extract entities from the whole document.
    fn extract(&self, content: &[u8], mime_type: &str) -> ExtractionResult<Vec<ExtractedEntity>>;

    /// Extract entities from a contiguous page range.
    fn extract_pages(
        &self,
        content: &[u8],
        mime_type: &str,
        pages: PageRange,
    ) -> ExtractionResult<Vec<ExtractedEntity>>;
}

/// Mock extractor for testing without the real service.
///
/// Treats the document as UTF-8 text with pages separated by form-feed
/// (`\x0c`). Each `key: value` line on a page becomes one entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockExtractor;

impl MockExtractor {
    fn pages(content: &[u8]) -> ExtractionResult<Vec<&str>> {
        let text = std::str::from_utf8(content)
            .map_err(|_| ExtractionError::InvalidFormat("document is not UTF-8 text".into()))?;
        Ok(text.split('\x0c').collect())
    }

    fn entities_from_page(page: &str) -> Vec<ExtractedEntity> {
        page.lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                let key = key.trim();
                let value = value.trim();
                if key.is_empty() || value.is_empty() {
                    return None;
                }
                Some(ExtractedEntity::new(key, value))
            })
            .collect()
    }
}

impl DocumentExtractor for MockExtractor {
    fn page_count(&self, content: &[u8]) -> ExtractionResult<u32> {
        Ok(Self::pages(content)?.len() as u32)
    }

    fn extract(&self, content: &[u8], _mime_type: &str) -> ExtractionResult<Vec<ExtractedEntity>> {
        Ok(Self::pages(content)?
            .iter()
            .flat_map(|page| Self::entities_from_page(page))
            .collect())
    }

    fn extract_pages(
        &self,
        content: &[u8],
        _mime_type: &str,
        pages: PageRange,
    ) -> ExtractionResult<Vec<ExtractedEntity>> {
        let all = Self::pages(content)?;
        let start = (pages.start.max(1) - 1) as usize;
        let end = (pages.end as usize).min(all.len());

        Ok(all[start.min(all.len())..end]
            .iter()
            .flat_map(|page| Self::entities_from_page(page))
            .collect())
    }
}
