//! Fast and deep document estimators.
//!
//! Both entry points are pure functions over an input buffer and never
//! fail: unparseable content degrades to a single dense fallback page.
//! The fast pass gives the user an instant price while the expensive
//! deep pass runs; a deep result supersedes a fast one when it arrives.

mod deep_pdf;
mod docx;
mod fast_pdf;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::analysis::{AnalysisResult, Phase};
use crate::sniff::{classify, FileKind};

/// Heuristic estimation pass.
///
/// Completes in time proportional to at most one full-buffer scan; never
/// parses document structure. PDFs get a uniform dense page-set sized by
/// the `/Count` marker scan, images a single scanned page. DOCX shares
/// the deep path since the XML word tally is already cheap.
pub fn fast_estimate(
    buffer: &[u8],
    file_name: &str,
    base_price_per_page: Decimal,
) -> AnalysisResult {
    let kind = classify(file_name);
    debug!(file_name, ?kind, "fast estimate");

    match kind {
        FileKind::Image => AnalysisResult::scanned_image(base_price_per_page, Phase::Fast),
        FileKind::Docx => docx::estimate(buffer, base_price_per_page, Phase::Fast),
        FileKind::Pdf | FileKind::Unknown => {
            fast_pdf::estimate(buffer, kind, base_price_per_page)
        }
    }
}

/// Full-parse estimation pass; authoritative where the format allows.
///
/// PDFs are parsed page by page, classifying each by extracted word
/// count or, for textless pages, by its drawing operations. Images and
/// DOCX behave exactly as in the fast pass.
pub fn deep_estimate(
    buffer: &[u8],
    file_name: &str,
    base_price_per_page: Decimal,
) -> AnalysisResult {
    let kind = classify(file_name);
    debug!(file_name, ?kind, "deep estimate");

    match kind {
        FileKind::Image => AnalysisResult::scanned_image(base_price_per_page, Phase::Deep),
        FileKind::Docx => docx::estimate(buffer, base_price_per_page, Phase::Deep),
        FileKind::Pdf | FileKind::Unknown => {
            deep_pdf::estimate(buffer, kind, base_price_per_page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::models::analysis::DensityTier;

    #[test]
    fn test_image_yields_one_scanned_page_in_both_passes() {
        let base = Decimal::new(1500, 2);
        // Buffer content is irrelevant for images.
        let fast = fast_estimate(b"not really image data", "scan.png", base);
        let deep = deep_estimate(b"not really image data", "scan.jpg", base);

        for result in [&fast, &deep] {
            assert_eq!(result.total_pages, 1);
            assert!(result.is_image);
            assert_eq!(result.pages[0].density, DensityTier::Scanned);
            assert_eq!(result.total_price, base);
        }
        assert_eq!(fast.phase, Phase::Fast);
        assert_eq!(deep.phase, Phase::Deep);
    }

    #[test]
    fn test_docx_is_idempotent_across_passes() {
        let xml = format!(
            "<w:document><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:document>",
            "word ".repeat(120)
        );
        let base = Decimal::TEN;
        let fast = fast_estimate(xml.as_bytes(), "letter.docx", base);
        let deep = deep_estimate(xml.as_bytes(), "letter.docx", base);

        assert_eq!(fast.pages, deep.pages);
        assert_eq!(fast.total_price, deep.total_price);
        assert_eq!(fast.total_pages, deep.total_pages);
    }

    #[test]
    fn test_unknown_extension_routes_through_pdf_path() {
        let result = fast_estimate(b"/Count 4", "mystery.bin", Decimal::ONE);
        assert_eq!(result.total_pages, 4);
        assert_eq!(result.file_type, crate::sniff::FileKind::Unknown);
        assert!(!result.is_image);
    }
}
