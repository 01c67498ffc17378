//! Deep PDF estimation using lopdf.
//!
//! Parses the full document and classifies every page: pages with
//! extractable text are tiered by word count; textless pages are tiered
//! by inspecting their content-stream operations to tell a scanned or
//! graphical page from a truly blank one.

use lopdf::content::Content;
use lopdf::{Document, ObjectId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::PdfError;
use crate::models::analysis::{AnalysisResult, DensityTier, PageResult, Phase};
use crate::pricing::{tier_for_word_count, ASSUMED_DENSE_WORDS};
use crate::sniff::FileKind;

/// A textless page with more operations than this is assumed to carry
/// visual content even if none of them are recognized paint operators.
const SCANNED_OP_THRESHOLD: usize = 50;

/// Per-page density and price breakdown. Any whole-document parse
/// failure degrades to the single-page fallback result.
pub fn estimate(buffer: &[u8], kind: FileKind, base_price_per_page: Decimal) -> AnalysisResult {
    match analyze(buffer, base_price_per_page) {
        Ok(pages) => AnalysisResult::from_pages(pages, kind, Phase::Deep),
        Err(e) => {
            warn!(error = %e, "deep PDF analysis failed, using fallback page");
            AnalysisResult::fallback(kind, Phase::Deep, base_price_per_page)
        }
    }
}

fn analyze(buffer: &[u8], base_price_per_page: Decimal) -> Result<Vec<PageResult>, PdfError> {
    let doc = load_document(buffer)?;
    let page_map = doc.get_pages();
    if page_map.is_empty() {
        return Err(PdfError::NoPages);
    }

    debug!(pages = page_map.len(), "parsed PDF for deep analysis");

    let mut pages = Vec::with_capacity(page_map.len());
    for (index, (&page_number, &page_id)) in page_map.iter().enumerate() {
        // Result page numbers stay contiguous from 1 even if the page
        // tree numbering is odd.
        let ordinal = (index + 1) as u32;

        match analyze_page(&doc, page_number, page_id) {
            Ok((word_count, density)) => {
                pages.push(PageResult::new(ordinal, word_count, density, base_price_per_page));
            }
            Err(e) => {
                // A single bad page must not lose the rest of the
                // document; substitute a dense page in place.
                warn!(page = ordinal, error = %e, "page analysis failed, assuming dense page");
                pages.push(PageResult::new(
                    ordinal,
                    ASSUMED_DENSE_WORDS,
                    DensityTier::High,
                    base_price_per_page,
                ));
            }
        }
    }

    Ok(pages)
}

fn load_document(buffer: &[u8]) -> Result<Document, PdfError> {
    let mut doc = Document::load_mem(buffer).map_err(|e| PdfError::Parse(e.to_string()))?;

    // Handle PDFs with empty-password encryption.
    if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("decrypted PDF with empty password");
    }

    Ok(doc)
}

fn analyze_page(
    doc: &Document,
    page_number: u32,
    page_id: ObjectId,
) -> Result<(u32, DensityTier), PdfError> {
    // Extraction failures count as "no text"; the page then falls
    // through to graphics inspection.
    let text = doc.extract_text(&[page_number]).unwrap_or_default();
    let word_count = text.split_whitespace().count() as u32;

    if word_count > 0 {
        return Ok((word_count, tier_for_word_count(word_count)));
    }

    let operators = page_operators(doc, page_id)?;
    if has_visual_content(&operators) {
        Ok((0, DensityTier::Scanned))
    } else {
        Ok((0, DensityTier::Blank))
    }
}

fn page_operators(doc: &Document, page_id: ObjectId) -> Result<Vec<String>, PdfError> {
    let data = doc
        .get_page_content(page_id)
        .map_err(|e| PdfError::Content(e.to_string()))?;
    let content = Content::decode(&data).map_err(|e| PdfError::Content(e.to_string()))?;
    Ok(content.operations.into_iter().map(|op| op.operator).collect())
}

fn has_visual_content(operators: &[String]) -> bool {
    if operators.len() > SCANNED_OP_THRESHOLD {
        return true;
    }
    operators.iter().any(|op| is_paint_operator(op))
}

/// Image-paint, inline-image, path-construction, fill, and stroke
/// operators per the PDF content stream operator set.
fn is_paint_operator(op: &str) -> bool {
    matches!(
        op,
        // XObject and inline image painting
        "Do" | "BI" | "ID" | "EI"
        // Path construction
        | "m" | "l" | "c" | "v" | "y" | "re"
        // Fill and stroke
        | "f" | "F" | "f*" | "b" | "b*" | "B" | "B*" | "S" | "s" | "sh"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use lopdf::content::Operation;
    use lopdf::{dictionary, Object, Stream};

    /// Build a one-page PDF with the given content operations, in the
    /// standard lopdf construction style.
    fn single_page_pdf(operations: Vec<Operation>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content { operations };
        let content_id =
            doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn text_operations(text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_text_page_is_tiered_by_word_count() {
        let buffer = single_page_pdf(text_operations("alpha beta gamma delta"));
        let result = estimate(&buffer, FileKind::Pdf, Decimal::new(1000, 2));

        assert_eq!(result.total_pages, 1);
        assert_eq!(result.phase, Phase::Deep);
        assert_eq!(result.pages[0].word_count, 4);
        assert_eq!(result.pages[0].density, DensityTier::Low);
        assert_eq!(result.total_price, Decimal::new(250, 2));
    }

    #[test]
    fn test_empty_page_is_blank() {
        let buffer = single_page_pdf(vec![]);
        let result = estimate(&buffer, FileKind::Pdf, Decimal::TEN);

        assert_eq!(result.total_pages, 1);
        assert_eq!(result.pages[0].density, DensityTier::Blank);
        assert_eq!(result.pages[0].word_count, 0);
        assert_eq!(result.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_textless_page_with_drawing_ops_is_scanned() {
        let operations = vec![
            Operation::new("re", vec![10.into(), 10.into(), 500.into(), 800.into()]),
            Operation::new("f", vec![]),
        ];
        let buffer = single_page_pdf(operations);
        let result = estimate(&buffer, FileKind::Pdf, Decimal::TEN);

        assert_eq!(result.pages[0].density, DensityTier::Scanned);
        assert_eq!(result.pages[0].word_count, 0);
        assert_eq!(result.total_price, Decimal::TEN);
    }

    #[test]
    fn test_textless_page_with_many_ops_is_scanned() {
        // No recognized paint operator, but the sheer operation count
        // trips the threshold.
        let operations: Vec<Operation> = (0..=SCANNED_OP_THRESHOLD)
            .map(|_| Operation::new("q", vec![]))
            .collect();
        let buffer = single_page_pdf(operations);
        let result = estimate(&buffer, FileKind::Pdf, Decimal::ONE);

        assert_eq!(result.pages[0].density, DensityTier::Scanned);
    }

    #[test]
    fn test_malformed_buffer_degrades_to_fallback() {
        let result = estimate(b"definitely not a pdf", FileKind::Pdf, Decimal::new(500, 2));

        assert_eq!(result.total_pages, 1);
        assert_eq!(result.pages[0].density, DensityTier::High);
        assert_eq!(result.pages[0].word_count, 300);
        assert_eq!(result.total_price, Decimal::new(500, 2));
    }

    #[test]
    fn test_paint_operator_set() {
        for op in ["Do", "BI", "re", "f", "S", "b*"] {
            assert!(is_paint_operator(op), "{op} should count as paint");
        }
        for op in ["BT", "Tj", "q", "Q", "cm", "gs"] {
            assert!(!is_paint_operator(op), "{op} should not count as paint");
        }
    }
}
