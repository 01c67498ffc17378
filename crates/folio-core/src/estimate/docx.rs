//! DOCX word-count estimation.
//!
//! DOCX does not expose page boundaries without a layout engine, so the
//! page count is derived from the total word count and the words are
//! distributed evenly across the estimated pages. This uniform split is
//! a known approximation, accepted deliberately. Fast and deep passes
//! share this code path; there is no cheaper heuristic for Office XML.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::DocxError;
use crate::models::analysis::{AnalysisResult, PageResult, Phase};
use crate::pricing::{tier_for_word_count, DOCX_WORDS_PER_PAGE};
use crate::sniff::FileKind;

lazy_static! {
    /// Office-XML text run: `<w:t>...</w:t>` (attributes allowed).
    static ref TEXT_RUN: Regex = Regex::new(r"(?s)<w:t[^>]*>(.*?)</w:t>").unwrap();
    /// Any residual markup inside a captured run.
    static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Word-count based page and price breakdown. Any container failure
/// degrades to the single-page fallback result.
pub fn estimate(buffer: &[u8], base_price_per_page: Decimal, phase: Phase) -> AnalysisResult {
    match word_tally(buffer) {
        Ok(total_words) => {
            let page_count = (total_words.div_ceil(DOCX_WORDS_PER_PAGE)).max(1) as usize;
            let words_per_page =
                (total_words as f64 / page_count as f64).round() as u32;
            let density = tier_for_word_count(words_per_page);

            debug!(total_words, page_count, words_per_page, "DOCX estimate");

            let pages = (1..=page_count as u32)
                .map(|n| PageResult::new(n, words_per_page, density, base_price_per_page))
                .collect();
            AnalysisResult::from_pages(pages, FileKind::Docx, phase)
        }
        Err(e) => {
            warn!(error = %e, "DOCX analysis failed, using fallback page");
            AnalysisResult::fallback(FileKind::Docx, phase, base_price_per_page)
        }
    }
}

/// Total whitespace-delimited words across all text runs.
fn word_tally(buffer: &[u8]) -> Result<u32, DocxError> {
    let xml = document_xml(buffer)?;

    let mut words: u32 = 0;
    for caps in TEXT_RUN.captures_iter(&xml) {
        let run = TAG.replace_all(&caps[1], " ");
        words += run.split_whitespace().count() as u32;
    }
    Ok(words)
}

/// Locate the document XML: the `word/document.xml` entry of the OOXML
/// zip container, or the buffer itself (lossy-decoded) when the input is
/// not a zip. Invalid UTF-8 sequences are replaced, never fatal.
fn document_xml(buffer: &[u8]) -> Result<String, DocxError> {
    if let Ok(mut archive) = ZipArchive::new(Cursor::new(buffer)) {
        if let Ok(mut entry) = archive.by_name("word/document.xml") {
            let mut raw = Vec::new();
            entry
                .read_to_end(&mut raw)
                .map_err(|e| DocxError::Container(e.to_string()))?;
            return Ok(String::from_utf8_lossy(&raw).into_owned());
        }
    }
    Ok(String::from_utf8_lossy(buffer).into_owned())
}
