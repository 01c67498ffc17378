//! Fast PDF page-count heuristic.
//!
//! Scans the trailing bytes of the buffer for page-tree `/Count` markers
//! instead of parsing the document. Multiple `/Count` markers can appear
//! (one per page-tree node); the top-level tree carries the largest value
//! in well-formed documents, so the maximum found is taken. This is a
//! heuristic, not a guarantee; the deep pass supersedes it.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use crate::models::analysis::{AnalysisResult, DensityTier, Phase};
use crate::pricing::ASSUMED_DENSE_WORDS;
use crate::sniff::FileKind;

/// How many trailing bytes to scan before falling back to the full
/// buffer. The trailer of a standard PDF sits at the end of the file.
const TAIL_WINDOW: usize = 32 * 1024;

/// Sanity bound on the page count parsed from (possibly corrupt or
/// malicious) metadata.
const MAX_PAGE_COUNT: usize = 5000;

lazy_static! {
    /// Page-tree node attribute: `/Count <integer>`. PDF structural
    /// keywords are ASCII even when page content is encoded, so a byte
    /// regex is sufficient and avoids decoding the buffer.
    static ref COUNT_MARKER: Regex = Regex::new(r"/Count\s+(\d+)").unwrap();
}

/// Uniform dense page-set sized by the `/Count` scan.
pub fn estimate(buffer: &[u8], kind: FileKind, base_price_per_page: Decimal) -> AnalysisResult {
    let page_count = scan_page_count(buffer);
    AnalysisResult::uniform(
        page_count,
        ASSUMED_DENSE_WORDS,
        DensityTier::High,
        base_price_per_page,
        kind,
        Phase::Fast,
    )
}

/// Heuristic page count: tail scan, then full-buffer scan, default 1,
/// clamped to `[1, MAX_PAGE_COUNT]`.
pub(crate) fn scan_page_count(buffer: &[u8]) -> usize {
    let tail = &buffer[buffer.len().saturating_sub(TAIL_WINDOW)..];

    // Linearized/non-standard PDFs may not keep the trailer in the tail;
    // rescan the whole buffer before giving up.
    let found = max_count_marker(tail).or_else(|| {
        trace!("no /Count marker in tail window, scanning full buffer");
        max_count_marker(buffer)
    });

    found.unwrap_or(1).clamp(1, MAX_PAGE_COUNT)
}

fn max_count_marker(data: &[u8]) -> Option<usize> {
    COUNT_MARKER
        .captures_iter(data)
        .filter_map(|caps| {
            let digits = std::str::from_utf8(&caps[1]).ok()?;
            digits.parse::<usize>().ok()
        })
        .max()
}
