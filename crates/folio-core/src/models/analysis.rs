//! Analysis result models.
//!
//! An [`AnalysisResult`] is created fresh per estimation call and never
//! mutated afterwards; a new estimation produces a new value. Field names
//! serialize as camelCase because the downstream quote UI is a web client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{self, ASSUMED_DENSE_WORDS};
use crate::sniff::FileKind;

/// Page density classification, ordered by price weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityTier {
    /// No text and no visual content. Priced at 0x.
    Blank,
    /// 1-99 words. Priced at 0.25x.
    Low,
    /// 100-250 words. Priced at 0.5x.
    Medium,
    /// 251+ words. Priced at 1x.
    High,
    /// No extractable text but detectable visual content (scanned page
    /// or vector graphic). Priced like a dense text page.
    Scanned,
}

impl DensityTier {
    /// Wire/display name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            DensityTier::Blank => "blank",
            DensityTier::Low => "low",
            DensityTier::Medium => "medium",
            DensityTier::High => "high",
            DensityTier::Scanned => "scanned",
        }
    }
}

/// Which estimation pass produced a result.
///
/// A deep result supersedes a fast one for the same source file; the two
/// are allowed to disagree since the fast pass is a heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Cheap, approximate, immediate pass.
    Fast,
    /// Full-parse pass; authoritative.
    Deep,
}

/// Per-page estimation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// 1-based page number, contiguous within a result.
    pub page_number: u32,
    /// Whitespace-delimited word count (assumed, for heuristic pages).
    pub word_count: u32,
    /// Density classification.
    pub density: DensityTier,
    /// Page price: base price times the tier fraction.
    pub price: Decimal,
    /// The tier fraction applied.
    pub fraction: Decimal,
    /// Always true in the current model; reserved for future exclusion
    /// logic.
    pub included: bool,
}

impl PageResult {
    /// Build a priced page result.
    pub fn new(
        page_number: u32,
        word_count: u32,
        density: DensityTier,
        base_price_per_page: Decimal,
    ) -> Self {
        Self {
            page_number,
            word_count,
            density,
            price: pricing::page_price(density, base_price_per_page),
            fraction: density.fraction(),
            included: true,
        }
    }
}

/// Complete page-by-page density and price breakdown for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Number of entries in `pages`.
    pub total_pages: usize,
    /// Pages in source-document order.
    pub pages: Vec<PageResult>,
    /// Sum of all page prices.
    pub total_price: Decimal,
    /// Copy of `total_price` at creation time, preserved as an immutable
    /// baseline for later discount/override logic.
    pub original_total_price: Decimal,
    /// Whether the source was a raster image.
    pub is_image: bool,
    /// Provenance: which pass produced this result.
    pub phase: Phase,
    /// Sniffed file kind.
    pub file_type: FileKind,
}

impl AnalysisResult {
    /// Assemble a result from already-priced pages, recomputing totals.
    pub fn from_pages(pages: Vec<PageResult>, file_type: FileKind, phase: Phase) -> Self {
        let total_price: Decimal = pages.iter().map(|p| p.price).sum();
        Self {
            total_pages: pages.len(),
            pages,
            total_price,
            original_total_price: total_price,
            is_image: file_type == FileKind::Image,
            phase,
            file_type,
        }
    }

    /// A result where every page shares the same word count and tier.
    pub fn uniform(
        page_count: usize,
        word_count: u32,
        density: DensityTier,
        base_price_per_page: Decimal,
        file_type: FileKind,
        phase: Phase,
    ) -> Self {
        let pages = (1..=page_count as u32)
            .map(|n| PageResult::new(n, word_count, density, base_price_per_page))
            .collect();
        Self::from_pages(pages, file_type, phase)
    }

    /// Degraded single-page result for unparseable content: one dense
    /// page with the assumed word count.
    pub fn fallback(file_type: FileKind, phase: Phase, base_price_per_page: Decimal) -> Self {
        Self::uniform(
            1,
            ASSUMED_DENSE_WORDS,
            DensityTier::High,
            base_price_per_page,
            file_type,
            phase,
        )
    }

    /// Single scanned page, used for raster image uploads.
    pub fn scanned_image(base_price_per_page: Decimal, phase: Phase) -> Self {
        Self::uniform(
            1,
            ASSUMED_DENSE_WORDS,
            DensityTier::Scanned,
            base_price_per_page,
            FileKind::Image,
            phase,
        )
    }
}
