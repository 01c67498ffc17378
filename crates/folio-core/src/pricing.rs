//! Pricing rule engine: density tiers, word-count thresholds, and the
//! fixed fraction table mapping tiers to price multipliers.
//!
//! The fractions and thresholds are calibration constants of the pricing
//! model, not configuration. Rounding is a presentation concern and is
//! never applied here.

use rust_decimal::Decimal;

use crate::models::analysis::DensityTier;

/// Word count assumed for a page whose density could not be measured
/// (fast-pass pages, scanned images, and fallback pages).
pub const ASSUMED_DENSE_WORDS: u32 = 300;

/// Calibration constant for DOCX pagination: typical words per page.
pub const DOCX_WORDS_PER_PAGE: u32 = 250;

/// Upper word-count bound for the low tier.
const LOW_MAX_WORDS: u32 = 99;

/// Upper word-count bound for the medium tier.
const MEDIUM_MAX_WORDS: u32 = 250;

impl DensityTier {
    /// Price fraction for this tier. Scanned pages are priced like dense
    /// text pages.
    pub fn fraction(self) -> Decimal {
        match self {
            DensityTier::Blank => Decimal::ZERO,
            DensityTier::Low => Decimal::new(25, 2),
            DensityTier::Medium => Decimal::new(5, 1),
            DensityTier::High | DensityTier::Scanned => Decimal::ONE,
        }
    }
}

/// Price fraction for a density tier.
pub fn tier_fraction(density: DensityTier) -> Decimal {
    density.fraction()
}

/// Classify a page by its word count.
///
/// Scanned pages bypass this table entirely: a page with no extractable
/// text but visual content is classified [`DensityTier::Scanned`] by the
/// deep estimator, never by word count.
pub fn tier_for_word_count(word_count: u32) -> DensityTier {
    match word_count {
        0 => DensityTier::Blank,
        1..=LOW_MAX_WORDS => DensityTier::Low,
        w if w <= MEDIUM_MAX_WORDS => DensityTier::Medium,
        _ => DensityTier::High,
    }
}

/// Price of a single page: base price times the tier fraction.
pub fn page_price(density: DensityTier, base_price_per_page: Decimal) -> Decimal {
    base_price_per_page * density.fraction()
}
