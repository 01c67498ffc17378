//! Core library for document pagination and pricing estimation.
//!
//! This crate provides:
//! - File format sniffing (PDF, image, DOCX)
//! - A fast heuristic estimator that prices a document without parsing it
//! - A deep estimator that classifies every page by text density
//! - The pricing rule engine mapping density tiers to price fractions

pub mod error;
pub mod estimate;
pub mod models;
pub mod pricing;
pub mod sniff;

pub use error::{DocxError, FolioError, PdfError, Result};
pub use estimate::{deep_estimate, fast_estimate};
pub use models::analysis::{AnalysisResult, DensityTier, PageResult, Phase};
pub use models::config::FolioConfig;
pub use pricing::{page_price, tier_for_word_count, tier_fraction};
pub use sniff::{classify, FileKind};
