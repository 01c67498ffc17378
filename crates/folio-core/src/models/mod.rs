//! Data models: analysis results and configuration.

pub mod analysis;
pub mod config;

pub use analysis::{AnalysisResult, DensityTier, PageResult, Phase};
pub use config::FolioConfig;
