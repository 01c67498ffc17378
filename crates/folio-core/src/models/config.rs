//! Configuration for callers of the estimators.
//!
//! The tier fractions and calibration constants are fixed in
//! [`crate::pricing`]; configuration covers only caller-side pricing
//! parameters and batch behavior.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FolioError, Result};

/// Main configuration for the folio tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Pricing parameters.
    pub pricing: PricingConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

/// Caller-side pricing parameters. These are supplied to the estimators
/// per call; the tier fraction table itself is not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Base price per dense page.
    pub base_price_per_page: Decimal,

    /// Currency code used for display.
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price_per_page: Decimal::new(2500, 2),
            currency: "USD".to_string(),
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions picked up when expanding batch globs.
    pub extensions: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: ["pdf", "docx", "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FolioConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FolioError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| FolioError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
