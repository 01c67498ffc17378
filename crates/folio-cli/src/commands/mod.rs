//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod estimate;

use std::path::Path;

use folio_core::FolioConfig;

/// Load configuration from an explicit path or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FolioConfig> {
    match config_path {
        Some(path) => Ok(FolioConfig::from_file(Path::new(path))?),
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                Ok(FolioConfig::from_file(&default_path)?)
            } else {
                Ok(FolioConfig::default())
            }
        }
    }
}
