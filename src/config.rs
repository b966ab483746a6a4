//! Engine configuration for foundry-ocr
//!
//! Config stored at: ~/.config/foundry-ocr/config.json

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Command line that launches the OCR engine
    #[serde(default = "default_engine")]
    pub engine: String,
}

fn default_engine() -> String {
    "foundry-ocr-engine".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: default_engine(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?
            .join("foundry-ocr");
        Ok(config_dir.join("config.json"))
    }

    /// Load config from file, or use defaults. The FOUNDRY_OCR_ENGINE
    /// environment variable overrides the engine command either way.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(engine) = std::env::var("FOUNDRY_OCR_ENGINE") {
            if !engine.trim().is_empty() {
                config.engine = engine;
            }
        }

        Ok(config)
    }
}
