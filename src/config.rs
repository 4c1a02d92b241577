use crate::constants;
use crate::error::{DashboardError, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub analytics: AnalyticsConfig,
    pub charts: ChartsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the CSV table file.
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Number of rows in the top-products ranking.
    pub top_products: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Directory chart PNGs are written into.
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(constants::DEFAULT_DATA_FILE),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_products: constants::DEFAULT_TOP_PRODUCTS,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            width: 1000,
            height: 420,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory.
    pub fn load() -> Result<Self> {
        let config_content = fs::read_to_string(CONFIG_PATH).map_err(|e| {
            DashboardError::Config(format!("Failed to read config file '{}': {}", CONFIG_PATH, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load `config.toml` if present, falling back to defaults when the file
    /// does not exist. A file that exists but fails to parse is an error.
    pub fn load_or_default() -> Result<Self> {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)?;
                Ok(config)
            }
            Err(_) => {
                debug!("No {} found, using default configuration", CONFIG_PATH);
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_standard_data_file() {
        let config = Config::default();
        assert_eq!(
            config.storage.data_file,
            PathBuf::from(constants::DEFAULT_DATA_FILE)
        );
        assert_eq!(config.analytics.top_products, 5);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[storage]\ndata_file = \"other.csv\"\n").unwrap();
        assert_eq!(config.storage.data_file, PathBuf::from("other.csv"));
        assert_eq!(config.analytics.top_products, 5);
        assert_eq!(config.charts.output_dir, PathBuf::from("charts"));
    }
}
