//! Server Configuration
//!
//! Built-in defaults, then an optional TOML file, then `PREMIUM_*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read when `PREMIUM_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "premium.toml";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// ONNX classifier graph
    pub model_path: PathBuf,
    /// Feature encoding and class labels of the graph
    pub manifest_path: PathBuf,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let model_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("model");
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            model_path: model_dir.join("insurance_model.onnx"),
            manifest_path: model_dir.join("insurance_model.json"),
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Load from the file named by `PREMIUM_CONFIG` (default `premium.toml`)
    /// and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("PREMIUM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&file))
    }

    /// Load with `path` as the optional config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("model_path", defaults.model_path.display().to_string())?
            .set_default("manifest_path", defaults.manifest_path.display().to_string())?
            .set_default("log_json", defaults.log_json)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("PREMIUM"))
            .build()?
            .try_deserialize()
    }
}
