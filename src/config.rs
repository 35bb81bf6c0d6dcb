use std::fs;
use std::path::Path;

use serde::Deserialize;
use strata_stream::StreamConfig;
use strata_world::WorldGenConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `strata.toml`. Every table is optional.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub worldgen: WorldGenConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}
fn default_seed() -> i32 {
    42
}
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            worldgen: WorldGenConfig::default(),
            stream: StreamConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        let cfg = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        log::info!("loaded config from {shown}");
        Ok(cfg)
    }
}
