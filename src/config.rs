use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::Placement,
    error::{QuizbookError, Result},
};

pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# quizbook configuration file

[collection]
# Seed the built-in starter cards when nothing has been stored yet
seed_sample = true

# Where a moved card's category lands in the overall order:
#   "trailing" - the target category moves to the end (default)
#   "in-place" - categories keep their order
placement = "trailing"

[storage]
# "file" (cards.json) or "sqlite" (requires the sqlite-storage feature)
backend = "file"

[logging]
# Default level when RUST_LOG is not set
level = "info"
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    #[serde(default = "default_true")]
    pub seed_sample: bool,
    #[serde(default)]
    pub placement: Placement,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            seed_sample: true,
            placement: Placement::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Loads the config from `data_dir`, falling back to defaults when absent
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
            .map_err(|e| QuizbookError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Writes the commented default template unless a config already exists
    pub fn write_default(data_dir: &Path) -> Result<()> {
        let path = Self::path(data_dir);
        if path.exists() {
            return Ok(());
        }
        fs::create_dir_all(data_dir)?;
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
        Ok(())
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| QuizbookError::ConfigError(e.to_string()))?;
        fs::create_dir_all(data_dir)?;
        fs::write(Self::path(data_dir), content)?;
        Ok(())
    }
}
