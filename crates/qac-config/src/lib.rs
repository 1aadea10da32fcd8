use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Words printed in front of chapter, section, subsection and question
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionsConfig {
    pub chapter: String,
    pub section: String,
    pub subsection: String,
    pub question: String,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            chapter: "Chapter".to_string(),
            section: "Section".to_string(),
            subsection: "Subsection".to_string(),
            question: "Question".to_string(),
        }
    }
}

/// Settings read from `~/.config/qac/config.toml`. Every field may be left
/// out of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator used when `--generator` is not given
    pub generator: String,
    /// Load MathJax from `mathjax_path` instead of the CDN
    pub offline: bool,
    pub mathjax_path: String,
    pub captions: CaptionsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: "html".to_string(),
            offline: false,
            mathjax_path: "MathJax/".to_string(),
            captions: CaptionsConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the asset path
        if let Some(expanded) = Self::expand_path(&config.mathjax_path) {
            config.mathjax_path = expanded;
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load `config_path` if given, else the default location; a missing
    /// file yields the defaults.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/qac");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &str) -> Option<String> {
        shellexpand::full(path)
            .ok()
            .map(|expanded| expanded.into_owned())
    }
}
