/*!
Configuration for the sinks wired behind a reporter
*/

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReporterConfig {
    /// Sinks that receive every notice, in delivery order
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SinkConfig {
    /// Sink plugin type
    pub plugin: SinkPlugin,
    /// Whether this sink is enabled
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkPlugin {
    Tracing,
    Terminal {
        #[serde(default)]
        format: TerminalFormat,
    },
    JsonLines {
        path: PathBuf,
    },
    Null,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalFormat {
    #[default]
    Plain,
    Colored,
    Json,
}

fn enabled_by_default() -> bool {
    true
}

impl SinkConfig {
    pub fn enabled(plugin: SinkPlugin) -> Self {
        Self {
            plugin,
            enabled: true,
        }
    }
}

impl ReporterConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded deprecation reporter config from {:?}", path);
        Self::from_toml_str(&text)
    }

    /// `<config dir>/deprecation-reporter/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deprecation-reporter").join("config.toml"))
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            sinks: vec![SinkConfig::enabled(SinkPlugin::Tracing)],
        }
    }
}
