//! Configuration loading and management for websum.
//!
//! Loads settings from `websum.toml` with environment variable overrides.
//! Every setting has a default, so running without a config file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default local model, as shipped with Ollama
pub const DEFAULT_MODEL: &str = "llama3.2";
/// Default output format requested from the model
pub const DEFAULT_LANGUAGE: &str = "markdown";
/// Default address of the Ollama server
pub const DEFAULT_HOST: &str = "http://localhost:11434";

const CONFIG_FILE: &str = "websum.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// LLM configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier (e.g., "llama3.2")
    pub model: String,
    /// Output format the summary is requested in (e.g., "markdown")
    pub language: String,
    /// Base URL of the Ollama server
    pub host: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default locations.
    ///
    /// An explicit path must exist; when searching the default locations a
    /// missing file simply yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::find_config_file() {
                Some(path) => Self::load_from(&path)?,
                None => {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };

        Ok(config.with_host_override(std::env::var("OLLAMA_HOST").ok()))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Replace the Ollama host when one is given and non-empty
    pub fn with_host_override(mut self, host: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.agent.host = host;
        }
        self
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("websum")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, toml: &str) -> PathBuf {
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, toml).expect("write config");
        path
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.agent.model, "llama3.2");
        assert_eq!(config.agent.language, "markdown");
        assert_eq!(config.agent.host, "http://localhost:11434");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[agent]\nmodel = \"mistral\"\n");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.agent.model, "mistral");
        assert_eq!(config.agent.language, DEFAULT_LANGUAGE);
        assert_eq!(config.agent.host, DEFAULT_HOST);
    }

    #[test]
    fn empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
[agent]
model = "qwen2.5"
language = "plain text"
host = "http://gpu-box:11434"
"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.agent.model, "qwen2.5");
        assert_eq!(config.agent.language, "plain text");
        assert_eq!(config.agent.host, "http://gpu-box:11434");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[agent\nmodel = ");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn explicit_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(matches!(
            Config::load_from(&missing),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn host_override() {
        let config = Config::default().with_host_override(Some("http://other:1".into()));
        assert_eq!(config.agent.host, "http://other:1");

        let config = Config::default().with_host_override(Some("  ".into()));
        assert_eq!(config.agent.host, DEFAULT_HOST);

        let config = Config::default().with_host_override(None);
        assert_eq!(config.agent.host, DEFAULT_HOST);
    }

    #[test]
    fn round_trips_through_toml() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert!(text.contains("[agent]"));
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), Config::default());
    }
}
