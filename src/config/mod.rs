//! Configuration management for fridgechef

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub narrator: NarratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub default_gateway: String,
    pub gemini: GeminiConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_gateway: "gemini".to_string(),
            gemini: GeminiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub model: String,
    pub max_output_tokens: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".to_string(),
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    pub enabled: bool,
    /// TTS command override; defaults to the platform command when unset
    pub command: Option<String>,
    /// Voice passed to the TTS command via `-v`
    pub voice: Option<String>,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            voice: None,
        }
    }
}

impl Config {
    /// Load configuration from default location or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "fridgechef") {
            let config_dir = proj_dirs.config_dir();
            std::fs::create_dir_all(config_dir)?;
            Ok(config_dir.join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.default_gateway, "gemini");
        assert_eq!(config.gateway.gemini.model, "gemini-2.0-flash-exp");
        assert!(config.narrator.enabled);
        assert!(config.narrator.command.is_none());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [narrator]
            enabled = false
            voice = "Daniel"
            "#,
        )
        .unwrap();
        assert!(!config.narrator.enabled);
        assert_eq!(config.narrator.voice.as_deref(), Some("Daniel"));
        assert_eq!(config.gateway.default_gateway, "gemini");
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.gateway.gemini.max_output_tokens, 8192);
    }
}
