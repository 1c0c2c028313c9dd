use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub discovery: DiscoverySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// File extensions treated as model specs when the input is a directory
    pub extensions: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["json".to_string(), "toml".to_string()],
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert!(settings.output.color);
        assert_eq!(settings.discovery.extensions, vec!["json", "toml"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(settings.output.color);
        assert_eq!(settings.discovery.extensions.len(), 2);
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        assert!(Settings::from_toml("[output]\nformat = \"yaml\"\n").is_err());
    }
}
