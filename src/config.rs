use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_fallback_message() -> String {
    "LLM failed to create response".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportConfig {
    pub output: Option<PathBuf>,
}

impl Config {
    /// Minimal in-memory config for tests and config-less commands.
    pub fn minimal() -> Self {
        Self {
            db: DbConfig {
                path: PathBuf::from("./data/tlog.sqlite"),
            },
            display: DisplayConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.display.fallback_message.trim().is_empty() {
        anyhow::bail!("display.fallback_message must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config: Config = toml::from_str("[db]\npath = \"./data/tlog.sqlite\"\n").unwrap();
        assert_eq!(
            config.display.fallback_message,
            "LLM failed to create response"
        );
        assert!(config.export.output.is_none());
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config: Config = toml::from_str(
            r#"
[db]
path = "/tmp/x.sqlite"

[display]
fallback_message = "no answer"

[export]
output = "/tmp/out.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.display.fallback_message, "no answer");
        assert_eq!(config.export.output.unwrap(), PathBuf::from("/tmp/out.csv"));
    }
}
