// src/core/config_manager.rs
//! Console configuration: optional hire3x.yaml overlaid by environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const CONFIG_FILE: &str = "hire3x.yaml";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const API_URL_VAR: &str = "HIRE3X_API_URL";
const ENVIRONMENT_VARS: &[&str] = &["HIRE3X_ENV", "ENVIRONMENT"];

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub environment: String,
    pub api_url: String,
    pub connect_timeout_seconds: Option<u64>,
    pub clipboard_command: String,
    pub open_command: String,
    pub print_command: String,
}

/// One environment section of hire3x.yaml. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SectionConfig {
    api_url: Option<String>,
    connect_timeout_seconds: Option<u64>,
    clipboard_command: Option<String>,
    open_command: Option<String>,
    print_command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: SectionConfig,
    production: SectionConfig,
}

impl ConfigManager {
    /// Load from `hire3x.yaml` in the working directory (if present) and
    /// the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = if config_path.exists() {
            Some(
                std::fs::read_to_string(config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?,
            )
        } else {
            None
        };

        Self::from_sources(content.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from file content and a variable lookup.
    /// Variables win over the file; the file wins over platform defaults.
    pub fn from_sources(
        file_content: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let environment = ENVIRONMENT_VARS
            .iter()
            .find_map(|&key| lookup(key))
            .unwrap_or_else(|| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let section = match file_content {
            Some(content) => {
                let file: ConfigFile = serde_yaml::from_str(content)
                    .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;
                match environment.as_str() {
                    "production" => file.production,
                    _ => file.local,
                }
            }
            None => SectionConfig::default(),
        };

        let api_url = lookup(API_URL_VAR)
            .or(section.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            environment,
            api_url,
            connect_timeout_seconds: section.connect_timeout_seconds,
            clipboard_command: section
                .clipboard_command
                .unwrap_or_else(|| default_clipboard_command().to_string()),
            open_command: section
                .open_command
                .unwrap_or_else(|| default_open_command().to_string()),
            print_command: section.print_command.unwrap_or_else(|| "lp".to_string()),
        })
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_seconds.map(Duration::from_secs)
    }
}

fn default_clipboard_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "pbcopy"
    } else {
        "xclip -selection clipboard"
    }
}

fn default_open_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const FILE: &str = r#"
local:
  api_url: http://127.0.0.1:9000
  print_command: lpr -P office
production:
  api_url: https://hire3x.example.com
  connect_timeout_seconds: 5
"#;

    #[test]
    fn test_defaults_without_file_or_vars() {
        let config = ConfigManager::from_sources(None, vars(&[])).unwrap();
        assert_eq!(config.environment, "local");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.connect_timeout(), None);
        assert_eq!(config.print_command, "lp");
    }

    #[test]
    fn test_file_section_follows_environment() {
        let local = ConfigManager::from_sources(Some(FILE), vars(&[])).unwrap();
        assert_eq!(local.api_url, "http://127.0.0.1:9000");
        assert_eq!(local.print_command, "lpr -P office");

        let production =
            ConfigManager::from_sources(Some(FILE), vars(&[("HIRE3X_ENV", "production")])).unwrap();
        assert_eq!(production.api_url, "https://hire3x.example.com");
        assert_eq!(production.connect_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_env_var_overrides_file() {
        let config = ConfigManager::from_sources(
            Some(FILE),
            vars(&[("HIRE3X_API_URL", "http://override:8000")]),
        )
        .unwrap();
        assert_eq!(config.api_url, "http://override:8000");
    }

    #[test]
    fn test_environment_fallback_variable() {
        let config =
            ConfigManager::from_sources(Some(FILE), vars(&[("ENVIRONMENT", "production")])).unwrap();
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ConfigManager::from_sources(Some("local: ["), vars(&[])).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, FILE).unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert!(!config.clipboard_command.is_empty());
        assert!(!config.open_command.is_empty());
    }
}
