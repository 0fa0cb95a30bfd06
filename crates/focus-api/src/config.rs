//! Configuration for the Focus API server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default listen address when neither config.toml nor --listen sets one
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server section
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl FileConfig {
    /// Load configuration from a TOML file, or defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            "Failed to parse config.toml. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (strings vs numbers)"
        })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Resolved runtime configuration
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: String,
}

impl Config {
    /// Create config from file config and an optional CLI override
    pub fn from_file(file_config: &FileConfig, listen_override: Option<String>) -> Self {
        Self {
            listen_addr: listen_override.unwrap_or_else(|| file_config.server.listen_addr.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_section_missing() {
        let file_config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(file_config.server.listen_addr, "127.0.0.1:5000");
    }

    #[test]
    fn test_parse_listen_addr() {
        let file_config: FileConfig = toml::from_str(
            "[server]\n\
             listen_addr = \"0.0.0.0:8080\"\n",
        )
        .unwrap();
        assert_eq!(file_config.server.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_cli_override_wins() {
        let file_config: FileConfig = toml::from_str(
            "[server]\n\
             listen_addr = \"0.0.0.0:8080\"\n",
        )
        .unwrap();

        let config = Config::from_file(&file_config, Some("127.0.0.1:9999".to_string()));
        assert_eq!(config.listen_addr, "127.0.0.1:9999");

        let config = Config::from_file(&file_config, None);
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }
}
