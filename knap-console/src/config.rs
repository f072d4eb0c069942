//! Configuration management for the knap console
//!
//! This module provides a centralized configuration system that loads settings from:
//! 1. Environment variables (highest priority)
//! 2. Configuration file (TOML format)
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct for the console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnapConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Kubernetes connection configuration
    pub kubernetes: KubernetesConfig,
    /// Template and asset paths
    pub paths: PathsConfig,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Kubernetes connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubernetesConfig {
    /// Path to a kubeconfig file; inferred (in-cluster or `~/.kube/config`) when unset
    pub kubeconfig: Option<PathBuf>,
    /// The single namespace all engine operations are scoped to
    pub namespace: String,
}

/// Template and asset paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the HTML view templates
    pub views: PathBuf,
    /// Directory holding the static icon assets served under /img
    pub assets: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for log files; console-only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for KnapConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            kubernetes: KubernetesConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1323,
        }
    }
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            namespace: "default".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            views: PathBuf::from("knap-console/views"),
            assets: PathBuf::from("knap-console/assets/img"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl KnapConfig {
    /// Load configuration from environment variables and optional config file
    pub fn load() -> Self {
        let mut config = Self::default();

        // Try to load from config file first
        if let Some(config_path) = Self::find_config_file() {
            if let Ok(file_config) = Self::load_from_file(&config_path) {
                config = file_config;
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        config
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.clone(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            // Environment variable override
            std::env::var("KNAP_CONFIG").ok().map(PathBuf::from),
            // Standard locations
            Some(PathBuf::from("/etc/knap/config.toml")),
            Some(PathBuf::from("./knap.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Server
        if let Ok(host) = std::env::var("KNAP_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("KNAP_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        // Kubernetes
        if let Ok(path) = std::env::var("KNAP_KUBECONFIG") {
            self.kubernetes.kubeconfig = Some(PathBuf::from(path));
        }
        if let Ok(namespace) = std::env::var("KNAP_NAMESPACE") {
            self.kubernetes.namespace = namespace;
        }

        // Paths
        if let Ok(path) = std::env::var("KNAP_VIEWS_DIR") {
            self.paths.views = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("KNAP_ASSETS_DIR") {
            self.paths.assets = PathBuf::from(path);
        }

        // Logging
        if let Ok(level) = std::env::var("KNAP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(path) = std::env::var("KNAP_LOG_DIR") {
            self.logging.log_dir = Some(PathBuf::from(path));
        }
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.kubernetes.namespace.is_empty() {
            return Err(ConfigError::Validation(
                "Namespace cannot be empty".to_string(),
            ));
        }

        if let Some(path) = &self.kubernetes.kubeconfig {
            if !path.exists() {
                return Err(ConfigError::Validation(format!(
                    "Kubeconfig {:?} does not exist",
                    path
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Failed to read configuration file
    FileRead(PathBuf, String),
    /// Failed to parse configuration
    Parse(String),
    /// Configuration validation failed
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, err) => {
                write!(f, "Failed to read config file {:?}: {}", path, err)
            }
            ConfigError::Parse(err) => write!(f, "Failed to parse config: {}", err),
            ConfigError::Validation(err) => write!(f, "Config validation failed: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KnapConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 1323);
        assert_eq!(config.kubernetes.namespace, "default");
        assert!(config.kubernetes.kubeconfig.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = KnapConfig::default();
        assert!(config.validate().is_ok());

        config.server.port = 0;
        assert!(config.validate().is_err());

        config.server.port = 1323;
        config.kubernetes.namespace = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_config_file() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [kubernetes]
            namespace = "staging"

            [paths]
            views = "views"
            assets = "assets/img"

            [logging]
            level = "debug"
        "#;

        let config: KnapConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.kubernetes.namespace, "staging");
        assert_eq!(config.logging.level, "debug");
    }
}
