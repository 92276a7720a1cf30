use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::ShellConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ShellConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/pageshell/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pageshell").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `ShellConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using built-in route table");
            return Ok(ShellConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ShellConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The server base URL parses
    /// - At least one route is configured and names are unique
    /// - The default route, chrome routes and alias keys name existing routes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = reqwest::Url::parse(&self.server.base_url) {
            return Err(invalid(format!(
                "Invalid base_url '{}': {}",
                self.server.base_url, e
            )));
        }

        if self.routes.is_empty() {
            return Err(invalid("At least one route must be configured".to_string()));
        }

        let mut names = HashSet::new();
        for route in &self.routes {
            if route.name.is_empty() {
                return Err(invalid("Route names must not be empty".to_string()));
            }
            if !names.insert(route.name.as_str()) {
                return Err(invalid(format!("Duplicate route '{}'", route.name)));
            }
        }

        let router = &self.router;
        if !names.contains(router.default_route.as_str()) {
            return Err(invalid(format!(
                "Default route '{}' not found in configured routes",
                router.default_route
            )));
        }

        let referenced = router
            .chrome_routes
            .iter()
            .chain(router.container_aliases.keys())
            .chain(router.controller_aliases.keys());
        for name in referenced {
            if !names.contains(name.as_str()) {
                return Err(invalid(format!(
                    "Route '{}' referenced by router settings is not configured",
                    name
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}
