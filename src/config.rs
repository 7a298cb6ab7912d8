//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`POLY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use polychora_core::{DEFAULT_EDGES, DEFAULT_FACES, DEFAULT_WEIGHTS};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Graph construction configuration
    #[serde(default)]
    pub build: BuildConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
    /// Projection configuration
    #[serde(default)]
    pub view: ViewConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            export: ExportConfig::default(),
            view: ViewConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`POLY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // POLY_BUILD__POLYTOPE=torus -> build.polytope = "torus"
        figment = figment.merge(Env::prefixed("POLY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Graph construction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Polytope to build when none is named on the command line
    pub polytope: String,
    /// Edge digit mask
    pub edges: u32,
    /// Face digit mask
    pub faces: u32,
    /// Vertex weight digits
    pub weights: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            polytope: "24-cell".to_string(),
            edges: DEFAULT_EDGES,
            faces: DEFAULT_FACES,
            weights: DEFAULT_WEIGHTS,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output path for the edge-list export
    pub path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: "polychora.graph".to_string(),
        }
    }
}

/// Projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Distance from the projection pole to the hyperplane
    pub projection_w0: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            projection_w0: 1.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.build.polytope, "24-cell");
        assert_eq!(config.build.faces, 111111);
        assert_eq!(config.view.projection_w0, 1.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("polytope"));
        assert!(toml.contains("log_level"));
    }
}
