//! Configuration file support for sigwire.
//!
//! sigwire supports two configuration file locations:
//! - Global: `~/.sigwire/config.toml` - User-wide defaults
//! - Project: `.sigwire/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::LanguageTarget;

/// Default output directory for generated sources.
pub const DEFAULT_OUT_DIR: &str = "generated";

/// Default version range written for generated package dependencies.
pub const DEFAULT_SDK_VERSION: &str = "^3.0.0";

/// sigwire configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator settings
    pub generator: GeneratorConfig,

    /// Model settings
    pub model: ModelConfig,
}

/// Generation-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Runtime targets to generate (empty = all)
    pub targets: Vec<LanguageTarget>,

    /// Output directory for generated sources
    pub out_dir: Option<PathBuf>,

    /// Version range for generated package dependencies
    pub sdk_version: Option<String>,
}

/// Model-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model files or directories
    pub paths: Vec<PathBuf>,

    /// Services to process, by id, name or SDK id (empty = all)
    pub services: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.generator.targets.is_empty() {
            self.generator.targets = other.generator.targets;
        }
        if other.generator.out_dir.is_some() {
            self.generator.out_dir = other.generator.out_dir;
        }
        if other.generator.sdk_version.is_some() {
            self.generator.sdk_version = other.generator.sdk_version;
        }

        if !other.model.paths.is_empty() {
            self.model.paths = other.model.paths;
        }
        if !other.model.services.is_empty() {
            self.model.services = other.model.services;
        }
    }

    /// Get the targets to generate, defaulting to every target.
    pub fn targets(&self) -> Vec<LanguageTarget> {
        if self.generator.targets.is_empty() {
            LanguageTarget::ALL.to_vec()
        } else {
            self.generator.targets.clone()
        }
    }

    /// Get the output directory.
    pub fn out_dir(&self) -> PathBuf {
        self.generator
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    /// Get the dependency version range.
    pub fn sdk_version(&self) -> &str {
        self.generator
            .sdk_version
            .as_deref()
            .unwrap_or(DEFAULT_SDK_VERSION)
    }
}

/// Get the global sigwire config directory (~/.sigwire).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".sigwire"))
}

/// Get the global config path (~/.sigwire/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.sigwire/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".sigwire").join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.sigwire/config.toml)
/// 2. Global config (~/.sigwire/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}
