//! Configuration file support for brgo.
//!
//! brgo reads two configuration files:
//! - Global: `<config dir>/config.toml` - User-wide defaults
//! - Project: `brgo.toml` in the current directory - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::translate::{DirectoryOptions, OutputLayout};

/// File name of the project configuration.
pub const PROJECT_CONFIG_NAME: &str = "brgo.toml";

/// brgo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Translation settings
    pub translate: TranslateConfig,

    /// Go toolchain settings
    pub toolchain: ToolchainConfig,
}

/// Translation-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TranslateConfig {
    /// Directory output layout (package, mirror)
    pub layout: Option<String>,

    /// Import path prefixes that become `go.mod` requirements
    pub external_prefixes: Option<Vec<String>>,

    /// Minimum Go version written to `go.mod`
    pub go_version: Option<String>,
}

/// Go toolchain configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolchainConfig {
    /// Path to the `go` binary
    pub go: Option<PathBuf>,

    /// Directory for intermediate files
    pub temp_dir: Option<PathBuf>,
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
        // Translate settings
        if other.translate.layout.is_some() {
            self.translate.layout = other.translate.layout;
        }
        if other.translate.external_prefixes.is_some() {
            self.translate.external_prefixes = other.translate.external_prefixes;
        }
        if other.translate.go_version.is_some() {
            self.translate.go_version = other.translate.go_version;
        }

        // Toolchain settings
        if other.toolchain.go.is_some() {
            self.toolchain.go = other.toolchain.go;
        }
        if other.toolchain.temp_dir.is_some() {
            self.toolchain.temp_dir = other.toolchain.temp_dir;
        }
    }

    /// Parse layout from config string.
    pub fn layout(&self) -> Option<OutputLayout> {
        let raw = self.translate.layout.as_ref()?;
        match raw.parse() {
            Ok(layout) => Some(layout),
            Err(e) => {
                tracing::warn!("ignoring configured layout: {}", e);
                None
            }
        }
    }

    /// Directory translation options with configured overrides applied.
    pub fn directory_options(&self) -> DirectoryOptions {
        let mut opts = DirectoryOptions::default();
        if let Some(layout) = self.layout() {
            opts.layout = layout;
        }
        if let Some(ref prefixes) = self.translate.external_prefixes {
            opts.external_prefixes = prefixes.clone();
        }
        if let Some(ref version) = self.translate.go_version {
            opts.go_version = version.clone();
        }
        opts
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (brgo.toml)
/// 2. Global config (<config dir>/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}
