/// Configuration module for closest-symbol.
///
/// Handles loading, validating, and providing default configuration values.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::symbols::languages::LANGUAGE_NAMES;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

// ── Default value functions ──────────────────────────────────────────

fn default_no_result_message() -> String {
    "No super implementation found".to_string()
}

fn default_languages() -> Vec<String> {
    LANGUAGE_NAMES.iter().map(|s| s.to_string()).collect()
}

// ── Config structs ───────────────────────────────────────────────────

/// How the host presents the navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    #[default]
    Goto,
    Peek,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Languages the symbol provider parses.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NavigationConfig {
    #[serde(default)]
    pub mode: NavigationMode,

    /// Shown by the host when there is nothing to navigate to.
    #[serde(default = "default_no_result_message")]
    pub no_result_message: String,
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            languages: default_languages(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::default(),
            no_result_message: default_no_result_message(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, defaults to `"config.json"`.
    /// If the file does not exist, returns a default config and generates a
    /// template file for the default path.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            DEFAULT_CONFIG_PATH
        } else {
            config_path
        };

        if !Path::new(path).exists() {
            info!("{path} not found, using defaults");
            let cfg = Self::default();

            if path == DEFAULT_CONFIG_PATH {
                match cfg.save(path) {
                    Ok(()) => info!("Generated config template: {path}"),
                    Err(e) => warn!("Failed to generate config template: {e}"),
                }
            }

            return Ok(cfg);
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {path}"))?;

        let cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {path}: {e}");
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {path}");

        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data).with_context(|| format!("failed to write config: {path}"))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.languages.is_empty(),
            "at least one language must be enabled"
        );
        for lang in &self.languages {
            anyhow::ensure!(
                LANGUAGE_NAMES.contains(&lang.as_str()),
                "unknown language: {lang}"
            );
        }
        anyhow::ensure!(
            !self.navigation.no_result_message.is_empty(),
            "navigation.no_result_message must not be empty"
        );
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
