//! `archcfg.toml` configuration.
//!
//! Optional. Searched for upward from the working directory. Command-line
//! flags override it; it overrides the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// File name looked for in each ancestor directory.
pub const CONFIG_FILE: &str = "archcfg.toml";

/// Target used when neither the command line nor the config names one.
pub const DEFAULT_TARGET: &str = "loongarch64-unknown-linux-gnu";

/// How `archcfg resolve` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Json,
    Toml,
}

/// The top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchcfgConfig {
    /// Default target and options.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Target triple.
    #[serde(default)]
    pub target: Option<String>,
    /// Options placed before the command-line options, so the command line wins.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Output section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Logging section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace.
    #[serde(default)]
    pub level: Option<String>,
}

impl ArchcfgConfig {
    /// Search upward from `start_dir` for `archcfg.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: ArchcfgConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing archcfg.toml")
    }

    /// The configured default target, if any.
    pub fn default_target(&self) -> Option<&str> {
        self.defaults.target.as_deref()
    }

    /// Options to place ahead of the command-line ones.
    pub fn default_options(&self) -> &[String] {
        &self.defaults.options
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.format
    }

    /// The configured log level, if any.
    pub fn log_level(&self) -> Result<Option<LevelFilter>> {
        self.logging
            .level
            .as_deref()
            .map(|s| {
                s.parse::<LevelFilter>()
                    .with_context(|| format!("invalid log level '{s}' in {CONFIG_FILE}"))
            })
            .transpose()
    }
}
