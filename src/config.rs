//! Generator configuration module.
//!
//! Handles loading, validating, and merging `favicons.toml`. Stock defaults
//! are overridden by the user file, and command-line flags override both.
//!
//! ## Config File Location
//!
//! `favicons.toml` in the working directory is picked up automatically. Any
//! other file can be passed with `--config <file>`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! background_color = "#000000"  # "#rgb", "#rrggbb", "rgb(r, g, b)", [r, g, b] or ["r", "g", "b"]
//! transparent = true            # canvas alpha 0 instead of the opaque color
//! base_url = "/"                # prefix for link hrefs and prefixed names
//!
//! [processing]
//! max_processes = 4             # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! The icon catalog itself is built in and cannot be configured.
//!
//! Unknown keys are rejected to catch typos early.

use crate::color::ColorSpec;
use crate::generator::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "favicons.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `favicons.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaviconsConfig {
    /// Canvas color behind the source image.
    pub background_color: ColorSpec,
    /// Whether the canvas is fully transparent.
    pub transparent: bool,
    /// Prepended verbatim to file names in markup.
    pub base_url: String,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for FaviconsConfig {
    fn default() -> Self {
        let options = GeneratorOptions::default();
        Self {
            background_color: options.background_color,
            transparent: options.transparent,
            base_url: options.base_url,
            processing: ProcessingConfig::default(),
        }
    }
}

impl FaviconsConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.background_color.parse() {
            return Err(ConfigError::Validation(format!("background_color: {e}")));
        }
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The settings a [`Generator`](crate::generator::Generator) is built from.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            background_color: self.background_color.clone(),
            transparent: self.transparent,
            base_url: self.base_url.clone(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel rendering workers in concurrent mode.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(FaviconsConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FaviconsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FaviconsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `favicons.toml` in the given directory.
///
/// Falls back to stock defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<FaviconsConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(&dir.join(CONFIG_FILE))?)
}

/// Load config from an explicitly named file, which must exist.
pub fn load_config_file(path: &Path) -> Result<FaviconsConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value()?, Some(overlay))
}

/// Returns a fully-commented stock `favicons.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Favicons Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# Canvas color behind the source image. Accepts "#rgb", "#rrggbb",
# "rgb(r, g, b)" or an array of three channels [r, g, b] in 0-255, written
# as integers or as numeric strings.
# SVG sources are rasterized onto this color.
background_color = "#000000"

# Make the canvas fully transparent (alpha 0) instead of opaque.
transparent = true

# Prefix for href values in the generated <link> tags and for
# `names --prefixed`. Prepended as-is, no URL joining.
base_url = "/"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for `generate --concurrent`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
