//! Build configuration.
//!
//! Handles loading, validating, and merging `apidoc.toml`. The file lives in
//! the source directory, next to the root module it describes:
//!
//! ```text
//! api/
//! ├── apidoc.toml      # Build config (optional)
//! ├── init.json        # Generated output (default location)
//! └── lovr/            # Root module
//!     ├── init.toml
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! root_module = "lovr"       # Directory of the root module
//! callbacks_dir = "callbacks" # Directory of callback records inside the root module
//! descriptor = "init"        # Stem of the record file describing a directory
//! format = "json"            # Output format: "json" or "lua"
//! # output = "init.json"     # Output path relative to the source directory
//! strict_naming = false      # Reject entries that fit no naming convention
//! ```
//!
//! The file is sparse: it is merged on top of the stock defaults, so it only
//! needs the keys it changes. Unknown keys are rejected to catch typos early.
//! Command-line flags override whatever the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside the source directory.
pub const CONFIG_FILE: &str = "apidoc.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Serialization format of the generated data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON document.
    #[default]
    Json,
    /// Lua chunk returning one table.
    Lua,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Lua => "lua",
        }
    }
}

/// Build configuration loaded from `apidoc.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory of the root module, relative to the source directory.
    pub root_module: String,
    /// Directory inside the root module that holds callback records.
    pub callbacks_dir: String,
    /// File stem of the record that describes a module or object directory.
    pub descriptor: String,
    /// Output format.
    pub format: OutputFormat,
    /// Output path relative to the source directory.
    /// When absent, `init.<format extension>` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Reject directory entries that fit no naming convention instead of
    /// skipping them with a warning.
    pub strict_naming: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_module: "lovr".to_string(),
            callbacks_dir: "callbacks".to_string(),
            descriptor: "init".to_string(),
            format: OutputFormat::Json,
            output: None,
            strict_naming: false,
        }
    }
}

impl BuildConfig {
    /// Validate that names are usable as single path segments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("root_module", &self.root_module),
            ("callbacks_dir", &self.callbacks_dir),
            ("descriptor", &self.descriptor),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single name, got '{value}'"
                )));
            }
        }
        for (key, value) in [
            ("root_module", &self.root_module),
            ("callbacks_dir", &self.callbacks_dir),
        ] {
            if !value.starts_with(char::is_lowercase) {
                return Err(ConfigError::Validation(format!(
                    "{key} must start with a lowercase letter, got '{value}'"
                )));
            }
        }
        if self.output.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        Ok(())
    }

    /// Where the data file is written for a given source directory.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        match &self.output {
            Some(output) => source.join(output),
            None => source.join(format!("init.{}", self.format.extension())),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Lay the keys of a sparse `apidoc.toml` over the stock defaults.
///
/// Every key is a scalar, so a key present in `overlay` replaces the
/// default outright and absent keys keep their default.
pub fn overlay_keys(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            base_table.extend(overlay_table);
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `apidoc.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => overlay_keys(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for a source directory: stock defaults with `apidoc.toml`
/// merged on top, unknown keys rejected, result validated.
pub fn load_config(source: &Path) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(source)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `apidoc.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# apidoc configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the source directory, next to the root module:
#   api/apidoc.toml
#   api/lovr/init.toml
#
# Unknown keys will cause an error.

# Directory of the root module. Its lowercase subdirectories are the other
# modules; its callbacks directory holds callback records.
root_module = "lovr"

# Directory inside the root module holding callback records. Callback keys
# omit this segment: lovr/callbacks/draw -> lovr.draw
callbacks_dir = "callbacks"

# Stem of the record that describes a module or object directory.
descriptor = "init"

# Output format: "json" or "lua".
format = "json"

# Output path relative to the source directory.
# Omit to use init.json (or init.lua for the lua format).
# output = "init.json"

# Naming discipline inside module directories:
#   lowercase file -> function     Uppercase directory -> object
#   Uppercase file -> enum         lowercase directory -> module
# Entries that fit none of these (e.g. _notes.toml) are skipped with a
# warning. Set to true to make them an error instead.
strict_naming = false
"##
}
