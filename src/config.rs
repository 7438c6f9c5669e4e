//! CLI configuration.
//!
//! The library itself takes no configuration; parsing is a pure function of
//! the request text. The `iiif-request` binary reads an optional `iiif.toml`
//! for values that would otherwise have to be repeated on every invocation.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [image]
//! # width = 4000            # Source dimensions used by `check`
//! # height = 3000           # when --width/--height are not given
//!
//! [output]
//! format = "text"           # "text" or "json"
//! ```
//!
//! Unknown keys are rejected to catch typos early. A missing file is not an
//! error: stock defaults apply.

use crate::bounds::ImageInfo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of `iiif.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Default source image dimensions.
    pub image: ImageConfig,
    /// How results are printed.
    pub output: OutputConfig,
}

impl CliConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image.width == Some(0) || self.image.height == Some(0) {
            return Err(ConfigError::Validation(
                "image.width and image.height must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Source image dimensions for `check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolve image dimensions, preferring command-line values over config.
///
/// Returns `None` unless both width and height are known.
pub fn effective_image_info(
    config: &ImageConfig,
    width: Option<u32>,
    height: Option<u32>,
) -> Option<ImageInfo> {
    let width = width.or(config.width)?;
    let height = height.or(config.height)?;
    Some(ImageInfo::new(width, height))
}

/// Load and validate a config file.
///
/// Returns stock defaults if `path` does not exist.
pub fn load_config(path: &Path) -> Result<CliConfig, ConfigError> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: CliConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `iiif.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# iiif-request configuration
# ==========================
#
# Every key is optional. Delete anything you don't need to override.
# Unknown keys are rejected.

[image]
# Source image dimensions used by `iiif-request check` when --width and
# --height are not passed. Both must be known for the check to run.
# width = 4000
# height = 3000

[output]
# "text" prints a readable summary, "json" a machine-readable report.
format = "text"
"##
}
