//! Processing configuration module.
//!
//! Handles loading and validating an optional `framefit.toml`. Everything has
//! a sensible default; a config file only needs the values it wants to
//! override. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [limits]
//! custom_min = 50       # Smallest allowed edge for custom sizes
//! custom_max = 4096     # Largest allowed edge for custom sizes
//! # max_upscale = 4.0   # Cap on upscaling small sources (omit for unlimited)
//!
//! [encoding]
//! quality = 93          # JPEG quality (1-100)
//!
//! [compression]
//! max_bytes = 1048576   # Pre-processing re-encode budget (bytes)
//! # max_dimension = 2048 # Working-copy longest edge (omit = longest target edge)
//!
//! # User-defined presets, resolved after the built-in catalogue
//! [presets.gumroad_large]
//! width = 1280
//! height = 720
//! label = "Gumroad Large"
//! ```

use crate::presets::{SizeBounds, TargetSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
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

/// Top-level processing configuration.
///
/// All fields have defaults matching the documented behavior; user files
/// override sparsely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitterConfig {
    /// Custom-size bounds and upscale cap.
    pub limits: LimitsConfig,
    /// Output encoding settings.
    pub encoding: EncodingConfig,
    /// Pre-processing compressor budget.
    pub compression: CompressionConfig,
    /// Extra presets by name; resolved after the built-in catalogue.
    pub presets: BTreeMap<String, PresetEntry>,
}

/// Size limits for custom targets plus the optional upscale cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Smallest allowed edge for custom sizes.
    pub custom_min: u32,
    /// Largest allowed edge for custom sizes.
    pub custom_max: u32,
    /// Cap applied to the fit scale when the source must grow to fill the
    /// target. `None` means small sources scale fully.
    pub max_upscale: Option<f32>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            custom_min: 50,
            custom_max: 4096,
            max_upscale: None,
        }
    }
}

impl LimitsConfig {
    pub fn bounds(&self) -> SizeBounds {
        SizeBounds {
            min: self.custom_min,
            max: self.custom_max,
        }
    }
}

/// Output encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingConfig {
    /// JPEG quality (1-100).
    pub quality: u8,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { quality: 93 }
    }
}

/// Pre-processing compressor budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    /// Encoded-size budget for the working copy, in bytes.
    pub max_bytes: u64,
    /// Longest edge of the working copy. `None` defaults to the longest edge
    /// of the requested target at processing time.
    pub max_dimension: Option<u32>,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_dimension: None,
        }
    }
}

/// A user-defined preset entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresetEntry {
    pub width: u32,
    pub height: u32,
    /// Display label; defaults to the preset name.
    pub label: Option<String>,
}

impl PresetEntry {
    pub fn size(&self) -> TargetSize {
        TargetSize::new(self.width, self.height)
    }
}

impl FitterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encoding.quality == 0 || self.encoding.quality > 100 {
            return Err(ConfigError::Validation(
                "encoding.quality must be 1-100".into(),
            ));
        }
        if self.limits.custom_min == 0 {
            return Err(ConfigError::Validation(
                "limits.custom_min must be non-zero".into(),
            ));
        }
        if self.limits.custom_max < self.limits.custom_min {
            return Err(ConfigError::Validation(
                "limits.custom_max must be >= limits.custom_min".into(),
            ));
        }
        if let Some(up) = self.limits.max_upscale
            && up < 1.0
        {
            return Err(ConfigError::Validation(
                "limits.max_upscale must be >= 1.0".into(),
            ));
        }
        if self.compression.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "compression.max_bytes must be non-zero".into(),
            ));
        }
        let bounds = self.limits.bounds();
        for (name, entry) in &self.presets {
            if bounds.check(entry.size()).is_err() {
                return Err(ConfigError::Validation(format!(
                    "preset '{}' ({}x{}) outside limits {}..={}",
                    name, entry.width, entry.height, bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }

    /// Name → size map of the user-defined presets, the shape
    /// [`crate::presets::resolve_target`] consumes.
    pub fn user_preset_sizes(&self) -> BTreeMap<String, TargetSize> {
        self.presets
            .iter()
            .map(|(name, entry)| (name.clone(), entry.size()))
            .collect()
    }
}

/// Load and validate a config file.
///
/// Unknown keys are rejected; a missing file is the caller's concern (pass
/// nothing and use `FitterConfig::default()` instead).
pub fn load_config(path: &Path) -> Result<FitterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: FitterConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
