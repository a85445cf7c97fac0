//! Target sizes and the output preset catalogue.
//!
//! A processing request names its output canvas either through a preset
//! (`"story"`, `"square_post"`, ...) or as an explicit custom width × height
//! pair. Presets carry a label for display and a vertical placement bias used
//! by the fit calculator (see [`crate::imaging::fit`]): tall story formats
//! reserve the bottom of the canvas for caption overlays, wide thumbnails
//! for title text, so their content sits above dead center.
//!
//! Custom sizes are validated against [`SizeBounds`] before any decoding
//! work happens — an out-of-range request fails fast.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TargetSizeError {
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("size {width}x{height} outside allowed range {min}..={max} per edge")]
    OutOfBounds {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },
}

/// Output canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Longest edge, used to bound the compressor's working dimension.
    pub fn longest_edge(self) -> u32 {
        self.width.max(self.height)
    }
}

/// A named output format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
    /// Multiplier applied to the centered vertical offset (1.0 = dead center,
    /// lower values pull content toward the top of the canvas).
    pub vertical_bias: f32,
}

impl Preset {
    pub fn size(&self) -> TargetSize {
        TargetSize::new(self.width, self.height)
    }
}

/// Built-in formats. The bias table is part of the contract: `story` and
/// `thumbnail_wide` are the only formats that bias placement upward.
pub const BUILTIN_PRESETS: &[Preset] = &[
    Preset {
        name: "square_post",
        width: 1080,
        height: 1080,
        label: "Square Post",
        vertical_bias: 1.0,
    },
    Preset {
        name: "story",
        width: 1080,
        height: 1920,
        label: "Vertical Story",
        vertical_bias: 0.5,
    },
    Preset {
        name: "thumbnail_wide",
        width: 1280,
        height: 720,
        label: "Wide Thumbnail",
        vertical_bias: 0.8,
    },
    Preset {
        name: "landscape_post",
        width: 1200,
        height: 630,
        label: "Landscape Post",
        vertical_bias: 1.0,
    },
];

/// Look up a built-in preset by name.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    BUILTIN_PRESETS.iter().find(|p| p.name == name)
}

/// How the caller names the output size.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeSelector {
    /// A preset name, resolved against built-ins then user-configured presets.
    Preset(String),
    /// An explicit width × height pair, validated against configured bounds.
    Custom(TargetSize),
}

/// Allowed range for each edge of a custom size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self { min: 50, max: 4096 }
    }
}

impl SizeBounds {
    pub fn check(self, size: TargetSize) -> Result<(), TargetSizeError> {
        let in_range = |v: u32| v >= self.min && v <= self.max;
        if in_range(size.width) && in_range(size.height) {
            Ok(())
        } else {
            Err(TargetSizeError::OutOfBounds {
                width: size.width,
                height: size.height,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A selector resolved to concrete dimensions plus the placement bias to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    pub size: TargetSize,
    pub vertical_bias: f32,
}

/// Resolve a selector against the built-in catalogue and any user-defined
/// presets, validating custom sizes against `bounds`.
///
/// User-defined presets always place at dead center (bias 1.0); the bias
/// table is closed over the built-in formats.
pub fn resolve_target(
    selector: &SizeSelector,
    bounds: SizeBounds,
    user_presets: &std::collections::BTreeMap<String, TargetSize>,
) -> Result<ResolvedTarget, TargetSizeError> {
    match selector {
        SizeSelector::Preset(name) => {
            if let Some(preset) = find_preset(name) {
                return Ok(ResolvedTarget {
                    size: preset.size(),
                    vertical_bias: preset.vertical_bias,
                });
            }
            if let Some(&size) = user_presets.get(name.as_str()) {
                bounds.check(size)?;
                return Ok(ResolvedTarget {
                    size,
                    vertical_bias: 1.0,
                });
            }
            Err(TargetSizeError::UnknownPreset(name.clone()))
        }
        SizeSelector::Custom(size) => {
            bounds.check(*size)?;
            Ok(ResolvedTarget {
                size: *size,
                vertical_bias: 1.0,
            })
        }
    }
}
