//! The processing pipeline: one image in, one fitted artifact out.
//!
//! Stages run strictly in order, each feeding the next:
//!
//! ```text
//! 1. Compress     input bytes → bounded working copy       (imaging::compress)
//! 2. Background   working copy → BackgroundStyle           (imaging::background)
//! 3. Fit          dimensions → scale + placement           (imaging::fit)
//! 4. Composite    canvas fill + overlay + encode → JPEG    (imaging::compositor)
//! ```
//!
//! Target-size validation happens before stage 1 so an invalid request
//! never pays for a decode. Every call is independent — no shared state, no
//! decode cache — so concurrent requests cannot interfere; a caller that
//! abandons a request simply drops the result.

use crate::config::FitterConfig;
use crate::imaging::{
    self, ImagingError, ProcessedArtifact, compute_fit, synthesize_background,
};
use crate::imaging::face::FaceDetector;
use crate::imaging::fit::DragOffset;
use crate::presets::{SizeSelector, TargetSizeError, resolve_target};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("invalid target size: {0}")]
    TargetSize(#[from] TargetSizeError),
    #[error(transparent)]
    Imaging(#[from] ImagingError),
}

/// Caller-adjustable placement knobs. Both are clamped to their documented
/// ranges by the fit calculator, so any frontend can pass raw input through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessOptions {
    /// Zoom factor, clamped to [0.5, 2.0].
    pub zoom: f32,
    /// Drag repositioning in target pixels, clamped to ±200 per axis.
    pub drag: DragOffset,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            drag: DragOffset::default(),
        }
    }
}

/// Fit `input` onto the canvas named by `selector`.
///
/// Fails only on an invalid target size or undecodable input. Background
/// sampling and face detection degrade gracefully inside the pipeline.
/// The output always has exactly the requested dimensions.
pub fn process_image(
    input: &[u8],
    selector: &SizeSelector,
    options: &ProcessOptions,
    config: &FitterConfig,
    detector: Option<&dyn FaceDetector>,
) -> Result<ProcessedArtifact, ProcessError> {
    // Fail fast: validate the target before any pixel work
    let resolved = resolve_target(selector, config.limits.bounds(), &config.user_preset_sizes())?;

    let max_dimension = config
        .compression
        .max_dimension
        .unwrap_or_else(|| resolved.size.longest_edge());
    let compressed = imaging::compress(input, config.compression.max_bytes, max_dimension)?;

    let background = synthesize_background(&compressed.image);
    let fit = compute_fit(
        compressed.dimensions(),
        resolved.size,
        options.zoom,
        options.drag,
        resolved.vertical_bias,
        config.limits.max_upscale,
    );

    let artifact = imaging::composite(
        &compressed.image,
        resolved.size,
        fit,
        background,
        detector,
        config.encoding.quality,
    )?;
    Ok(artifact)
}

/// The record the downstream metadata store accepts for a processed image.
///
/// Field names match the store's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub original_name: String,
    pub processed_url: String,
    pub width: u32,
    pub height: u32,
}

impl ArtifactRecord {
    pub fn new(
        original_name: impl Into<String>,
        processed_url: impl Into<String>,
        artifact: &ProcessedArtifact,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            processed_url: processed_url.into(),
            width: artifact.target.width,
            height: artifact.target.height,
        }
    }
}
