//! Optional face-detection capability.
//!
//! Face-aware repositioning is a host capability, not a guarantee: a caller
//! may supply a native detector, a remote-inference client, or nothing at
//! all. The compositor treats absence and failure identically — placement
//! proceeds without adjustment and the failure is logged, never surfaced.

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("face detection failed: {0}")]
pub struct FaceDetectError(pub String);

/// Axis-aligned face bounding box in source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A face-detection backend.
///
/// Implementations return zero or more boxes; the compositor only consults
/// the first (primary) one.
pub trait FaceDetector {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<FaceBox>, FaceDetectError>;
}
