//! The pixel pipeline — pure Rust, no system dependencies.
//!
//! | Stage | Module / function |
//! |---|---|
//! | **Compress** | [`compress::compress`] — bound working-copy cost |
//! | **Background** | [`background::synthesize_background`] — edge sampling |
//! | **Fit** | [`fit::compute_fit`] — pure scale/placement math |
//! | **Composite** | [`compositor::composite`] — fill, overlay, encode |
//!
//! The module is split into:
//! - **fit**: Pure functions for scale and placement math (unit testable)
//! - **background**: [`BackgroundStyle`] inference and painting
//! - **compress**: Decode and cost-bounding of the working copy
//! - **face**: [`FaceDetector`] optional-capability trait
//! - **compositor**: Canvas assembly and JPEG output

pub mod background;
pub mod compress;
pub mod compositor;
pub mod face;
pub mod fit;

pub use background::{BackgroundStyle, synthesize_background};
pub use compress::{CompressedImage, compress};
pub use compositor::{ProcessedArtifact, composite};
pub use face::{FaceBox, FaceDetectError, FaceDetector};
pub use fit::{DragOffset, FitParams, compute_fit};

use thiserror::Error;

/// Errors from the pixel pipeline. Decode failures are fatal to the request;
/// everything recoverable (edge sampling, face detection) degrades in place
/// and never reaches this type.
#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("failed to decode input image: {0}")]
    Decode(String),
    #[error("JPEG encode failed: {0}")]
    Encode(String),
}
