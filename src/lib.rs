//! # Framefit
//!
//! Fits an image onto a social-media or marketplace canvas preset,
//! synthesizing a background from the image's own border so the subject is
//! never harshly cropped against stark white.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Every request runs the same strictly ordered pipeline:
//!
//! ```text
//! 1. Compress     input bytes → bounded working copy
//! 2. Background   edge samples → Solid or LinearGradient
//! 3. Fit          dimensions + zoom/drag → scale and placement
//! 4. Composite    fill + overlay (+ face nudge) → encoded JPEG
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: the fit stage is a pure function and the background
//!   stage a pure classification; both are unit-tested without encoding a
//!   single byte.
//! - **One code path**: solid fill, gradient fill, and face-aware placement
//!   are configuration of a single compositor, not parallel variants.
//! - **Bounded cost**: the compressor caps dimensions and bytes up front, so
//!   sampling and resampling costs are predictable regardless of input.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | `process_image` — the one operation callers use |
//! | [`presets`] | Preset catalogue, custom-size validation, bias table |
//! | [`config`] | `framefit.toml` loading and validation |
//! | [`imaging`] | The pixel work: fit math, background synthesis, compositing |
//!
//! # Design Decisions
//!
//! ## Contain-First Scaling
//!
//! The source fits entirely inside the target (letterboxed against the
//! synthesized background) unless containing would shrink it below half
//! size, at which point the policy flips to cover — an aggressively shrunk
//! subject loses legibility, so filling the frame wins over preserving every
//! edge pixel. The boundary (exactly 0.5) contains.
//!
//! ## Background From The Border
//!
//! Eight samples per edge classify the border as uniform (solid fill of the
//! mean) or varying (vertical gradient between averaged top and bottom
//! edges, painted across the target canvas). One deterministic policy,
//! consumed uniformly by the compositor as a two-variant
//! [`imaging::BackgroundStyle`].
//!
//! ## Face Detection As Optional Capability
//!
//! Face-aware repositioning sits behind the [`imaging::FaceDetector`] trait.
//! Callers may plug in a native detector, a remote one, or nothing; absence
//! and failure alike degrade to the base placement with a log line. The
//! compositor's contract never changes.
//!
//! ## No Global State
//!
//! Configuration and capabilities are constructed by the caller and passed
//! in. Each request is fully independent — no decode cache, no shared
//! scratch surface — so concurrent callers cannot race.
//!
//! # Example
//!
//! ```no_run
//! use framefit::{FitterConfig, ProcessOptions, SizeSelector, process_image};
//!
//! let input = std::fs::read("photo.png").unwrap();
//! let artifact = process_image(
//!     &input,
//!     &SizeSelector::Preset("story".into()),
//!     &ProcessOptions::default(),
//!     &FitterConfig::default(),
//!     None,
//! )
//! .unwrap();
//! std::fs::write("story.jpg", &artifact.bytes).unwrap();
//! ```

pub mod config;
pub mod imaging;
pub mod pipeline;
pub mod presets;

pub use config::{ConfigError, FitterConfig, load_config};
pub use imaging::{
    BackgroundStyle, DragOffset, FaceBox, FaceDetectError, FaceDetector, FitParams,
    ImagingError, ProcessedArtifact,
};
pub use pipeline::{ArtifactRecord, ProcessError, ProcessOptions, process_image};
pub use presets::{
    BUILTIN_PRESETS, Preset, SizeSelector, TargetSize, TargetSizeError, find_preset,
};
