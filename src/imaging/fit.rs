//! Pure fit calculations: scale policy and placement.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! The scale policy is contain-first: fit the whole source inside the target,
//! letterboxing against the synthesized background. When containing would
//! shrink the source below half size the subject loses legibility, so the
//! policy flips to cover (fill the frame, crop the excess). The boundary is
//! strict: a contain scale of exactly 0.5 still contains.

use crate::presets::TargetSize;

/// Zoom factor bounds, matching the interactive editor's wheel clamp.
pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 2.0;

/// Maximum drag repositioning along either axis, in target pixels.
pub const DRAG_LIMIT: f32 = 200.0;

/// Contain scale below which the policy switches to cover.
const COVER_FALLBACK: f32 = 0.5;

/// Derived placement for one composition. Transient: recomputed on every
/// zoom or drag change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl FitParams {
    /// Scaled source dimensions, rounded to whole pixels.
    pub fn scaled_dimensions(&self, source: (u32, u32)) -> (u32, u32) {
        let (sw, sh) = source;
        (
            (sw as f32 * self.scale).round().max(1.0) as u32,
            (sh as f32 * self.scale).round().max(1.0) as u32,
        )
    }
}

/// User drag repositioning, in target pixels. Defaults to none.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragOffset {
    pub x: f32,
    pub y: f32,
}

impl DragOffset {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Largest scale that fits the source entirely inside the target.
pub fn contain_scale(source: (u32, u32), target: TargetSize) -> f32 {
    let (sw, sh) = source;
    (target.width as f32 / sw as f32).min(target.height as f32 / sh as f32)
}

/// Smallest scale that fills the target entirely (may crop).
pub fn cover_scale(source: (u32, u32), target: TargetSize) -> f32 {
    let (sw, sh) = source;
    (target.width as f32 / sw as f32).max(target.height as f32 / sh as f32)
}

/// Clamp a zoom factor to the supported range.
pub fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Clamp drag offsets to the supported repositioning range.
pub fn clamp_drag(drag: DragOffset) -> DragOffset {
    DragOffset {
        x: drag.x.clamp(-DRAG_LIMIT, DRAG_LIMIT),
        y: drag.y.clamp(-DRAG_LIMIT, DRAG_LIMIT),
    }
}

/// Compute scale and placement for drawing `source` onto `target`.
///
/// - Contain scale unless it falls strictly below 0.5, then cover.
/// - `max_upscale`, when set, caps how far a small source may grow.
/// - `zoom` and `drag` are clamped to their documented ranges.
/// - `vertical_bias` multiplies the centered (pre-drag) vertical offset;
///   1.0 is dead center, lower values pull the subject upward. It comes from
///   the preset table ([`crate::presets::Preset::vertical_bias`]).
///
/// # Examples
/// ```
/// # use framefit::imaging::fit::{compute_fit, DragOffset};
/// # use framefit::presets::TargetSize;
/// // 2000x1000 into 1000x1000: contain scale is exactly 0.5, which contains.
/// let fit = compute_fit((2000, 1000), TargetSize::new(1000, 1000), 1.0,
///                       DragOffset::default(), 1.0, None);
/// assert_eq!(fit.scale, 0.5);
/// assert_eq!(fit.offset_y, 250.0); // letterboxed top/bottom
/// ```
pub fn compute_fit(
    source: (u32, u32),
    target: TargetSize,
    zoom: f32,
    drag: DragOffset,
    vertical_bias: f32,
    max_upscale: Option<f32>,
) -> FitParams {
    let contain = contain_scale(source, target);
    let mut scale = if contain < COVER_FALLBACK {
        cover_scale(source, target)
    } else {
        contain
    };
    if let Some(cap) = max_upscale {
        scale = scale.min(cap);
    }
    scale *= clamp_zoom(zoom);

    let (sw, sh) = source;
    let scaled_w = sw as f32 * scale;
    let scaled_h = sh as f32 * scale;
    let drag = clamp_drag(drag);

    FitParams {
        scale,
        offset_x: (target.width as f32 - scaled_w) / 2.0 + drag.x,
        offset_y: (target.height as f32 - scaled_h) / 2.0 * vertical_bias + drag.y,
    }
}
