//! Background synthesis from edge sampling.
//!
//! The page background behind a letterboxed image should continue the
//! image's own border tone instead of defaulting to stark white. This module
//! reads pixel color at evenly spaced points along all four source edges and
//! classifies the border as either uniform (solid fill of the mean color) or
//! varying (vertical linear gradient between the averaged top and bottom
//! edges). The gradient is anchored to the *target* canvas geometry, not the
//! source, so letterbox bars blend into the drawn image.
//!
//! Classification is deterministic: same source, same style.

use crate::presets::TargetSize;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

/// Sample positions along each edge, endpoints included.
pub const SAMPLES_PER_EDGE: u32 = 8;

/// Per-channel absolute difference from the first sample below which the
/// border counts as uniform (0-255 scale).
pub const SOLID_CHANNEL_DELTA: u8 = 15;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Fill style for the target canvas, consumed uniformly by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundStyle {
    /// Uniform border: fill with the mean sampled color.
    Solid(Rgb<u8>),
    /// Varying border: vertical gradient between averaged edge colors.
    LinearGradient { top: Rgb<u8>, bottom: Rgb<u8> },
}

/// Inspect the source's edges and pick a background style.
///
/// Never fails: a degenerate (zero-area) source falls back to plain white
/// with a warning.
pub fn synthesize_background(image: &DynamicImage) -> BackgroundStyle {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        log::warn!("background sampling skipped for zero-area source, using white");
        return BackgroundStyle::Solid(WHITE);
    }

    let top = sample_row(image, 0);
    let bottom = sample_row(image, h - 1);
    let left = sample_column(image, 0);
    let right = sample_column(image, w - 1);

    let all: Vec<Rgb<u8>> = top
        .iter()
        .chain(&bottom)
        .chain(&left)
        .chain(&right)
        .copied()
        .collect();

    if is_uniform(&all) {
        BackgroundStyle::Solid(mean_color(&all))
    } else {
        BackgroundStyle::LinearGradient {
            top: mean_color(&top),
            bottom: mean_color(&bottom),
        }
    }
}

/// Render a background style onto a fresh target-sized canvas.
pub fn paint_background(style: BackgroundStyle, target: TargetSize) -> RgbImage {
    match style {
        BackgroundStyle::Solid(color) => {
            RgbImage::from_pixel(target.width, target.height, color)
        }
        BackgroundStyle::LinearGradient { top, bottom } => {
            let span = target.height.saturating_sub(1).max(1) as f32;
            RgbImage::from_fn(target.width, target.height, |_, y| {
                lerp_color(top, bottom, y as f32 / span)
            })
        }
    }
}

/// Evenly spaced positions along an edge of length `len`, endpoints included.
fn sample_positions(len: u32) -> impl Iterator<Item = u32> {
    let last = (SAMPLES_PER_EDGE - 1) as f32;
    (0..SAMPLES_PER_EDGE).map(move |i| ((len - 1) as f32 * i as f32 / last).round() as u32)
}

fn sample_row(image: &DynamicImage, y: u32) -> Vec<Rgb<u8>> {
    sample_positions(image.width())
        .map(|x| rgb_at(image, x, y))
        .collect()
}

fn sample_column(image: &DynamicImage, x: u32) -> Vec<Rgb<u8>> {
    sample_positions(image.height())
        .map(|y| rgb_at(image, x, y))
        .collect()
}

fn rgb_at(image: &DynamicImage, x: u32, y: u32) -> Rgb<u8> {
    let p = image.get_pixel(x, y);
    Rgb([p[0], p[1], p[2]])
}

/// True when every sample is within [`SOLID_CHANNEL_DELTA`] of the first on
/// all three channels.
fn is_uniform(samples: &[Rgb<u8>]) -> bool {
    let Some(first) = samples.first() else {
        return true;
    };
    samples.iter().all(|s| {
        (0..3).all(|c| first[c].abs_diff(s[c]) <= SOLID_CHANNEL_DELTA)
    })
}

fn mean_color(samples: &[Rgb<u8>]) -> Rgb<u8> {
    if samples.is_empty() {
        return WHITE;
    }
    let n = samples.len() as u32;
    let mut sums = [0u32; 3];
    for s in samples {
        for c in 0..3 {
            sums[c] += s[c] as u32;
        }
    }
    Rgb(sums.map(|sum| ((sum + n / 2) / n) as u8))
}

fn lerp_color(from: Rgb<u8>, to: Rgb<u8>, t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
    ])
}
