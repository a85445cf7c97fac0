//! Pre-processing compressor.
//!
//! Bounds the cost of everything downstream (edge sampling, resampling,
//! compositing) by capping the working copy's dimensions and encoded size
//! before the visual pipeline runs. Not part of the visual algorithm: the
//! fit and background stages see the compressed copy as "the source".
//!
//! Never upscales. A source already inside both budgets passes through with
//! a single re-encode to measure it.

use super::ImagingError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

/// Quality the budget loop starts from.
const START_QUALITY: u8 = 90;
/// Quality floor before the loop starts halving dimensions instead.
const MIN_QUALITY: u8 = 40;
/// Edge floor below which the loop gives up shrinking.
const MIN_EDGE: u32 = 64;

/// A decoded working copy plus the encoded size it achieved.
#[derive(Debug)]
pub struct CompressedImage {
    pub image: DynamicImage,
    /// Encoded JPEG size of the working copy at the settled quality.
    pub encoded_len: usize,
}

impl CompressedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Decode `bytes` and reduce the result until its longest edge is at most
/// `max_dimension` and its re-encoded size at most `max_bytes`.
///
/// Quality steps down first (90 → 40 in steps of 10); if the budget still
/// isn't met, dimensions halve until an edge floor. Aspect ratio is always
/// preserved.
pub fn compress(
    bytes: &[u8],
    max_bytes: u64,
    max_dimension: u32,
) -> Result<CompressedImage, ImagingError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ImagingError::Decode(e.to_string()))?;

    let mut image = if decoded.width().max(decoded.height()) > max_dimension {
        decoded.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        decoded
    };

    let mut quality = START_QUALITY;
    let mut encoded = encode_jpeg(&image, quality)?;
    while encoded.len() as u64 > max_bytes && quality > MIN_QUALITY {
        quality -= 10;
        encoded = encode_jpeg(&image, quality)?;
    }
    while encoded.len() as u64 > max_bytes && image.width().max(image.height()) > MIN_EDGE {
        image = image.resize(
            (image.width() / 2).max(1),
            (image.height() / 2).max(1),
            FilterType::Lanczos3,
        );
        encoded = encode_jpeg(&image, quality)?;
    }

    Ok(CompressedImage {
        image,
        encoded_len: encoded.len(),
    })
}

/// Encode to an in-memory JPEG at the given quality.
pub(crate) fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImagingError> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| ImagingError::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn undecodable_bytes_fail_with_decode_error() {
        let err = compress(b"definitely not an image", 1024 * 1024, 2048).unwrap_err();
        assert!(matches!(err, ImagingError::Decode(_)));
    }

    #[test]
    fn oversized_source_is_capped_to_max_dimension() {
        let bytes = png_bytes(800, 400);
        let compressed = compress(&bytes, 10 * 1024 * 1024, 400).unwrap();
        // Longest edge capped, aspect preserved
        assert_eq!(compressed.dimensions(), (400, 200));
    }

    #[test]
    fn small_source_is_never_upscaled() {
        let bytes = png_bytes(120, 90);
        let compressed = compress(&bytes, 10 * 1024 * 1024, 2048).unwrap();
        assert_eq!(compressed.dimensions(), (120, 90));
    }

    #[test]
    fn tight_byte_budget_shrinks_output() {
        let bytes = png_bytes(512, 512);
        let compressed = compress(&bytes, 3 * 1024, 2048).unwrap();
        assert!(
            compressed.encoded_len as u64 <= 3 * 1024,
            "encoded {} bytes, wanted <= 3072",
            compressed.encoded_len
        );
        assert!(compressed.dimensions().0 < 512);
    }

    #[test]
    fn generous_budget_keeps_dimensions() {
        let bytes = png_bytes(256, 256);
        let compressed = compress(&bytes, 10 * 1024 * 1024, 2048).unwrap();
        assert_eq!(compressed.dimensions(), (256, 256));
        assert!(compressed.encoded_len > 0);
    }
}
