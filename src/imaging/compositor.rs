//! Canvas composition and output encoding.
//!
//! Paints the synthesized background onto a target-sized canvas, overlays
//! the Lanczos3-resampled source at the computed placement, optionally
//! re-nudges placement so a detected face stays on canvas, and encodes the
//! result as JPEG.
//!
//! The face pass mirrors the placement math exactly: the primary box is
//! mapped through the same scale and offsets, and only when it lands
//! outside the canvas are the offsets recomputed (`max(offset, -box_edge *
//! scale)` per axis) and the canvas redrawn.

use super::background::{BackgroundStyle, paint_background};
use super::compress::encode_jpeg;
use super::face::{FaceBox, FaceDetector};
use super::fit::FitParams;
use super::ImagingError;
use crate::presets::TargetSize;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage, imageops};

/// The final encoded output plus the size it was produced at.
#[derive(Debug, Clone)]
pub struct ProcessedArtifact {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    pub target: TargetSize,
}

/// Compose and encode in one step.
///
/// Detector absence or failure never fails the request; the base placement
/// is kept and the condition logged.
pub fn composite(
    image: &DynamicImage,
    target: TargetSize,
    fit: FitParams,
    background: BackgroundStyle,
    detector: Option<&dyn FaceDetector>,
    quality: u8,
) -> Result<ProcessedArtifact, ImagingError> {
    let canvas = render(image, target, fit, background, detector);
    let bytes = encode_jpeg(&DynamicImage::ImageRgb8(canvas), quality)?;
    Ok(ProcessedArtifact { bytes, target })
}

/// Compose the target-sized canvas without encoding.
pub fn render(
    image: &DynamicImage,
    target: TargetSize,
    fit: FitParams,
    background: BackgroundStyle,
    detector: Option<&dyn FaceDetector>,
) -> RgbImage {
    let (sw, sh) = fit.scaled_dimensions((image.width(), image.height()));
    let scaled = image.resize_exact(sw, sh, FilterType::Lanczos3).to_rgb8();

    let mut canvas = paint_background(background, target);
    draw(&mut canvas, &scaled, fit.offset_x, fit.offset_y);

    if let Some(detector) = detector {
        match detector.detect(image) {
            Ok(faces) => {
                if let Some(&face) = faces.first()
                    && let Some((x, y)) = adjusted_offsets(fit, face, target)
                {
                    canvas = paint_background(background, target);
                    draw(&mut canvas, &scaled, x, y);
                }
            }
            Err(e) => {
                log::warn!("face detection unavailable, keeping base placement: {e}");
            }
        }
    }

    canvas
}

fn draw(canvas: &mut RgbImage, scaled: &RgbImage, x: f32, y: f32) {
    imageops::overlay(canvas, scaled, x.round() as i64, y.round() as i64);
}

/// Offsets that bring the primary face back on canvas, or `None` when the
/// box already fits at the base placement.
fn adjusted_offsets(fit: FitParams, face: FaceBox, target: TargetSize) -> Option<(f32, f32)> {
    let fx = fit.offset_x + face.x * fit.scale;
    let fy = fit.offset_y + face.y * fit.scale;
    let fw = face.width * fit.scale;
    let fh = face.height * fit.scale;

    let outside = fx < 0.0
        || fx + fw > target.width as f32
        || fy < 0.0
        || fy + fh > target.height as f32;
    if !outside {
        return None;
    }
    Some((
        fit.offset_x.max(-face.x * fit.scale),
        fit.offset_y.max(-face.y * fit.scale),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::face::tests::{FailingDetector, MockDetector};
    use image::Rgb;

    const RED: BackgroundStyle = BackgroundStyle::Solid(Rgb([255, 0, 0]));

    fn gray_source(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([128, 128, 128])))
    }

    fn centered_fit(scale: f32, target: TargetSize, source: (u32, u32)) -> FitParams {
        FitParams {
            scale,
            offset_x: (target.width as f32 - source.0 as f32 * scale) / 2.0,
            offset_y: (target.height as f32 - source.1 as f32 * scale) / 2.0,
        }
    }

    #[test]
    fn render_has_target_dimensions() {
        let target = TargetSize::new(200, 100);
        let fit = centered_fit(1.0, target, (50, 50));
        let canvas = render(&gray_source(50, 50), target, fit, RED, None);
        assert_eq!(canvas.dimensions(), (200, 100));
    }

    #[test]
    fn letterbox_shows_background_image_sits_at_offset() {
        let target = TargetSize::new(100, 100);
        let fit = centered_fit(1.0, target, (50, 50));
        let canvas = render(&gray_source(50, 50), target, fit, RED, None);

        // Corners are background, center is source
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(99, 99), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(50, 50), Rgb([128, 128, 128]));
        // Just outside the 25..75 drawn band
        assert_eq!(*canvas.get_pixel(20, 50), Rgb([255, 0, 0]));
    }

    #[test]
    fn gradient_background_fills_letterbox_bands() {
        let target = TargetSize::new(60, 120);
        let fit = centered_fit(1.0, target, (60, 40));
        let style = BackgroundStyle::LinearGradient {
            top: Rgb([0, 0, 0]),
            bottom: Rgb([255, 255, 255]),
        };
        let canvas = render(&gray_source(60, 40), target, fit, style, None);
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(0, 119), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(30, 60), Rgb([128, 128, 128]));
    }

    #[test]
    fn face_inside_canvas_keeps_base_placement() {
        let target = TargetSize::new(100, 100);
        let fit = centered_fit(1.0, target, (50, 50));
        let face = FaceBox {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 20.0,
        };
        assert_eq!(adjusted_offsets(fit, face, target), None);

        let detector = MockDetector::with_boxes(vec![face]);
        let with = render(&gray_source(50, 50), target, fit, RED, Some(&detector));
        let without = render(&gray_source(50, 50), target, fit, RED, None);
        assert_eq!(detector.call_count(), 1);
        assert_eq!(with.as_raw(), without.as_raw());
    }

    #[test]
    fn face_cropped_left_pulls_image_right() {
        // Cover-style placement: image hangs off the left edge
        let target = TargetSize::new(100, 100);
        let fit = FitParams {
            scale: 1.0,
            offset_x: -40.0,
            offset_y: 0.0,
        };
        // Face at source x=10 maps to canvas x=-30: cropped
        let face = FaceBox {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 30.0,
        };
        let (x, y) = adjusted_offsets(fit, face, target).unwrap();
        // max(-40, -10) = -10 brings the face flush with the left edge
        assert_eq!(x, -10.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn face_adjustment_scales_with_fit() {
        let target = TargetSize::new(100, 100);
        let fit = FitParams {
            scale: 2.0,
            offset_x: 0.0,
            offset_y: -50.0,
        };
        // y=5 maps to -40 at scale 2: cropped above
        let face = FaceBox {
            x: 10.0,
            y: 5.0,
            width: 10.0,
            height: 10.0,
        };
        let (x, y) = adjusted_offsets(fit, face, target).unwrap();
        assert_eq!(x, 0.0);
        assert_eq!(y, -10.0); // max(-50, -5*2)
    }

    #[test]
    fn face_redraw_changes_canvas() {
        let target = TargetSize::new(100, 100);
        let fit = FitParams {
            scale: 1.0,
            offset_x: -60.0,
            offset_y: 0.0,
        };
        let face = FaceBox {
            x: 5.0,
            y: 5.0,
            width: 20.0,
            height: 20.0,
        };
        let detector = MockDetector::with_boxes(vec![face]);
        let src = gray_source(120, 100);
        let adjusted = render(&src, target, fit, RED, Some(&detector));
        let base = render(&src, target, fit, RED, None);
        // Base placement leaves a red band on the right (image 120 wide at
        // x=-60 covers 0..60); the nudge to x=-5 covers the full width.
        assert_eq!(*base.get_pixel(80, 50), Rgb([255, 0, 0]));
        assert_eq!(*adjusted.get_pixel(80, 50), Rgb([128, 128, 128]));
    }

    #[test]
    fn failing_detector_keeps_base_placement() {
        let target = TargetSize::new(100, 100);
        let fit = centered_fit(1.0, target, (50, 50));
        let with = render(
            &gray_source(50, 50),
            target,
            fit,
            RED,
            Some(&FailingDetector),
        );
        let without = render(&gray_source(50, 50), target, fit, RED, None);
        assert_eq!(with.as_raw(), without.as_raw());
    }

    #[test]
    fn no_faces_detected_keeps_base_placement() {
        let target = TargetSize::new(80, 80);
        let fit = centered_fit(1.0, target, (40, 40));
        let detector = MockDetector::with_boxes(vec![]);
        let with = render(&gray_source(40, 40), target, fit, RED, Some(&detector));
        let without = render(&gray_source(40, 40), target, fit, RED, None);
        assert_eq!(with.as_raw(), without.as_raw());
    }

    #[test]
    fn composite_encodes_decodable_jpeg_at_exact_size() {
        let target = TargetSize::new(160, 90);
        let fit = centered_fit(1.0, target, (80, 80));
        let artifact =
            composite(&gray_source(80, 80), target, fit, RED, None, 93).unwrap();

        assert_eq!(artifact.target, target);
        let decoded = image::load_from_memory(&artifact.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (160, 90));
    }
}
