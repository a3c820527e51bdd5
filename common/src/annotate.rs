//! Overlay rendering.
//!
//! Two draw paths: model-supplied boxes are drawn onto a copy of the
//! image; with no boxes a synthetic "no tumor" overlay is drawn instead
//! (semi-transparent rectangle near the center, outlined label in the
//! strip below it). Same image + same theme + same detections yields a
//! byte-identical overlay.

use std::path::Path;
use std::sync::OnceLock;

use ab_glyph::{FontVec, PxScale};
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::debug;

use crate::color::Rgb;
use crate::detect::Detection;
use crate::error::{NeuroVisionError, Result};
use crate::theme::{ThemeKind, ThemeTable};

/// Both image panels show a fixed 400x400 view.
pub const DISPLAY_SIZE: u32 = 400;

/// Inset of the synthetic "no tumor" rectangle from every image edge.
pub const NEGATIVE_INSET: u32 = 30;

/// Alpha of the rectangle fill (0-255).
pub const NEGATIVE_ALPHA: u8 = 100;

/// Synthetic confidence reported for a negative outcome.
pub const NEGATIVE_CONFIDENCE: f32 = 0.9;

const OUTLINE_WIDTH: u32 = 3;
const LABEL_SCALE: f32 = 18.0;
const STROKE_OFFSET: i32 = 2;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

static LABEL_FONT: OnceLock<Option<FontVec>> = OnceLock::new();

fn label_font() -> Option<&'static FontVec> {
    LABEL_FONT
        .get_or_init(|| {
            for path in FONT_CANDIDATES {
                if let Ok(data) = std::fs::read(path) {
                    if let Ok(font) = FontVec::try_from_vec(data) {
                        debug!("label font: {path}");
                        return Some(font);
                    }
                }
            }
            debug!("no label font found, overlays render without text");
            None
        })
        .as_ref()
}

fn rgba(color: Rgb, alpha: u8) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, alpha])
}

/// Decode an image file and resize it to the display size.
pub fn load_display_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| NeuroVisionError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    Ok(img
        .resize_exact(DISPLAY_SIZE, DISPLAY_SIZE, image::imageops::FilterType::Triangle)
        .to_rgba8())
}

/// Draw the model's boxes and per-box confidence labels.
pub fn annotate_positive(base: &RgbaImage, detections: &[Detection], theme: &ThemeTable) -> RgbaImage {
    let mut img = base.clone();
    let color = rgba(theme.positive, 255);
    let stroke = rgba(theme.bg, 255);

    for det in detections {
        let x = det.x.round().max(0.0) as i32;
        let y = det.y.round().max(0.0) as i32;
        let w = det.width.round().max(1.0) as u32;
        let h = det.height.round().max(1.0) as u32;
        draw_box_outline(&mut img, x, y, w, h, color);

        if let Some(font) = label_font() {
            let text = format!("{:.0}%", det.confidence * 100.0);
            let scale = PxScale::from(LABEL_SCALE);
            let (_, th) = text_size(scale, font, &text);
            let label_y = (y - th as i32 - 2).max(0);
            draw_outlined_text(&mut img, color, stroke, x, label_y, scale, font, &text);
        }
    }

    img
}

/// Synthesize the "no tumor" overlay: a translucent rectangle covering
/// the center of the scan plus an outlined label below it.
pub fn annotate_negative(base: &RgbaImage, confidence: f32, theme: &ThemeTable) -> RgbaImage {
    let mut img = base.clone();
    let (w, h) = img.dimensions();
    if w <= 2 * NEGATIVE_INSET || h <= 2 * NEGATIVE_INSET {
        return img;
    }

    let fill = rgba(theme.negative, NEGATIVE_ALPHA);
    for y in NEGATIVE_INSET..h - NEGATIVE_INSET {
        for x in NEGATIVE_INSET..w - NEGATIVE_INSET {
            img.get_pixel_mut(x, y).blend(&fill);
        }
    }

    let outline = rgba(theme.negative, 255);
    draw_box_outline(
        &mut img,
        NEGATIVE_INSET as i32,
        NEGATIVE_INSET as i32,
        w - 2 * NEGATIVE_INSET,
        h - 2 * NEGATIVE_INSET,
        outline,
    );

    if let Some(font) = label_font() {
        let text = format!("No Tumor Detected ({:.0}%)", confidence * 100.0);
        let scale = PxScale::from(LABEL_SCALE);
        let (tw, th) = text_size(scale, font, &text);
        let (x, y) = negative_label_origin((w, h), (tw, th), NEGATIVE_INSET);
        draw_outlined_text(&mut img, outline, rgba(theme.bg, 255), x, y, scale, font, &text);
    }

    img
}

/// Where the negative label goes: right-aligned in the strip below the
/// rectangle, so it cannot intersect it.
pub fn negative_label_origin(image: (u32, u32), text: (u32, u32), inset: u32) -> (i32, i32) {
    let (w, h) = image;
    let (tw, th) = text;
    let x = w.saturating_sub(tw + 8);
    let y = if th < inset {
        h - inset + (inset - th) / 2
    } else {
        h.saturating_sub(th)
    };
    (x as i32, y as i32)
}

/// Per-theme transform for displayed images: dark stretches contrast,
/// high-contrast inverts, light is the identity.
pub fn apply_display_transform(img: &RgbaImage, kind: ThemeKind) -> RgbaImage {
    match kind {
        ThemeKind::Light => img.clone(),
        ThemeKind::Dark => autocontrast(img),
        ThemeKind::HighContrast => inverted(img),
    }
}

fn draw_box_outline(canvas: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Rgba<u8>) {
    for i in 0..OUTLINE_WIDTH {
        let (rw, rh) = (w.saturating_sub(2 * i), h.saturating_sub(2 * i));
        if rw < 2 || rh < 2 {
            break;
        }
        draw_hollow_rect_mut(canvas, Rect::at(x + i as i32, y + i as i32).of_size(rw, rh), color);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_outlined_text(
    canvas: &mut RgbaImage,
    fill: Rgba<u8>,
    stroke: Rgba<u8>,
    x: i32,
    y: i32,
    scale: PxScale,
    font: &FontVec,
    text: &str,
) {
    for (dx, dy) in [(-STROKE_OFFSET, 0), (STROKE_OFFSET, 0), (0, -STROKE_OFFSET), (0, STROKE_OFFSET)] {
        draw_text_mut(canvas, stroke, x + dx, y + dy, scale, font, text);
    }
    draw_text_mut(canvas, fill, x, y, scale, font, text);
}

fn inverted(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = 255 - pixel[0];
        pixel[1] = 255 - pixel[1];
        pixel[2] = 255 - pixel[2];
    }
    out
}

/// Per-channel min/max stretch to the full 0-255 range.
fn autocontrast(img: &RgbaImage) -> RgbaImage {
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for pixel in img.pixels() {
        for c in 0..3 {
            min[c] = min[c].min(pixel[c]);
            max[c] = max[c].max(pixel[c]);
        }
    }

    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for c in 0..3 {
            if max[c] > min[c] {
                let span = (max[c] - min[c]) as u16;
                pixel[c] = (((pixel[c] - min[c]) as u16 * 255) / span) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeKind, LIGHT_THEME};

    fn gray_base() -> RgbaImage {
        RgbaImage::from_pixel(DISPLAY_SIZE, DISPLAY_SIZE, Rgba([80, 80, 80, 255]))
    }

    #[test]
    fn test_negative_overlay_is_deterministic() {
        let base = gray_base();
        let a = annotate_negative(&base, NEGATIVE_CONFIDENCE, &LIGHT_THEME);
        let b = annotate_negative(&base, NEGATIVE_CONFIDENCE, &LIGHT_THEME);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_negative_overlay_changes_center_not_corner() {
        let base = gray_base();
        let out = annotate_negative(&base, NEGATIVE_CONFIDENCE, &LIGHT_THEME);
        assert_ne!(out.get_pixel(200, 200), base.get_pixel(200, 200));
        assert_eq!(out.get_pixel(5, 5), base.get_pixel(5, 5));
    }

    #[test]
    fn test_negative_overlay_on_tiny_image_is_a_copy() {
        let base = RgbaImage::from_pixel(40, 40, Rgba([10, 10, 10, 255]));
        let out = annotate_negative(&base, NEGATIVE_CONFIDENCE, &LIGHT_THEME);
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn test_negative_label_never_intersects_rectangle() {
        // Rectangle spans inset..size-inset; the label must sit below it
        // and inside the image.
        let (x, y) = negative_label_origin((400, 400), (220, 18), NEGATIVE_INSET);
        assert!(y as u32 >= 400 - NEGATIVE_INSET);
        assert!(y as u32 + 18 <= 400);
        assert!(x >= 0 && x as u32 + 220 <= 400);
    }

    #[test]
    fn test_positive_draws_box_edge() {
        let base = gray_base();
        let det = Detection {
            x: 100.0,
            y: 100.0,
            width: 80.0,
            height: 60.0,
            confidence: 0.87,
        };
        let out = annotate_positive(&base, &[det], &LIGHT_THEME);
        let expected = Rgba([
            LIGHT_THEME.positive.r,
            LIGHT_THEME.positive.g,
            LIGHT_THEME.positive.b,
            255,
        ]);
        // Bottom-left corner of the box, well away from the label text.
        assert_eq!(*out.get_pixel(100, 159), expected);
        assert_eq!(out.get_pixel(200, 200), base.get_pixel(200, 200));
    }

    #[test]
    fn test_positive_with_no_boxes_is_a_copy() {
        let base = gray_base();
        let out = annotate_positive(&base, &[], &LIGHT_THEME);
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn test_light_transform_is_identity() {
        let base = gray_base();
        let out = apply_display_transform(&base, ThemeKind::Light);
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn test_high_contrast_transform_is_an_involution() {
        let mut base = gray_base();
        base.put_pixel(0, 0, Rgba([1, 2, 3, 255]));
        let twice = apply_display_transform(
            &apply_display_transform(&base, ThemeKind::HighContrast),
            ThemeKind::HighContrast,
        );
        assert_eq!(twice.as_raw(), base.as_raw());
    }

    #[test]
    fn test_autocontrast_flat_image_unchanged() {
        let base = gray_base();
        let out = apply_display_transform(&base, ThemeKind::Dark);
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn test_autocontrast_stretches_to_full_range() {
        let mut base = RgbaImage::from_pixel(2, 1, Rgba([100, 100, 100, 255]));
        base.put_pixel(1, 0, Rgba([150, 150, 150, 255]));
        let out = apply_display_transform(&base, ThemeKind::Dark);
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(1, 0)[0], 255);
    }
}
