use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::composite::CompositedFrame;
use crate::error::GlyphcastResult;
use crate::model::RatioPolicy;

/// Rescale a composited raster to exactly `width x height` samples.
///
/// The ratio policy only affects letterboxing/cropping before the resize; the
/// returned image always has the requested dimensions.
pub fn resample(
    frame: &CompositedFrame,
    width: u32,
    height: u32,
    ratio: RatioPolicy,
) -> GlyphcastResult<RgbaImage> {
    let src = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or_else(
        || anyhow::anyhow!("composited raster buffer does not match its dimensions"),
    )?;

    let out = match ratio {
        RatioPolicy::Fill => imageops::resize(&src, width, height, FilterType::Lanczos3),
        RatioPolicy::Fit => fit_letterbox(&src, width, height),
        RatioPolicy::Original => crop_to_aspect(&src, width, height),
    };
    Ok(out)
}

/// Scale preserving aspect ratio, centered on a transparent canvas.
fn fit_letterbox(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let scale = (f64::from(width) / f64::from(sw)).min(f64::from(height) / f64::from(sh));
    let scaled_w = ((f64::from(sw) * scale).round() as u32).clamp(1, width);
    let scaled_h = ((f64::from(sh) * scale).round() as u32).clamp(1, height);

    let resized = imageops::resize(src, scaled_w, scaled_h, FilterType::Lanczos3);
    let mut canvas = RgbaImage::new(width, height);
    imageops::overlay(
        &mut canvas,
        &resized,
        i64::from((width - scaled_w) / 2),
        i64::from((height - scaled_h) / 2),
    );
    canvas
}

/// Center-crop to the target aspect ratio, then scale to fill.
fn crop_to_aspect(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let target_aspect = f64::from(width) / f64::from(height);
    let src_aspect = f64::from(sw) / f64::from(sh);

    let (crop_w, crop_h) = if src_aspect > target_aspect {
        let w = ((f64::from(sh) * target_aspect).round() as u32).clamp(1, sw);
        (w, sh)
    } else {
        let h = ((f64::from(sw) / target_aspect).round() as u32).clamp(1, sh);
        (sw, h)
    };

    let cropped = imageops::crop_imm(src, (sw - crop_w) / 2, (sh - crop_h) / 2, crop_w, crop_h);
    imageops::resize(&cropped.to_image(), width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: [u8; 4]) -> CompositedFrame {
        CompositedFrame {
            width,
            height,
            rgba: px.repeat(width as usize * height as usize),
        }
    }

    #[test]
    fn every_policy_yields_exact_target_dimensions() {
        let frame = solid(7, 13, [10, 20, 30, 255]);
        for ratio in [RatioPolicy::Fill, RatioPolicy::Fit, RatioPolicy::Original] {
            let out = resample(&frame, 5, 3, ratio).unwrap();
            assert_eq!(out.dimensions(), (5, 3), "{ratio:?}");
        }
    }

    #[test]
    fn fill_of_a_solid_image_stays_solid() {
        let frame = solid(8, 8, [200, 100, 50, 255]);
        let out = resample(&frame, 3, 2, RatioPolicy::Fill).unwrap();
        for px in out.pixels() {
            assert_eq!(px.0, [200, 100, 50, 255]);
        }
    }

    #[test]
    fn fit_letterboxes_a_wide_image_with_transparent_rows() {
        // 8x2 source into a 4x4 grid: content occupies the middle row band,
        // top and bottom stay transparent.
        let frame = solid(8, 2, [255, 255, 255, 255]);
        let out = resample(&frame, 4, 4, RatioPolicy::Fit).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(0, 0).0[3], 0, "top border should be empty");
        assert_eq!(out.get_pixel(0, 3).0[3], 0, "bottom border should be empty");
        let middle = out.get_pixel(1, 1).0;
        assert_eq!(middle[3], 255, "content band should be opaque");
    }

    #[test]
    fn original_crops_the_wide_axis() {
        // left half red, right half green; cropping a 2:1 source to 1:1 keeps
        // the middle, so both colors survive but the outer edges are gone.
        let mut frame = solid(8, 4, [255, 0, 0, 255]);
        for y in 0..4usize {
            for x in 4..8usize {
                let i = (y * 8 + x) * 4;
                frame.rgba[i..i + 4].copy_from_slice(&[0, 255, 0, 255]);
            }
        }
        let out = resample(&frame, 4, 4, RatioPolicy::Original).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert!(out.get_pixel(0, 0).0[0] > 128, "left side should stay red");
        assert!(out.get_pixel(3, 0).0[1] > 128, "right side should stay green");
    }

    #[test]
    fn upscaling_works_too() {
        let frame = solid(1, 1, [9, 9, 9, 255]);
        let out = resample(&frame, 6, 6, RatioPolicy::Fill).unwrap();
        assert_eq!(out.dimensions(), (6, 6));
        for px in out.pixels() {
            assert_eq!(px.0, [9, 9, 9, 255]);
        }
    }
}
