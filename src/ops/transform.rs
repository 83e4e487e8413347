use image::{Rgba, RgbaImage, imageops::FilterType};
use kurbo::{Affine, Point};
use rayon::prelude::*;

use crate::{
    foundation::{
        core::TRANSPARENT,
        error::{FramecraftError, FramecraftResult},
    },
    frame::model::{Frame, FrameSeq},
};

/// Resize to exactly `width` x `height`.
///
/// `raw` selects nearest-neighbour sampling with no smoothing; otherwise Catmull-Rom is used.
pub fn resize(
    image: &RgbaImage,
    width: u32,
    height: u32,
    raw: bool,
) -> FramecraftResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(FramecraftError::invalid_argument(format!(
            "resize target {width}x{height} must be non-empty"
        )));
    }
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    let filter = if raw {
        FilterType::Nearest
    } else {
        FilterType::CatmullRom
    };
    Ok(image::imageops::resize(image, width, height, filter))
}

/// Scale width and height independently; the new sizes are truncated toward zero.
pub fn stretch(
    image: &RgbaImage,
    width_mul: f32,
    height_mul: f32,
    raw: bool,
) -> FramecraftResult<RgbaImage> {
    let (width, height) = scaled_dimensions(image.dimensions(), width_mul, height_mul)?;
    resize(image, width, height, raw)
}

/// Uniform [`stretch`].
pub fn resize_by(image: &RgbaImage, factor: f32, raw: bool) -> FramecraftResult<RgbaImage> {
    stretch(image, factor, factor, raw)
}

pub(crate) fn scaled_dimensions(
    (width, height): (u32, u32),
    width_mul: f32,
    height_mul: f32,
) -> FramecraftResult<(u32, u32)> {
    for mul in [width_mul, height_mul] {
        if !mul.is_finite() || mul <= 0.0 {
            return Err(FramecraftError::invalid_argument(format!(
                "scale multiplier {mul} must be a positive number"
            )));
        }
    }
    let w = (f64::from(width) * f64::from(width_mul)) as u32;
    let h = (f64::from(height) * f64::from(height_mul)) as u32;
    if w == 0 || h == 0 {
        return Err(FramecraftError::invalid_argument(format!(
            "scaling {width}x{height} by {width_mul}x{height_mul} leaves no pixels"
        )));
    }
    Ok((w, h))
}

/// Largest size with the same aspect ratio that fits inside `max_width` x `max_height`.
///
/// Returns the input size unchanged when it already fits.
pub fn fit_dimensions(
    (width, height): (u32, u32),
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let w = ((f64::from(width) * scale) as u32).max(1);
    let h = ((f64::from(height) * scale) as u32).max(1);
    (w, h)
}

/// Shrink (never enlarge) so the image fits inside the display bounds.
pub fn fit_within(
    image: &RgbaImage,
    max_width: u32,
    max_height: u32,
) -> FramecraftResult<RgbaImage> {
    let (w, h) = fit_dimensions(image.dimensions(), max_width, max_height);
    resize(image, w, h, false)
}

/// Canvas size that exactly bounds `width` x `height` rotated by `degrees`.
///
/// `floor(w·|cos θ| + h·|sin θ|)` by `floor(h·|cos θ| + w·|sin θ|)`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let theta = f64::from(degrees).to_radians();
    let sin = theta.sin().abs();
    let cos = theta.cos().abs();
    let w = f64::from(width);
    let h = f64::from(height);
    (
        (w * cos + h * sin).floor() as u32,
        (h * cos + w * sin).floor() as u32,
    )
}

/// Rotate clockwise by `degrees` around the image centre, centred on the output canvas.
///
/// The canvas defaults to [`rotated_bounds`]; pixels not covered by the source take
/// `background` (transparent when `None`). Sampling is nearest-neighbour.
pub fn rotate(
    image: &RgbaImage,
    degrees: f32,
    width: Option<u32>,
    height: Option<u32>,
    background: Option<Rgba<u8>>,
) -> FramecraftResult<RgbaImage> {
    if !degrees.is_finite() {
        return Err(FramecraftError::invalid_argument(format!(
            "rotation {degrees} is not a number"
        )));
    }
    let (src_w, src_h) = image.dimensions();
    let (bound_w, bound_h) = rotated_bounds(src_w, src_h, degrees);
    let out_w = width.unwrap_or(bound_w).max(1);
    let out_h = height.unwrap_or(bound_h).max(1);

    // translate((W - w) / 2, (H - h) / 2) * rotate_about(centre)
    let offset_x = (f64::from(out_w) - f64::from(src_w)) / 2.0;
    let offset_y = (f64::from(out_h) - f64::from(src_h)) / 2.0;
    let centre = Point::new(f64::from(src_w) / 2.0, f64::from(src_h) / 2.0);
    let forward = Affine::translate((offset_x, offset_y))
        * Affine::rotate_about(f64::from(degrees).to_radians(), centre);
    let inverse = forward.inverse();

    let mut out = RgbaImage::from_pixel(out_w, out_h, background.unwrap_or(TRANSPARENT));
    for (x, y, px) in out.enumerate_pixels_mut() {
        let src = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        let sx = src.x.floor();
        let sy = src.y.floor();
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(src_w) || sy >= f64::from(src_h) {
            continue;
        }
        let sample = *image.get_pixel(sx as u32, sy as u32);
        *px = match background {
            Some(bg) if sample[3] < 255 => blend_over(bg, sample),
            _ => sample,
        };
    }
    Ok(out)
}

/// [`stretch`] every frame; all frames share the first frame's target size.
pub fn stretch_frames(
    seq: FrameSeq,
    width_mul: f32,
    height_mul: f32,
    raw: bool,
) -> FramecraftResult<FrameSeq> {
    let (width, height) = scaled_dimensions(seq.dimensions(), width_mul, height_mul)?;
    map_frames(seq, |img| resize(&img, width, height, raw))
}

pub fn resize_frames(seq: FrameSeq, factor: f32, raw: bool) -> FramecraftResult<FrameSeq> {
    stretch_frames(seq, factor, factor, raw)
}

/// [`rotate`] every frame onto its default bounding canvas.
pub fn rotate_frames(
    seq: FrameSeq,
    degrees: f32,
    background: Option<Rgba<u8>>,
) -> FramecraftResult<FrameSeq> {
    map_frames(seq, |img| rotate(&img, degrees, None, None, background))
}

/// Replace every frame's pixels on the current rayon pool, keeping durations and order.
pub(crate) fn map_frames<F>(seq: FrameSeq, op: F) -> FramecraftResult<FrameSeq>
where
    F: Fn(RgbaImage) -> FramecraftResult<RgbaImage> + Sync,
{
    let frames = seq
        .into_frames()
        .into_par_iter()
        .map(|frame| -> FramecraftResult<Frame> {
            let duration_ms = frame.duration_ms;
            Ok(Frame::new(op(frame.image)?, duration_ms))
        })
        .collect::<FramecraftResult<Vec<_>>>()?;
    FrameSeq::new(frames)
}

/// Straight-alpha `src` over an opaque `dst`.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src[3]);
    let inv = 255 - sa;
    let mut out = [0u8; 4];
    for i in 0..3 {
        out[i] = ((u32::from(src[i]) * sa + u32::from(dst[i]) * inv + 127) / 255) as u8;
    }
    out[3] = dst[3].max(src[3]);
    Rgba(out)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/transform.rs"]
mod tests;
