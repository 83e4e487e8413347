use image::RgbaImage;

use crate::{
    foundation::core::Rgb24,
    foundation::error::FramecraftResult,
    frame::model::FrameSeq,
    ops::transform::map_frames,
};

/// Stencil `stencil` out of `target`: every pixel under a non-transparent stencil pixel becomes
/// `fill_rgb` (opaque).
///
/// `target` is taken by value, mutated in place and handed back. Stencil pixels that map outside
/// `target` are skipped. Fails with `InvalidArgument` when `fill_rgb` has bits above the low 24.
pub fn cutout(
    mut target: RgbaImage,
    stencil: &RgbaImage,
    x: i32,
    y: i32,
    fill_rgb: u32,
) -> FramecraftResult<RgbaImage> {
    let fill = Rgb24::new(fill_rgb)?.to_rgba();
    let (width, height) = target.dimensions();
    let (width, height) = (i64::from(width), i64::from(height));

    for (sx, sy, px) in stencil.enumerate_pixels() {
        if px[3] == 0 {
            continue;
        }
        let tx = i64::from(x) + i64::from(sx);
        let ty = i64::from(y) + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= width || ty >= height {
            continue;
        }
        target.put_pixel(tx as u32, ty as u32, fill);
    }
    Ok(target)
}

/// [`cutout`] applied to every frame on the current rayon pool.
#[tracing::instrument(skip(seq, stencil), fields(frames = seq.len()))]
pub fn cutout_frames(
    seq: FrameSeq,
    stencil: &RgbaImage,
    x: i32,
    y: i32,
    fill_rgb: u32,
) -> FramecraftResult<FrameSeq> {
    Rgb24::new(fill_rgb)?;
    map_frames(seq, |img| cutout(img, stencil, x, y, fill_rgb))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/cutout.rs"]
mod tests;
