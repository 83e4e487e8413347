use image::RgbaImage;

use crate::{
    foundation::core::Rgb24,
    foundation::error::FramecraftResult,
    frame::model::{Frame, FrameSeq},
    ops::composite::{CompositeOpts, composite},
    ops::cutout::cutout_frames,
    ops::transform::resize,
};

/// How a speech bubble is applied to the media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BubbleMode {
    /// Draw the bubble over the top edge.
    Overlay,
    /// Stencil the bubble's shape out of every frame, painting it with `fill`.
    Cutout { fill: Rgb24 },
}

/// Scale `bubble` to the media width (aspect kept) and apply it at the top-left corner.
#[tracing::instrument(skip(base, bubble), fields(frames = base.len()))]
pub fn speech_bubble(
    base: FrameSeq,
    bubble: &RgbaImage,
    mode: BubbleMode,
) -> FramecraftResult<FrameSeq> {
    let (base_w, _) = base.dimensions();
    let (bubble_w, bubble_h) = bubble.dimensions();
    let height = (u64::from(bubble_h) * u64::from(base_w) / u64::from(bubble_w.max(1))).max(1);
    let fitted = resize(bubble, base_w, height as u32, false)?;

    match mode {
        BubbleMode::Overlay => composite(
            base,
            FrameSeq::single(Frame::new(fitted, 0)),
            &CompositeOpts::default(),
        ),
        BubbleMode::Cutout { fill } => cutout_frames(base, &fitted, 0, 0, fill.value()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/bubble.rs"]
mod tests;
