//! Two-source frame compositing.
//!
//! Both inputs are aligned to a shared [`MIN_UNIT_MS`] timeline and the shorter one loops to the
//! length of the longer. Each run of identical adjacent `(base, overlay)` pairings is rendered
//! once; slots that reuse the previous pairing only extend the previous frame's duration.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::{
    foundation::core::{MIN_UNIT_MS, TRANSPARENT},
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::{Frame, FrameSeq},
    frame::seq::{collapse_runs, slot_runs},
};

/// Placement of the overlay relative to the base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeOpts {
    /// Overlay offset from the base's top-left corner; may be negative.
    pub x: i32,
    pub y: i32,
    /// Grow the canvas to fit both inputs instead of clipping the overlay to the base.
    pub expand: bool,
    /// Canvas fill drawn under everything; transparent when `None`.
    pub expand_color: Option<Rgba<u8>>,
}

/// Output canvas size and where each input is drawn on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    pub base_x: i64,
    pub base_y: i64,
    pub overlay_x: i64,
    pub overlay_y: i64,
}

impl CanvasLayout {
    pub fn compute(
        base: (u32, u32),
        overlay: (u32, u32),
        opts: &CompositeOpts,
    ) -> FramecraftResult<Self> {
        if !opts.expand {
            return Ok(Self {
                width: base.0,
                height: base.1,
                base_x: 0,
                base_y: 0,
                overlay_x: i64::from(opts.x),
                overlay_y: i64::from(opts.y),
            });
        }

        let (width, base_x) = expand_axis(base.0, overlay.0, opts.x);
        let (height, base_y) = expand_axis(base.1, overlay.1, opts.y);
        let width = u32::try_from(width)
            .map_err(|_| FramecraftError::invalid_argument("composite canvas width overflows"))?;
        let height = u32::try_from(height)
            .map_err(|_| FramecraftError::invalid_argument("composite canvas height overflows"))?;
        Ok(Self {
            width,
            height,
            base_x,
            base_y,
            overlay_x: i64::from(opts.x.max(0)),
            overlay_y: i64::from(opts.y.max(0)),
        })
    }
}

/// `(canvas extent, base offset)` along one axis of an expanding composite.
fn expand_axis(base: u32, overlay: u32, offset: i32) -> (i64, i64) {
    let base = i64::from(base);
    let overlay = i64::from(overlay);
    let offset = i64::from(offset);
    if offset < 0 {
        ((base - offset).max(overlay), -offset)
    } else {
        (base.max(overlay + offset), 0)
    }
}

/// Draw `overlay` on top of `base`, looping the shorter animation.
///
/// Pairing runs are rendered on the current rayon pool.
#[tracing::instrument(
    skip(base, overlay),
    fields(base_frames = base.len(), overlay_frames = overlay.len())
)]
pub fn composite(
    base: FrameSeq,
    overlay: FrameSeq,
    opts: &CompositeOpts,
) -> FramecraftResult<FrameSeq> {
    let layout = CanvasLayout::compute(base.dimensions(), overlay.dimensions(), opts)?;
    if layout.width == 0 || layout.height == 0 {
        return Err(FramecraftError::invalid_argument("composite canvas must be non-empty"));
    }

    let base_runs = slot_runs(base.durations());
    let overlay_runs = slot_runs(overlay.durations());
    let slot_count = total_slots(&base_runs).max(total_slots(&overlay_runs));
    let pairings = pair_runs(&base_runs, &overlay_runs, slot_count);
    tracing::debug!(
        slots = slot_count,
        rendered = pairings.len(),
        width = layout.width,
        height = layout.height,
        "composite plan"
    );

    let base_frames = base.frames();
    let overlay_frames = overlay.frames();
    let fill = opts.expand_color.unwrap_or(TRANSPARENT);
    let frames: Vec<Frame> = pairings
        .par_iter()
        .map(|&((bi, oi), units)| {
            let mut canvas = RgbaImage::from_pixel(layout.width, layout.height, fill);
            image::imageops::overlay(
                &mut canvas,
                &base_frames[bi].image,
                layout.base_x,
                layout.base_y,
            );
            image::imageops::overlay(
                &mut canvas,
                &overlay_frames[oi].image,
                layout.overlay_x,
                layout.overlay_y,
            );
            let ms = units.saturating_mul(u64::from(MIN_UNIT_MS));
            Frame::new(canvas, u32::try_from(ms).unwrap_or(u32::MAX))
        })
        .collect();
    drop(base);
    drop(overlay);

    Ok(collapse_runs(FrameSeq::new(frames)?))
}

fn total_slots(runs: &[(usize, u32)]) -> u64 {
    runs.iter().map(|&(_, n)| u64::from(n)).sum()
}

/// Walk both run lists side by side for `slot_count` slots, looping each from the start when it
/// runs out. Yields `((base, overlay), slots)` with equal adjacent pairings merged.
fn pair_runs(
    base: &[(usize, u32)],
    overlay: &[(usize, u32)],
    slot_count: u64,
) -> Vec<((usize, usize), u64)> {
    let mut out: Vec<((usize, usize), u64)> = Vec::new();
    let (Some(mut b), Some(mut o)) = (LoopedRuns::new(base), LoopedRuns::new(overlay)) else {
        return out;
    };
    let mut done = 0u64;
    while done < slot_count {
        let step = b.left.min(o.left).min(slot_count - done);
        let key = (b.frame(), o.frame());
        match out.last_mut() {
            Some((last, n)) if *last == key => *n += step,
            _ => out.push((key, step)),
        }
        done += step;
        b.advance(step);
        o.advance(step);
    }
    out
}

/// Cursor over slot runs that wraps to the first run at the end.
struct LoopedRuns<'a> {
    runs: &'a [(usize, u32)],
    pos: usize,
    left: u64,
}

impl<'a> LoopedRuns<'a> {
    fn new(runs: &'a [(usize, u32)]) -> Option<Self> {
        let &(_, first) = runs.first()?;
        if runs.iter().any(|&(_, n)| n == 0) {
            return None;
        }
        // one run covers every slot
        let left = if runs.len() == 1 {
            u64::MAX
        } else {
            u64::from(first)
        };
        Some(Self { runs, pos: 0, left })
    }

    fn frame(&self) -> usize {
        self.runs[self.pos].0
    }

    fn advance(&mut self, step: u64) {
        self.left -= step;
        if self.left == 0 {
            self.pos = (self.pos + 1) % self.runs.len();
            self.left = u64::from(self.runs[self.pos].1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/composite.rs"]
mod tests;
