//! Speed retiming.
//!
//! Scaling delays alone produces durations finer than the output format can encode, so the
//! scaled timeline is sampled every [`MIN_UNIT_MS`] and each surviving frame is shown for the
//! whole number of units it was sampled in.

use crate::{
    foundation::core::MIN_UNIT_MS,
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::{Frame, FrameSeq},
    frame::seq::{collapse_runs, slot_runs},
};

/// Change playback speed by `multiplier` (2.0 plays twice as fast).
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn retime(seq: FrameSeq, multiplier: f32) -> FramecraftResult<FrameSeq> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(FramecraftError::invalid_argument(format!(
            "speed multiplier {multiplier} is not allowed"
        )));
    }
    if !seq.is_animated() {
        return Err(FramecraftError::unsupported("cannot change the speed of a static image"));
    }
    if multiplier == 1.0 {
        return Ok(seq);
    }

    let scaled: Vec<u32> = seq
        .durations()
        .map(|ms| (f64::from(ms) / f64::from(multiplier)) as u32)
        .collect();
    let samples = slot_runs(scaled);

    let mut slots: Vec<Option<Frame>> = seq.into_frames().into_iter().map(Some).collect();
    if samples.is_empty() {
        let first = slots[0].take().map(|mut f| {
            f.duration_ms = MIN_UNIT_MS;
            f
        });
        return first
            .map(FrameSeq::single)
            .ok_or_else(|| FramecraftError::invalid_argument("empty frame sequence"));
    }

    let mut out = Vec::with_capacity(samples.len());
    for (idx, units) in samples {
        let Some(mut frame) = slots[idx].take() else {
            continue;
        };
        frame.duration_ms = units.saturating_mul(MIN_UNIT_MS);
        out.push(frame);
    }
    drop(slots);

    Ok(collapse_runs(FrameSeq::new(out)?))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/speed.rs"]
mod tests;
