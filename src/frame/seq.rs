use crate::{
    foundation::core::MIN_UNIT_MS,
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::{Frame, FrameSeq},
};

/// Keep the items at index `0, n, 2n, ...` and drop the rest.
///
/// Not duration-aware. Dropped items are released before this returns.
pub fn decimate<T>(items: Vec<T>, n: usize) -> FramecraftResult<Vec<T>> {
    if n == 0 {
        return Err(FramecraftError::invalid_argument("decimation stride must be >= 1"));
    }
    if n == 1 {
        return Ok(items);
    }
    Ok(items.into_iter().step_by(n).collect())
}

/// Merge runs of adjacent pixel-identical frames into one frame carrying the summed duration.
///
/// The output never has two adjacent frames with equal pixels.
pub fn collapse_runs(seq: FrameSeq) -> FrameSeq {
    let mut out: Vec<Frame> = Vec::with_capacity(seq.len());
    for frame in seq {
        match out.last_mut() {
            Some(last) if last.same_pixels(&frame) => {
                last.duration_ms = last.duration_ms.saturating_add(frame.duration_ms);
            }
            _ => out.push(frame),
        }
    }
    FrameSeq::from_non_empty(out)
}

/// Frames sampled on the [`MIN_UNIT_MS`] grid, as `(frame index, slot count)` runs.
///
/// Slot `k` holds the frame visible at `k * MIN_UNIT_MS`. Every frame lasts at least 1 ms, so
/// zero-duration stills still start a slot when they sit on a boundary; frames that fall between
/// two slots are skipped. Runs are computed from cumulative frame boundaries, so the result grows
/// with frame count, never with playtime.
pub fn slot_runs(durations: impl IntoIterator<Item = u32>) -> Vec<(usize, u32)> {
    let unit = u64::from(MIN_UNIT_MS);
    let mut out = Vec::new();
    let mut start = 0u64;
    for (idx, ms) in durations.into_iter().enumerate() {
        let end = start + u64::from(ms.max(1));
        let slots = end.div_ceil(unit) - start.div_ceil(unit);
        if slots > 0 {
            out.push((idx, u32::try_from(slots).unwrap_or(u32::MAX)));
        }
        start = end;
    }
    out
}

/// Number of [`MIN_UNIT_MS`] slots `seq` occupies once aligned.
pub fn aligned_len(seq: &FrameSeq) -> u64 {
    seq.durations()
        .map(|ms| u64::from(ms.max(1)))
        .sum::<u64>()
        .div_ceil(u64::from(MIN_UNIT_MS))
}

/// Round `ms` to the nearest whole [`MIN_UNIT_MS`] multiple, never below one unit.
pub fn quantize_ms(ms: u32) -> u32 {
    let unit = MIN_UNIT_MS;
    let units = (ms / unit + u32::from(ms % unit >= unit / 2)).max(1);
    units.checked_mul(unit).unwrap_or(u32::MAX / unit * unit)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/seq.rs"]
mod tests;
