use crate::{
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::FrameSeq,
    frame::seq::decimate,
};

/// Keep every `ratio`-th frame.
///
/// Dropped frames' time is discarded, not given to the survivors: total playtime shrinks by
/// roughly `ratio`. The compressor relies on that to cut size aggressively.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn reduce_frame_rate(seq: FrameSeq, ratio: u32) -> FramecraftResult<FrameSeq> {
    if ratio == 0 {
        return Err(FramecraftError::invalid_argument("frame rate reduction ratio must be >= 1"));
    }
    if ratio == 1 {
        return Ok(seq);
    }
    FrameSeq::new(decimate(seq.into_frames(), ratio as usize)?)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/fps.rs"]
mod tests;
