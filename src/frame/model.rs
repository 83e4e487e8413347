use image::RgbaImage;

use crate::foundation::error::{FramecraftError, FramecraftResult};

/// One animation frame: a straight-alpha RGBA8 buffer and how long it is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub image: RgbaImage,
    pub duration_ms: u32,
}

impl Frame {
    pub fn new(image: RgbaImage, duration_ms: u32) -> Self {
        Self { image, duration_ms }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Exact pixel equality: same dimensions and same bytes. Durations are ignored.
    pub fn same_pixels(&self, other: &Frame) -> bool {
        self.image.dimensions() == other.image.dimensions()
            && self.image.as_raw() == other.image.as_raw()
    }
}

/// Ordered, non-empty list of frames in playback order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSeq {
    frames: Vec<Frame>,
}

impl FrameSeq {
    pub fn new(frames: Vec<Frame>) -> FramecraftResult<Self> {
        if frames.is_empty() {
            return Err(FramecraftError::invalid_argument(
                "frame sequence must contain at least one frame",
            ));
        }
        Ok(Self { frames })
    }

    /// Wrap frames the caller already knows to be non-empty.
    pub(crate) fn from_non_empty(frames: Vec<Frame>) -> Self {
        debug_assert!(!frames.is_empty());
        Self { frames }
    }

    pub fn single(frame: Frame) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn first(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Dimensions of the first frame; decoders hand out full-canvas frames so this is the canvas.
    pub fn dimensions(&self) -> (u32, u32) {
        self.first().image.dimensions()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration_ms)).sum()
    }

    pub fn durations(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.iter().map(|f| f.duration_ms)
    }
}

impl<'a> IntoIterator for &'a FrameSeq {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl IntoIterator for FrameSeq {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/model.rs"]
mod tests;
