//! Codec boundary: bytes in, frame sequences out, and back.
//!
//! Decoding never yields an empty sequence; encoding honors each frame's duration to the
//! precision of the target format.

/// Animated GIF codec.
pub mod gif;
/// Single-frame PNG/JPEG/BMP codec.
pub mod still;

use image::ImageFormat;

use crate::{
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::FrameSeq,
};

/// A container format that frame sequences can be read from and written to.
pub trait MediaCodec: Send + Sync + std::fmt::Debug {
    fn format(&self) -> ImageFormat;

    /// Whether [`MediaCodec::encode`] accepts more than one frame.
    fn supports_animation(&self) -> bool;

    fn decode(&self, bytes: &[u8]) -> FramecraftResult<FrameSeq>;

    fn encode(&self, seq: &FrameSeq) -> FramecraftResult<Vec<u8>>;
}

/// Codec for a known format.
pub fn codec_for_format(format: ImageFormat) -> FramecraftResult<Box<dyn MediaCodec>> {
    match format {
        ImageFormat::Gif => Ok(Box::new(gif::GifCodec::default())),
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => {
            Ok(Box::new(still::StillCodec::new(format)))
        }
        other => Err(FramecraftError::decode(format!(
            "unsupported media format {other:?}"
        ))),
    }
}

/// Sniff the container format from its magic bytes.
pub fn detect_codec(bytes: &[u8]) -> FramecraftResult<Box<dyn MediaCodec>> {
    let format = image::guess_format(bytes)
        .map_err(|e| FramecraftError::decode(format!("unrecognised media: {e}")))?;
    codec_for_format(format)
}

/// Codec to write `seq` with, given the codec it was read with.
///
/// A still format is swapped for GIF once a transform produced an animation.
pub fn output_codec(
    input: &dyn MediaCodec,
    seq: &FrameSeq,
) -> FramecraftResult<Box<dyn MediaCodec>> {
    if seq.is_animated() && !input.supports_animation() {
        return Ok(Box::new(gif::GifCodec::default()));
    }
    codec_for_format(input.format())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/mod.rs"]
mod tests;
