use std::io::Cursor;

use image::{
    AnimationDecoder, Delay, ImageFormat,
    codecs::gif::{GifDecoder, GifEncoder, Repeat},
};

use crate::{
    codec::MediaCodec,
    foundation::core::MIN_UNIT_MS,
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::{Frame, FrameSeq},
    frame::seq::quantize_ms,
};

/// Animated GIF through the `image` crate.
///
/// Decoded frames are full-canvas composites. Encoded output loops forever, with every delay
/// rounded to a whole [`MIN_UNIT_MS`] multiple of at least one unit.
#[derive(Clone, Copy, Debug)]
pub struct GifCodec {
    /// Palette quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifCodec {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl MediaCodec for GifCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Gif
    }

    fn supports_animation(&self) -> bool {
        true
    }

    fn decode(&self, bytes: &[u8]) -> FramecraftResult<FrameSeq> {
        let decoder = GifDecoder::new(Cursor::new(bytes))
            .map_err(|e| FramecraftError::decode(format!("read gif header: {e}")))?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| FramecraftError::decode(format!("read gif frames: {e}")))?;
        if frames.is_empty() {
            return Err(FramecraftError::decode("gif contains no frames"));
        }

        let frames = frames
            .into_iter()
            .map(|f| {
                let duration_ms = delay_to_ms(f.delay());
                Frame::new(f.into_buffer(), duration_ms)
            })
            .collect();
        FrameSeq::new(frames)
    }

    fn encode(&self, seq: &FrameSeq) -> FramecraftResult<Vec<u8>> {
        let (width, height) = seq.dimensions();
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(FramecraftError::encode(format!(
                "{width}x{height} exceeds the gif canvas limit"
            )));
        }

        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut buf, self.speed);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| FramecraftError::encode(format!("set gif repeat: {e}")))?;
            for frame in seq {
                let delay = Delay::from_numer_denom_ms(quantize_ms(frame.duration_ms), 1);
                encoder
                    .encode_frame(image::Frame::from_parts(frame.image.clone(), 0, 0, delay))
                    .map_err(|e| FramecraftError::encode(format!("write gif frame: {e}")))?;
            }
        }
        Ok(buf)
    }
}

fn delay_to_ms(delay: Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return 0;
    }
    (f64::from(numer) / f64::from(denom)).round() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/codec/gif.rs"]
mod tests;
