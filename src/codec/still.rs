use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::{
    codec::MediaCodec,
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::{Frame, FrameSeq},
};

/// Single-frame image formats. Decoded frames carry a zero duration.
#[derive(Clone, Copy, Debug)]
pub struct StillCodec {
    format: ImageFormat,
}

impl StillCodec {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }
}

impl MediaCodec for StillCodec {
    fn format(&self) -> ImageFormat {
        self.format
    }

    fn supports_animation(&self) -> bool {
        false
    }

    fn decode(&self, bytes: &[u8]) -> FramecraftResult<FrameSeq> {
        let img = image::load_from_memory_with_format(bytes, self.format)
            .map_err(|e| FramecraftError::decode(format!("read {:?}: {e}", self.format)))?;
        Ok(FrameSeq::single(Frame::new(img.to_rgba8(), 0)))
    }

    fn encode(&self, seq: &FrameSeq) -> FramecraftResult<Vec<u8>> {
        if seq.is_animated() {
            return Err(FramecraftError::encode(format!(
                "{:?} cannot hold {} frames",
                self.format,
                seq.len()
            )));
        }
        let rgba = DynamicImage::ImageRgba8(seq.first().image.clone());
        // jpeg has no alpha channel
        let img = match self.format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(rgba.to_rgb8()),
            _ => rgba,
        };
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), self.format)
            .map_err(|e| FramecraftError::encode(format!("write {:?}: {e}", self.format)))?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/still.rs"]
mod tests;
