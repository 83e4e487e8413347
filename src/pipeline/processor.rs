use std::time::Duration;

use crate::{
    codec::{MediaCodec, detect_codec, output_codec},
    compress::{
        cancel::CancelToken,
        compressor::{CompressStep, Compressor},
    },
    config::MediaConfig,
    foundation::core::Rgb24,
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::FrameSeq,
    ops::{
        bubble::{BubbleMode, speech_bubble},
        composite::{CompositeOpts, composite},
        cutout::cutout_frames,
        fps::reduce_frame_rate,
        speed::retime,
        transform::{rotate_frames, stretch_frames},
        workers::FrameWorkers,
    },
};

/// Encoded result of one processor operation.
#[derive(Clone, Debug)]
pub struct Processed {
    pub bytes: Vec<u8>,
    pub format: image::ImageFormat,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    /// Compression steps that were needed to fit the size limit.
    pub compress_steps: Vec<CompressStep>,
}

/// Byte-level front door: decode, transform, encode, then fit the size limit.
///
/// Each call decodes with the codec sniffed from its input and encodes with the same format,
/// switching to GIF when a still input became animated.
#[derive(Debug)]
pub struct MediaProcessor {
    config: MediaConfig,
    workers: FrameWorkers,
    cancel: CancelToken,
}

impl MediaProcessor {
    pub fn new(config: MediaConfig) -> FramecraftResult<Self> {
        config.validate()?;
        let workers = FrameWorkers::new(config.threads)?;
        Ok(Self {
            config,
            workers,
            cancel: CancelToken::new(),
        })
    }

    /// Share a caller-owned cancellation token with every compression this processor runs.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    pub fn speed(&self, media: &[u8], multiplier: f32) -> FramecraftResult<Processed> {
        self.run(media, |seq| retime(seq, multiplier))
    }

    pub fn reduce_fps(&self, media: &[u8], ratio: u32) -> FramecraftResult<Processed> {
        self.run(media, |seq| reduce_frame_rate(seq, ratio))
    }

    pub fn resize(&self, media: &[u8], factor: f32, raw: bool) -> FramecraftResult<Processed> {
        self.stretch(media, factor, factor, raw)
    }

    pub fn stretch(
        &self,
        media: &[u8],
        width_mul: f32,
        height_mul: f32,
        raw: bool,
    ) -> FramecraftResult<Processed> {
        self.run(media, |seq| {
            self.workers
                .install(|| stretch_frames(seq, width_mul, height_mul, raw))
        })
    }

    pub fn rotate(
        &self,
        media: &[u8],
        degrees: f32,
        background: Option<Rgb24>,
    ) -> FramecraftResult<Processed> {
        let bg = background.map(Rgb24::to_rgba);
        self.run(media, |seq| {
            self.workers.install(|| rotate_frames(seq, degrees, bg))
        })
    }

    pub fn overlay(
        &self,
        media: &[u8],
        overlay: &[u8],
        opts: &CompositeOpts,
    ) -> FramecraftResult<Processed> {
        let overlay = detect_codec(overlay)?.decode(overlay)?;
        self.run(media, |seq| {
            self.workers.install(|| composite(seq, overlay, opts))
        })
    }

    pub fn cutout(
        &self,
        media: &[u8],
        stencil: &[u8],
        x: i32,
        y: i32,
        fill: Rgb24,
    ) -> FramecraftResult<Processed> {
        let stencil = decode_still(stencil)?;
        self.run(media, |seq| {
            self.workers
                .install(|| cutout_frames(seq, &stencil, x, y, fill.value()))
        })
    }

    pub fn speech_bubble(
        &self,
        media: &[u8],
        bubble: &[u8],
        mode: BubbleMode,
    ) -> FramecraftResult<Processed> {
        let bubble = decode_still(bubble)?;
        self.run(media, |seq| {
            self.workers.install(|| speech_bubble(seq, &bubble, mode))
        })
    }

    /// Place `media` into the configured template named `template`.
    pub fn fill_container(
        &self,
        media: &[u8],
        template_image: &[u8],
        template: &str,
    ) -> FramecraftResult<Processed> {
        let template = self.config.template(template).ok_or_else(|| {
            FramecraftError::invalid_argument(format!("unknown container template '{template}'"))
        })?;
        let template_frames = detect_codec(template_image)?.decode(template_image)?;
        self.run(media, |seq| {
            self.workers.install(|| {
                crate::container::template::fill_container(template_frames, seq, template)
            })
        })
    }

    /// Only fit the size limit; no other transform.
    pub fn compress(&self, media: &[u8]) -> FramecraftResult<Processed> {
        let codec = detect_codec(media)?;
        let seq = codec.decode(media)?;
        self.finish(seq, codec.as_ref(), true)
    }

    #[tracing::instrument(skip_all, fields(input_len = media.len()))]
    fn run<F>(&self, media: &[u8], op: F) -> FramecraftResult<Processed>
    where
        F: FnOnce(FrameSeq) -> FramecraftResult<FrameSeq>,
    {
        let codec = detect_codec(media)?;
        let seq = codec.decode(media)?;
        tracing::debug!(format = ?codec.format(), frames = seq.len(), "decoded");
        let seq = op(seq)?;
        let out_codec = output_codec(codec.as_ref(), &seq)?;
        self.finish(seq, out_codec.as_ref(), self.config.compress_output)
    }

    fn finish(
        &self,
        seq: FrameSeq,
        codec: &dyn MediaCodec,
        compress: bool,
    ) -> FramecraftResult<Processed> {
        let (bytes, frames, compress_steps) = if compress {
            let compressed = self
                .compressor()?
                .compress_frames(seq, codec, self.config.size_limit_bytes)?;
            (compressed.bytes, compressed.frames, compressed.steps)
        } else {
            (codec.encode(&seq)?, seq, Vec::new())
        };
        let (width, height) = frames.dimensions();
        Ok(Processed {
            bytes,
            format: codec.format(),
            frame_count: frames.len(),
            width,
            height,
            compress_steps,
        })
    }

    fn compressor(&self) -> FramecraftResult<Compressor<'_>> {
        let cancel = match self.config.compress.timeout_ms {
            Some(ms) => self.cancel.clone().with_deadline(Duration::from_millis(ms)),
            None => self.cancel.clone(),
        };
        Compressor::new(self.config.compress.clone(), &self.workers, cancel)
    }
}

fn decode_still(bytes: &[u8]) -> FramecraftResult<image::RgbaImage> {
    let seq = detect_codec(bytes)?.decode(bytes)?;
    Ok(seq.into_frames().swap_remove(0).image)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/processor.rs"]
mod tests;
