use crate::{
    codec::{MediaCodec, detect_codec},
    compress::cancel::CancelToken,
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::FrameSeq,
    ops::{
        fps::reduce_frame_rate,
        transform::{fit_dimensions, resize, scaled_dimensions},
        workers::FrameWorkers,
    },
};

/// Tuning for the size-bounded compression loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressOpts {
    /// Display bounds every frame is shrunk into before the loop starts.
    pub display_max_width: u32,
    pub display_max_height: u32,
    /// Per-iteration scale applied by the resize step; must be in `(0, 1)`.
    pub resize_factor: f32,
    /// Stride used by the frame-rate step; must be >= 2.
    pub fps_ratio: u32,
    /// Hard cap on loop iterations after the display downscale.
    pub max_iterations: u32,
    /// Neither side is shrunk below this many pixels.
    pub min_dimension: u32,
    /// Optional wall-clock budget for one compression, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for CompressOpts {
    fn default() -> Self {
        Self {
            display_max_width: 1024,
            display_max_height: 1024,
            resize_factor: 0.75,
            fps_ratio: 2,
            max_iterations: 64,
            min_dimension: 1,
            timeout_ms: None,
        }
    }
}

impl CompressOpts {
    pub fn validate(&self) -> FramecraftResult<()> {
        if self.display_max_width == 0 || self.display_max_height == 0 {
            return Err(FramecraftError::config("display bounds must be non-zero"));
        }
        if !(self.resize_factor > 0.0 && self.resize_factor < 1.0) {
            return Err(FramecraftError::config(format!(
                "resize_factor {} must be in (0, 1)",
                self.resize_factor
            )));
        }
        if self.fps_ratio < 2 {
            return Err(FramecraftError::config("fps_ratio must be >= 2"));
        }
        if self.min_dimension == 0 {
            return Err(FramecraftError::config("min_dimension must be >= 1"));
        }
        Ok(())
    }
}

/// One action of the compression state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressStep {
    /// Shrink every frame into the display bounds.
    DownscaleToDisplayBounds,
    /// Raw (nearest) resize of every frame by `resize_factor`.
    Resize,
    /// Keep every `fps_ratio`-th frame.
    ReduceFrameRate,
}

/// Result of a successful compression.
#[derive(Clone, Debug)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub frames: FrameSeq,
    /// Steps taken, in order. Empty when the input already fit.
    pub steps: Vec<CompressStep>,
}

/// Drives resize and frame-rate reduction until the encoded output fits a byte budget.
///
/// The loop itself runs on the caller's thread; per-frame work inside a step uses `workers`.
#[derive(Debug)]
pub struct Compressor<'w> {
    opts: CompressOpts,
    workers: &'w FrameWorkers,
    cancel: CancelToken,
}

impl<'w> Compressor<'w> {
    pub fn new(
        opts: CompressOpts,
        workers: &'w FrameWorkers,
        cancel: CancelToken,
    ) -> FramecraftResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            workers,
            cancel,
        })
    }

    /// Re-encode `bytes` (same format) until it is at most `size_limit` bytes.
    ///
    /// Input that already fits is returned untouched.
    pub fn compress(&self, bytes: &[u8], size_limit: u64) -> FramecraftResult<Vec<u8>> {
        if bytes.len() as u64 <= size_limit {
            return Ok(bytes.to_vec());
        }
        let codec = detect_codec(bytes)?;
        let frames = codec.decode(bytes)?;
        Ok(self.compress_frames(frames, codec.as_ref(), size_limit)?.bytes)
    }

    /// Encode `seq` with `codec`, shrinking it until the output fits `size_limit`.
    #[tracing::instrument(skip(self, seq, codec), fields(frames = seq.len()))]
    pub fn compress_frames(
        &self,
        seq: FrameSeq,
        codec: &dyn MediaCodec,
        size_limit: u64,
    ) -> FramecraftResult<Compressed> {
        let mut seq = seq;
        let mut bytes = codec.encode(&seq)?;
        let mut steps = Vec::new();
        if fits(&bytes, size_limit) {
            return Ok(Compressed {
                bytes,
                frames: seq,
                steps,
            });
        }

        self.cancel.check()?;
        let dims = seq.dimensions();
        let bounded = fit_dimensions(
            dims,
            self.opts.display_max_width,
            self.opts.display_max_height,
        );
        if bounded != dims {
            seq = self.apply(CompressStep::DownscaleToDisplayBounds, seq)?;
            bytes = codec.encode(&seq)?;
            steps.push(CompressStep::DownscaleToDisplayBounds);
            tracing::debug!(size = bytes.len(), limit = size_limit, "downscaled to display bounds");
        }

        let mut reduce_resolution = true;
        let mut iterations = 0u32;
        while !fits(&bytes, size_limit) {
            self.cancel.check()?;
            if iterations >= self.opts.max_iterations {
                return Err(FramecraftError::compression_impossible(format!(
                    "still {} bytes (limit {size_limit}) after {iterations} iterations",
                    bytes.len()
                )));
            }
            let step = self.next_step(&seq, reduce_resolution).ok_or_else(|| {
                let (w, h) = seq.dimensions();
                FramecraftError::compression_impossible(format!(
                    "{} bytes exceeds limit {size_limit} at {w}x{h} with {} frame(s)",
                    bytes.len(),
                    seq.len()
                ))
            })?;

            seq = self.apply(step, seq)?;
            bytes = codec.encode(&seq)?;
            steps.push(step);
            tracing::debug!(
                iteration = iterations,
                ?step,
                size = bytes.len(),
                limit = size_limit,
                "compress step"
            );
            reduce_resolution = !reduce_resolution;
            iterations += 1;
        }

        Ok(Compressed {
            bytes,
            frames: seq,
            steps,
        })
    }

    /// Preferred step for this pass, or the other one when the preferred step hit its floor.
    fn next_step(&self, seq: &FrameSeq, reduce_resolution: bool) -> Option<CompressStep> {
        let can_resize = self.shrunk_dimensions(seq).is_some();
        let can_drop = seq.is_animated();
        match (reduce_resolution, can_resize, can_drop) {
            (true, true, _) | (false, true, false) => Some(CompressStep::Resize),
            (false, _, true) | (true, false, true) => Some(CompressStep::ReduceFrameRate),
            (_, false, false) => None,
        }
    }

    fn shrunk_dimensions(&self, seq: &FrameSeq) -> Option<(u32, u32)> {
        let dims = seq.dimensions();
        let factor = self.opts.resize_factor;
        let (w, h) = scaled_dimensions(dims, factor, factor).ok()?;
        let floor = self.opts.min_dimension;
        (w >= floor && h >= floor && (w, h) != dims).then_some((w, h))
    }

    fn apply(&self, step: CompressStep, seq: FrameSeq) -> FramecraftResult<FrameSeq> {
        match step {
            CompressStep::Resize => match self.shrunk_dimensions(&seq) {
                Some(dims) => self.resize_all(seq, dims, true),
                None => Ok(seq),
            },
            CompressStep::ReduceFrameRate => reduce_frame_rate(seq, self.opts.fps_ratio),
            CompressStep::DownscaleToDisplayBounds => {
                let dims = seq.dimensions();
                let bounded =
                    fit_dimensions(dims, self.opts.display_max_width, self.opts.display_max_height);
                self.resize_all(seq, bounded, false)
            }
        }
    }

    fn resize_all(
        &self,
        seq: FrameSeq,
        (w, h): (u32, u32),
        raw: bool,
    ) -> FramecraftResult<FrameSeq> {
        self.workers.map_images(seq, |img| resize(&img, w, h, raw))
    }
}

fn fits(bytes: &[u8], size_limit: u64) -> bool {
    bytes.len() as u64 <= size_limit
}

#[cfg(test)]
#[path = "../../tests/unit/compress/compressor.rs"]
mod tests;
