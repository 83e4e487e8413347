use image::RgbaImage;

use crate::{
    foundation::error::{FramecraftError, FramecraftResult},
    frame::model::FrameSeq,
    ops::transform::map_frames,
};

/// Bounded worker pool for per-frame pixel work.
///
/// Each task owns exactly one frame's buffer; there is no shared mutable state between tasks.
#[derive(Debug)]
pub struct FrameWorkers {
    pool: rayon::ThreadPool,
}

impl FrameWorkers {
    /// `threads = None` sizes the pool to the available cores.
    pub fn new(threads: Option<usize>) -> FramecraftResult<Self> {
        Ok(Self {
            pool: build_thread_pool(threads)?,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` inside the pool so nested rayon iterators use its workers.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    /// Replace every frame's pixels with `op(pixels)`, keeping durations and order.
    ///
    /// The old buffer is dropped as soon as its replacement exists.
    pub fn map_images<F>(&self, seq: FrameSeq, op: F) -> FramecraftResult<FrameSeq>
    where
        F: Fn(RgbaImage) -> FramecraftResult<RgbaImage> + Sync,
    {
        self.pool.install(|| map_frames(seq, &op))
    }
}

fn build_thread_pool(threads: Option<usize>) -> FramecraftResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramecraftError::config("worker 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        FramecraftError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/ops/workers.rs"]
mod tests;
