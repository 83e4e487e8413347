//! framecraft is the media backend of a chat image-editing bot.
//!
//! Animated and still images are decoded into a [`FrameSeq`] (pixels plus per-frame
//! millisecond durations), transformed, and re-encoded under a byte ceiling:
//!
//! - Retime ([`retime`]) and thin out ([`reduce_frame_rate`]) animations
//! - Overlay one animation on another ([`composite`]), stencil ([`cutout`]), bubble and
//!   container templates
//! - Resize, stretch and rotate every frame
//! - Shrink output until it fits a size limit ([`Compressor`])
//!
//! Every timing-sensitive operation works on a shared 20 ms grid ([`MIN_UNIT_MS`]).
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod compress;
pub(crate) mod container;
pub(crate) mod frame;
pub(crate) mod ops;
pub(crate) mod pipeline;

/// Format-specific decode and encode.
pub mod codec;
/// Runtime configuration.
pub mod config;

pub use crate::foundation::core::{MIN_UNIT_MS, Rgb24, TRANSPARENT};
pub use crate::foundation::error::{FramecraftError, FramecraftResult};

pub use crate::codec::{MediaCodec, codec_for_format, detect_codec, output_codec};
pub use crate::compress::cancel::CancelToken;
pub use crate::compress::compressor::{CompressOpts, CompressStep, Compressed, Compressor};
pub use crate::config::{DEFAULT_SIZE_LIMIT_BYTES, MediaConfig};
pub use crate::container::template::{
    ContainerBox, ContainerLayout, ContainerTemplate, Region, fill_container,
};
pub use crate::frame::model::{Frame, FrameSeq};
pub use crate::frame::seq::{aligned_len, collapse_runs, decimate, quantize_ms, slot_runs};
pub use crate::ops::bubble::{BubbleMode, speech_bubble};
pub use crate::ops::composite::{CanvasLayout, CompositeOpts, composite};
pub use crate::ops::cutout::{cutout, cutout_frames};
pub use crate::ops::fps::reduce_frame_rate;
pub use crate::ops::speed::retime;
pub use crate::ops::transform::{
    fit_dimensions, fit_within, resize, resize_by, resize_frames, rotate, rotate_frames,
    rotated_bounds, stretch, stretch_frames,
};
pub use crate::ops::workers::FrameWorkers;
pub use crate::pipeline::processor::{MediaProcessor, Processed};
