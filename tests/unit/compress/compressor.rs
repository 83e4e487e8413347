use image::{Rgba, RgbaImage};

use super::*;
use crate::{codec::gif::GifCodec, frame::model::Frame};

/// Deterministic noise so the encoded size actually depends on resolution and frame count.
fn noisy(w: u32, h: u32, frames: u32) -> FrameSeq {
    let mut state = 0x2545_F491u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state & 0xFF) as u8
    };
    FrameSeq::new(
        (0..frames)
            .map(|_| {
                let img = RgbaImage::from_fn(w, h, |_, _| Rgba([next(), next(), next(), 255]));
                Frame::new(img, 40)
            })
            .collect(),
    )
    .unwrap()
}

fn workers() -> FrameWorkers {
    FrameWorkers::new(Some(2)).unwrap()
}

#[test]
fn input_that_fits_is_untouched() {
    let workers = workers();
    let compressor =
        Compressor::new(CompressOpts::default(), &workers, CancelToken::new()).unwrap();
    let out = compressor
        .compress_frames(noisy(8, 8, 2), &GifCodec::default(), u64::MAX)
        .unwrap();
    assert!(out.steps.is_empty());
    assert_eq!(out.frames.dimensions(), (8, 8));
    assert_eq!(out.frames.len(), 2);
}

#[test]
fn oversized_output_converges_under_limit() {
    let workers = workers();
    let compressor =
        Compressor::new(CompressOpts::default(), &workers, CancelToken::new()).unwrap();
    let codec = GifCodec::default();
    let seq = noisy(64, 64, 8);
    let original = codec.encode(&seq).unwrap().len() as u64;
    let limit = original / 4;

    let out = compressor.compress_frames(seq, &codec, limit).unwrap();
    assert!(out.bytes.len() as u64 <= limit);
    assert_eq!(out.steps[0], CompressStep::Resize);
    assert!(!out.steps.contains(&CompressStep::DownscaleToDisplayBounds));
}

#[test]
fn steps_alternate_while_both_are_available() {
    let workers = workers();
    let compressor =
        Compressor::new(CompressOpts::default(), &workers, CancelToken::new()).unwrap();
    let codec = GifCodec::default();
    let seq = noisy(64, 64, 16);
    let original = codec.encode(&seq).unwrap().len() as u64;

    let out = compressor.compress_frames(seq, &codec, original / 10).unwrap();
    assert!(out.steps.len() >= 2);
    assert_eq!(out.steps[0], CompressStep::Resize);
    assert_eq!(out.steps[1], CompressStep::ReduceFrameRate);
}

#[test]
fn display_bounds_are_applied_first() {
    let workers = workers();
    let opts = CompressOpts {
        display_max_width: 32,
        display_max_height: 32,
        ..CompressOpts::default()
    };
    let compressor = Compressor::new(opts, &workers, CancelToken::new()).unwrap();
    let codec = GifCodec::default();
    let seq = noisy(64, 48, 2);
    let original = codec.encode(&seq).unwrap().len() as u64;

    let out = compressor.compress_frames(seq, &codec, original - 1).unwrap();
    assert_eq!(out.steps[0], CompressStep::DownscaleToDisplayBounds);
    let (w, h) = out.frames.dimensions();
    assert!(w <= 32 && h <= 24);
}

#[test]
fn unreachable_limit_is_compression_impossible() {
    let workers = workers();
    let compressor =
        Compressor::new(CompressOpts::default(), &workers, CancelToken::new()).unwrap();
    let err = compressor
        .compress_frames(noisy(16, 16, 4), &GifCodec::default(), 10)
        .unwrap_err();
    assert!(matches!(err, FramecraftError::CompressionImpossible(_)));
}

#[test]
fn iteration_cap_is_enforced() {
    let workers = workers();
    let opts = CompressOpts {
        max_iterations: 1,
        ..CompressOpts::default()
    };
    let compressor = Compressor::new(opts, &workers, CancelToken::new()).unwrap();
    let err = compressor
        .compress_frames(noisy(64, 64, 4), &GifCodec::default(), 64)
        .unwrap_err();
    assert!(matches!(err, FramecraftError::CompressionImpossible(_)));
}

#[test]
fn cancelled_token_stops_the_loop() {
    let workers = workers();
    let cancel = CancelToken::new();
    cancel.cancel();
    let compressor = Compressor::new(CompressOpts::default(), &workers, cancel).unwrap();
    let err = compressor
        .compress_frames(noisy(32, 32, 2), &GifCodec::default(), 10)
        .unwrap_err();
    assert!(matches!(err, FramecraftError::Cancelled));
}

#[test]
fn compress_bytes_keeps_small_input() {
    let workers = workers();
    let compressor =
        Compressor::new(CompressOpts::default(), &workers, CancelToken::new()).unwrap();
    let bytes = GifCodec::default().encode(&noisy(4, 4, 2)).unwrap();
    let out = compressor.compress(&bytes, bytes.len() as u64).unwrap();
    assert_eq!(out, bytes);
}

#[test]
fn invalid_opts_are_rejected() {
    let bad = [
        CompressOpts {
            resize_factor: 1.0,
            ..CompressOpts::default()
        },
        CompressOpts {
            fps_ratio: 1,
            ..CompressOpts::default()
        },
        CompressOpts {
            min_dimension: 0,
            ..CompressOpts::default()
        },
        CompressOpts {
            display_max_width: 0,
            ..CompressOpts::default()
        },
    ];
    for opts in bad {
        assert!(matches!(opts.validate(), Err(FramecraftError::Config(_))));
    }
}
