use image::{Rgba, RgbaImage};

use super::*;

fn frame(v: u8, ms: u32) -> Frame {
    Frame::new(RgbaImage::from_pixel(2, 2, Rgba([v, 0, 0, 255])), ms)
}

#[test]
fn decimate_keeps_every_nth_from_zero() {
    let kept = decimate((0..10).collect::<Vec<_>>(), 3).unwrap();
    assert_eq!(kept, vec![0, 3, 6, 9]);
}

#[test]
fn decimate_stride_one_is_identity_and_zero_is_rejected() {
    assert_eq!(decimate(vec![1, 2, 3], 1).unwrap(), vec![1, 2, 3]);
    assert!(matches!(
        decimate(vec![1, 2, 3], 0),
        Err(FramecraftError::InvalidArgument(_))
    ));
}

#[test]
fn collapse_runs_sums_adjacent_identical_frames() {
    let seq = FrameSeq::new(vec![
        frame(1, 20),
        frame(1, 40),
        frame(2, 20),
        frame(1, 20),
        frame(1, 20),
    ])
    .unwrap();
    let out = collapse_runs(seq);
    let durations: Vec<u32> = out.durations().collect();
    assert_eq!(durations, vec![60, 20, 40]);
    assert_eq!(out.total_duration_ms(), 120);
}

#[test]
fn slot_runs_sample_every_min_unit() {
    // slots at 0, 20, 40, 60 ms
    assert_eq!(slot_runs([50, 30]), vec![(0, 3), (1, 1)]);
    let seq = FrameSeq::new(vec![frame(1, 50), frame(2, 30)]).unwrap();
    assert_eq!(aligned_len(&seq), 4);
}

#[test]
fn slot_runs_skip_frames_between_slots() {
    // boundaries 5, 10, 25: only frame 0 (slot 0) and frame 2 (slot 20) are sampled
    assert_eq!(slot_runs([5, 5, 15]), vec![(0, 1), (2, 1)]);
    // a zero-duration still still takes the first slot
    assert_eq!(slot_runs([0]), vec![(0, 1)]);
}

#[test]
fn slot_runs_stay_small_for_hour_long_frames() {
    let ten_hours = 10 * 60 * 60 * 1000;
    let runs = slot_runs([ten_hours, u32::MAX]);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0], (0, ten_hours / MIN_UNIT_MS));
    let total: u64 = runs.iter().map(|&(_, n)| u64::from(n)).sum();
    let expected = (u64::from(ten_hours) + u64::from(u32::MAX)).div_ceil(u64::from(MIN_UNIT_MS));
    assert_eq!(total, expected);
}

#[test]
fn quantize_rounds_to_nearest_unit_with_floor() {
    assert_eq!(quantize_ms(0), MIN_UNIT_MS);
    assert_eq!(quantize_ms(10), MIN_UNIT_MS);
    assert_eq!(quantize_ms(29), 20);
    assert_eq!(quantize_ms(30), 40);
    assert_eq!(quantize_ms(100), 100);
    assert_eq!(quantize_ms(u32::MAX), u32::MAX / MIN_UNIT_MS * MIN_UNIT_MS);
}
