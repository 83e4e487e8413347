use image::{Rgba, RgbaImage};

use super::*;

fn seq(durations: &[u32]) -> FrameSeq {
    FrameSeq::new(
        durations
            .iter()
            .enumerate()
            .map(|(i, &ms)| Frame::new(RgbaImage::from_pixel(2, 2, Rgba([i as u8, 0, 0, 255])), ms))
            .collect(),
    )
    .unwrap()
}

#[test]
fn rejects_non_positive_multiplier() {
    for m in [0.0, -1.5, f32::NAN, f32::INFINITY] {
        let err = retime(seq(&[100, 100]), m).unwrap_err();
        assert!(matches!(err, FramecraftError::InvalidArgument(_)), "{m}");
    }
}

#[test]
fn rejects_still_image() {
    let err = retime(seq(&[100]), 2.0).unwrap_err();
    assert!(matches!(err, FramecraftError::UnsupportedOperation(_)));
}

#[test]
fn multiplier_one_is_identity() {
    let input = seq(&[30, 70, 110]);
    assert_eq!(retime(input.clone(), 1.0).unwrap(), input);
}

#[test]
fn double_speed_halves_total_duration() {
    let out = retime(seq(&[100, 100, 100, 100]), 2.0).unwrap();
    assert_eq!(out.total_duration_ms(), 200);
    let durations: Vec<u32> = out.durations().collect();
    assert_eq!(durations, vec![60, 40, 60, 40]);
    assert!(out.iter().all(|f| f.duration_ms % MIN_UNIT_MS == 0));
}

#[test]
fn half_speed_doubles_total_duration() {
    let out = retime(seq(&[100, 60]), 0.5).unwrap();
    let durations: Vec<u32> = out.durations().collect();
    assert_eq!(durations, vec![200, 120]);
}

#[test]
fn huge_multiplier_keeps_first_frame() {
    let out = retime(seq(&[20, 20, 20, 20]), 1000.0).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(*out.first().image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    assert_eq!(out.first().duration_ms, MIN_UNIT_MS);
}

#[test]
fn identical_neighbours_are_merged() {
    let frames = vec![
        Frame::new(RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 255])), 40),
        Frame::new(RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 255])), 40),
    ];
    let out = retime(FrameSeq::new(frames).unwrap(), 2.0).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out.first().duration_ms, 40);
}

#[test]
fn hour_long_frames_are_retimed_without_expanding_them() {
    let out = retime(seq(&[600_000_000, 600_000_000]), 2.0).unwrap();
    let durations: Vec<u32> = out.durations().collect();
    assert_eq!(durations, vec![300_000_000, 300_000_000]);
}
