use image::Rgba;

use super::*;
use crate::{foundation::error::FramecraftError, frame::model::Frame};

const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

#[test]
fn opaque_stencil_fills_every_covered_pixel() {
    let target = RgbaImage::from_pixel(10, 10, GREY);
    let stencil = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]));
    let out = cutout(target, &stencil, 2, 5, 0xFF_00_00).unwrap();
    for (x, y, px) in out.enumerate_pixels() {
        let inside = (2..6).contains(&x) && (5..8).contains(&y);
        let expected = if inside { Rgba([255, 0, 0, 255]) } else { GREY };
        assert_eq!(*px, expected, "pixel {x},{y}");
    }
}

#[test]
fn transparent_stencil_pixels_leave_target_alone() {
    let target = RgbaImage::from_pixel(3, 1, GREY);
    let stencil = RgbaImage::from_fn(3, 1, |x, _| {
        if x == 1 {
            Rgba([0, 0, 0, 1])
        } else {
            Rgba([255, 255, 255, 0])
        }
    });
    let out = cutout(target, &stencil, 0, 0, 0).unwrap();
    assert_eq!(*out.get_pixel(0, 0), GREY);
    assert_eq!(*out.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
    assert_eq!(*out.get_pixel(2, 0), GREY);
}

#[test]
fn out_of_bounds_stencil_pixels_are_ignored() {
    let target = RgbaImage::from_pixel(4, 4, GREY);
    let stencil = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    let out = cutout(target, &stencil, -8, 2, 0x00_00_FF).unwrap();
    // stencil covers x in -8..2 and y in 2..12
    assert_eq!(*out.get_pixel(1, 3), Rgba([0, 0, 255, 255]));
    assert_eq!(*out.get_pixel(2, 3), GREY);
    assert_eq!(*out.get_pixel(1, 1), GREY);
}

#[test]
fn fill_with_alpha_bits_is_rejected() {
    let target = RgbaImage::new(1, 1);
    let stencil = RgbaImage::new(1, 1);
    let err = cutout(target, &stencil, 0, 0, 0xFF_FF_FF_FF).unwrap_err();
    assert!(matches!(err, FramecraftError::InvalidArgument(_)));
}

#[test]
fn cutout_frames_keeps_durations() {
    let seq = FrameSeq::new(vec![
        Frame::new(RgbaImage::from_pixel(2, 2, GREY), 40),
        Frame::new(RgbaImage::from_pixel(2, 2, GREY), 60),
    ])
    .unwrap();
    let stencil = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let out = cutout_frames(seq, &stencil, 1, 1, 0xFF_FF_FF).unwrap();
    let durations: Vec<u32> = out.durations().collect();
    assert_eq!(durations, vec![40, 60]);
    assert!(
        out.iter()
            .all(|f| *f.image.get_pixel(1, 1) == Rgba([255, 255, 255, 255]))
    );
}
