use image::Rgba;

use super::*;

fn base(w: u32, h: u32) -> FrameSeq {
    FrameSeq::single(Frame::new(
        RgbaImage::from_pixel(w, h, Rgba([0, 128, 0, 255])),
        0,
    ))
}

/// Opaque top half, transparent bottom half.
fn bubble(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |_, y| {
        if y < h / 2 {
            Rgba([250, 250, 250, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[test]
fn overlay_scales_bubble_to_media_width() {
    let out = speech_bubble(base(40, 40), &bubble(20, 10), BubbleMode::Overlay).unwrap();
    let img = &out.first().image;
    assert_eq!(img.dimensions(), (40, 40));
    // bubble becomes 40x20, opaque rows 0..10
    assert_eq!(*img.get_pixel(20, 2), Rgba([250, 250, 250, 255]));
    assert_eq!(*img.get_pixel(20, 30), Rgba([0, 128, 0, 255]));
}

#[test]
fn cutout_paints_bubble_shape_with_fill() {
    let mode = BubbleMode::Cutout {
        fill: Rgb24::new(0x00_00_FF).unwrap(),
    };
    let out = speech_bubble(base(40, 40), &bubble(40, 20), mode).unwrap();
    let img = &out.first().image;
    assert_eq!(*img.get_pixel(5, 5), Rgba([0, 0, 255, 255]));
    assert_eq!(*img.get_pixel(5, 35), Rgba([0, 128, 0, 255]));
}

#[test]
fn bubble_mode_serde_shape() {
    let mode: BubbleMode = serde_json::from_str(r#"{"cutout":{"fill":255}}"#).unwrap();
    assert_eq!(
        mode,
        BubbleMode::Cutout {
            fill: Rgb24::new(255).unwrap()
        }
    );
    let overlay: BubbleMode = serde_json::from_str(r#""overlay""#).unwrap();
    assert_eq!(overlay, BubbleMode::Overlay);
}
