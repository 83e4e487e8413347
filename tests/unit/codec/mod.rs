use image::{Rgba, RgbaImage};

use super::*;
use crate::frame::model::Frame;

fn png_bytes() -> Vec<u8> {
    still::StillCodec::new(ImageFormat::Png)
        .encode(&FrameSeq::single(Frame::new(
            RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])),
            0,
        )))
        .unwrap()
}

#[test]
fn detect_codec_sniffs_magic_bytes() {
    assert_eq!(detect_codec(&png_bytes()).unwrap().format(), ImageFormat::Png);
    let gif = gif::GifCodec::default()
        .encode(&FrameSeq::single(Frame::new(RgbaImage::new(1, 1), 20)))
        .unwrap();
    assert_eq!(detect_codec(&gif).unwrap().format(), ImageFormat::Gif);
}

#[test]
fn detect_codec_rejects_unknown_bytes() {
    let err = detect_codec(b"hello world").unwrap_err();
    assert!(matches!(err, FramecraftError::Decode(_)));
}

#[test]
fn output_codec_upgrades_animated_stills_to_gif() {
    let input = codec_for_format(ImageFormat::Png).unwrap();
    let animated = FrameSeq::new(vec![
        Frame::new(RgbaImage::new(1, 1), 20),
        Frame::new(RgbaImage::new(1, 1), 20),
    ])
    .unwrap();
    assert_eq!(
        output_codec(input.as_ref(), &animated).unwrap().format(),
        ImageFormat::Gif
    );
    let still = FrameSeq::single(Frame::new(RgbaImage::new(1, 1), 0));
    assert_eq!(
        output_codec(input.as_ref(), &still).unwrap().format(),
        ImageFormat::Png
    );
}
