use std::io::Cursor;

use super::*;
use crate::sprite::encode::SourcePixel;

fn png_bytes(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let buf = png_bytes(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 0]);
    let raw = decode_sprite(&buf).unwrap();
    assert_eq!((raw.width, raw.height), (2, 1));
    assert_eq!(raw.pixels[0], SourcePixel::rgba(100, 50, 200, 128));
    assert_eq!(raw.pixels[1], SourcePixel::rgba(1, 2, 3, 0));
}

#[test]
fn mask_red_channel_becomes_mapping() {
    let colour = png_bytes(2, 1, vec![0, 0, 0, 255, 9, 9, 9, 255]);
    let mask = png_bytes(2, 1, vec![230, 0, 0, 255, 0, 77, 0, 255]);
    let raw = decode_sprite_with_mask(&colour, &mask).unwrap();
    assert_eq!(raw.pixels[0].m, 230);
    assert_eq!(raw.pixels[1].m, 0);
}

#[test]
fn mask_size_mismatch_and_garbage_are_errors() {
    let colour = png_bytes(2, 1, vec![0; 8]);
    let mask = png_bytes(1, 1, vec![0; 4]);
    assert!(matches!(
        decode_sprite_with_mask(&colour, &mask),
        Err(BlitError::Decode(_))
    ));
    assert!(decode_sprite(b"not an image").is_err());
}
