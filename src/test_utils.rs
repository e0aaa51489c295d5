// SPDX-License-Identifier: MPL-2.0
//! Test fixtures shared by unit tests.
//!
//! Integration tests and benches cannot see this module; `tests/common`
//! carries the same `png_bytes` for them.

use std::io::Cursor;

/// Encodes a blank RGBA image of the given size as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image_rs::DynamicImage::ImageRgba8(image_rs::RgbaImage::new(width, height));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
        .expect("encoding a PNG in memory should not fail");
    bytes
}

#[test]
fn png_bytes_is_a_blank_rgba_image() {
    let image = image_rs::load_from_memory(&png_bytes(3, 2)).expect("fixture decodes");
    let rgba = image.to_rgba8();

    assert_eq!(rgba.dimensions(), (3, 2));
    assert!(rgba.pixels().all(|pixel| pixel.0 == [0, 0, 0, 0]));
}
