use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width(), 1);
    assert_eq!(prepared.height(), 1);
    assert_eq!(
        prepared.rgba8_premul(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
    assert!(!prepared.is_opaque());
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn identical_pixels_share_an_id() {
    let a = RasterImage::solid(2, 2, [1, 2, 3, 255]).unwrap();
    let b = RasterImage::solid(2, 2, [1, 2, 3, 255]).unwrap();
    let c = RasterImage::solid(2, 2, [1, 2, 4, 255]).unwrap();
    assert_eq!(a.id(), b.id());
    assert_ne!(a.id(), c.id());
    assert!(a.is_opaque());
}

#[test]
fn raster_length_mismatch_is_validation_error() {
    let err = RasterImage::from_premul_rgba8(2, 2, vec![0; 3]).unwrap_err();
    assert!(err.to_string().contains("validation error"));
    assert!(RasterImage::solid(0, 4, [0, 0, 0, 0]).is_err());
}
