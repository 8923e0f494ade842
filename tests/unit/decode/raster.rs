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

    let decoded = ImageRasterDecoder.decode(&buf).unwrap();
    assert_eq!(decoded.width, 1);
    assert_eq!(decoded.height, 1);
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
    assert!(decode_image(&[]).is_err());
}

#[test]
fn solid_raster_is_premultiplied() {
    let r = RasterImage::solid(2, 1, [255, 0, 0, 0]);
    assert_eq!(r.rgba8_premul.as_slice(), &[0, 0, 0, 0, 0, 0, 0, 0]);
    let r = RasterImage::solid(1, 1, [10, 20, 30, 255]);
    assert_eq!(r.rgba8_premul.as_slice(), &[10, 20, 30, 255]);
    assert!(!r.is_empty());
}

#[test]
fn from_premul_checks_length() {
    assert!(RasterImage::from_premul(2, 2, vec![0; 16]).is_some());
    assert!(RasterImage::from_premul(2, 2, vec![0; 15]).is_none());
    assert!(RasterImage::from_premul(0, 3, Vec::new()).unwrap().is_empty());
}
