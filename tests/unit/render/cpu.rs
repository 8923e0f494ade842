use super::*;

const RED: Rgba = Rgba {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

fn full_rect(s: &CpuSurface) -> BezPath {
    let size = s.size();
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((size.width, 0.0));
    p.line_to((size.width, size.height));
    p.line_to((0.0, size.height));
    p.close_path();
    p
}

fn left_half(s: &CpuSurface) -> BezPath {
    let size = s.size();
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((size.width / 2.0, 0.0));
    p.line_to((size.width / 2.0, size.height));
    p.line_to((0.0, size.height));
    p.close_path();
    p
}

#[test]
fn rejects_bad_sizes() {
    assert!(matches!(CpuSurface::new(0, 10), Err(SvgaError::Validation(_))));
    assert!(matches!(
        CpuSurface::new(70_000, 10),
        Err(SvgaError::Validation(_))
    ));
}

#[test]
fn fill_path_paints_pixels() {
    let mut s = CpuSurface::new(16, 16).unwrap();
    let path = full_rect(&s);
    s.fill_path(&path, Affine::IDENTITY, RED);
    let frame = s.finish();
    assert_eq!((frame.width, frame.height), (16, 16));
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert_eq!(frame.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn image_rect_covers_only_destination() {
    let mut s = CpuSurface::new(20, 20).unwrap();
    let img = RasterImage::solid(2, 2, [0, 0, 255, 255]);
    s.draw_image_rect(&img, Rect::new(0.0, 0.0, 10.0, 10.0), 1.0);
    let frame = s.finish();
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(15, 15), Some([0, 0, 0, 0]));
}

#[test]
fn image_opacity_scales_alpha() {
    let mut s = CpuSurface::new(8, 8).unwrap();
    let img = RasterImage::solid(1, 1, [255, 255, 255, 255]);
    s.draw_image_rect(&img, Rect::new(0.0, 0.0, 8.0, 8.0), 0.5);
    let a = s.finish().pixel(4, 4).unwrap()[3];
    assert!((126..=129).contains(&a), "alpha {a}");
}

#[test]
fn dest_in_masks_open_layer() {
    let mut s = CpuSurface::new(20, 20).unwrap();
    let path = full_rect(&s);
    s.push_layer();
    s.fill_path(&path, Affine::IDENTITY, RED);
    let mask = RasterImage::solid(10, 20, [0, 0, 0, 255]);
    s.draw_image(&mask, Affine::IDENTITY, 1.0, BlendMode::DestIn);
    s.pop_layer();
    let frame = s.finish();
    assert_eq!(frame.pixel(4, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 10), Some([0, 0, 0, 0]));
}

#[test]
fn clip_limits_drawing() {
    let mut s = CpuSurface::new(20, 20).unwrap();
    let clip = left_half(&s);
    let path = full_rect(&s);
    s.push_clip(&clip, Affine::IDENTITY);
    s.fill_path(&path, Affine::IDENTITY, RED);
    s.pop_clip();
    let frame = s.finish();
    assert_eq!(frame.pixel(4, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 10), Some([0, 0, 0, 0]));
}

#[test]
fn stroke_paints_outline_only() {
    let mut s = CpuSurface::new(20, 20).unwrap();
    let mut p = BezPath::new();
    p.move_to((0.0, 10.0));
    p.line_to((20.0, 10.0));
    let stroke = StrokeStyle {
        width: 4.0,
        cap: LineCap::Butt,
        join: LineJoin::Miter,
        miter_limit: 4.0,
        dash: None,
    };
    s.stroke_path(&p, Affine::IDENTITY, RED, &stroke);
    let frame = s.finish();
    assert_eq!(frame.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(10, 2), Some([0, 0, 0, 0]));
}

#[test]
fn text_without_font_is_skipped() {
    let mut s = CpuSurface::new(10, 10).unwrap();
    s.draw_text(
        "hello",
        &TextStyle::default(),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Affine::IDENTITY,
    );
    assert!(s.finish().data.iter().all(|&b| b == 0));
}

#[test]
fn finish_closes_open_layers_and_resets() {
    let mut s = CpuSurface::new(10, 10).unwrap();
    let path = full_rect(&s);
    s.push_layer();
    s.push_clip(&path, Affine::IDENTITY);
    s.fill_path(&path, Affine::IDENTITY, RED);
    // extra pop on an empty stack is ignored
    let first = s.finish();
    s.pop_layer();
    assert_eq!(first.pixel(5, 5), Some([255, 0, 0, 255]));

    let second = s.finish();
    assert_eq!(second.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let f = FrameRgba {
        width: 2,
        height: 1,
        data: vec![64, 0, 0, 128, 10, 20, 30, 0],
        premultiplied: true,
    };
    let out = f.to_unpremultiplied();
    assert_eq!(&out[..4], &[128, 0, 0, 128]);
    assert_eq!(&out[4..], &[10, 20, 30, 0]);
}
