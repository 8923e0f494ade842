use super::*;

const CONTENT: Size = Size::new(200.0, 100.0);

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fit_contains_and_centers() {
    let r = compute_scale_result(Size::new(400.0, 400.0), CONTENT, ContentScale::Fit);
    assert_eq!((r.scale_x, r.scale_y), (2.0, 2.0));
    assert_eq!((r.offset_x, r.offset_y), (0.0, 100.0));
}

#[test]
fn crop_covers() {
    let r = compute_scale_result(Size::new(400.0, 400.0), CONTENT, ContentScale::Crop);
    assert_eq!((r.scale_x, r.scale_y), (4.0, 4.0));
    assert_eq!((r.offset_x, r.offset_y), (-200.0, 0.0));
}

#[test]
fn fill_scales_axes_independently() {
    for mode in [ContentScale::Fill, ContentScale::FillBounds] {
        let r = compute_scale_result(Size::new(100.0, 300.0), CONTENT, mode);
        assert_eq!((r.scale_x, r.scale_y), (0.5, 3.0));
        assert_eq!((r.offset_x, r.offset_y), (0.0, 0.0));
    }
}

#[test]
fn none_keeps_size_and_centers() {
    let r = compute_scale_result(Size::new(300.0, 300.0), CONTENT, ContentScale::None);
    assert_eq!((r.scale_x, r.scale_y), (1.0, 1.0));
    assert_eq!((r.offset_x, r.offset_y), (50.0, 100.0));
}

#[test]
fn inside_only_shrinks() {
    let big = compute_scale_result(Size::new(400.0, 400.0), CONTENT, ContentScale::Inside);
    assert_eq!(big.scale_x, 1.0);
    let small = compute_scale_result(Size::new(100.0, 100.0), CONTENT, ContentScale::Inside);
    assert_eq!((small.scale_x, small.scale_y), (0.5, 0.5));
    assert!(approx(small.offset_y, 25.0));
}

#[test]
fn fill_width_and_height_match_one_axis() {
    let w = compute_scale_result(Size::new(100.0, 500.0), CONTENT, ContentScale::FillWidth);
    assert_eq!((w.scale_x, w.scale_y), (0.5, 0.5));
    let h = compute_scale_result(Size::new(100.0, 500.0), CONTENT, ContentScale::FillHeight);
    assert_eq!((h.scale_x, h.scale_y), (5.0, 5.0));
    assert_eq!(h.offset_x, -450.0);
}

#[test]
fn degenerate_sizes_yield_identity() {
    for (canvas, content) in [
        (Size::new(0.0, 100.0), CONTENT),
        (Size::new(100.0, -1.0), CONTENT),
        (Size::new(100.0, 100.0), Size::ZERO),
    ] {
        assert_eq!(
            compute_scale_result(canvas, content, ContentScale::Crop),
            ScaleResult::IDENTITY
        );
    }
}

#[test]
fn affine_applies_scale_then_offset() {
    let r = ScaleResult {
        scale_x: 2.0,
        scale_y: 3.0,
        offset_x: 10.0,
        offset_y: 20.0,
    };
    let p = r.to_affine() * kurbo::Point::new(1.0, 1.0);
    assert_eq!((p.x, p.y), (12.0, 23.0));
}

#[test]
fn names_round_trip_through_from_str() {
    for mode in ContentScale::ALL {
        assert_eq!(mode.to_string().parse::<ContentScale>().unwrap(), mode);
    }
    assert!("stretch".parse::<ContentScale>().is_err());
}
