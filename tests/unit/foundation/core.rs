use super::*;

#[test]
fn rgba_new_clamps_channels() {
    let c = Rgba::new(-0.5, 0.25, 3.0, f32::NAN);
    assert_eq!(c, Rgba::new(0.0, 0.25, 1.0, 0.0));
    assert!(c.is_transparent());
}

#[test]
fn rgba8_conversion_rounds() {
    assert_eq!(Rgba::new(1.0, 0.5, 0.0, 1.0).to_rgba8(), [255, 128, 0, 255]);
    assert_eq!(Rgba::from_rgba8(255, 0, 0, 255).to_rgba8(), [255, 0, 0, 255]);
    assert_eq!(Rgba::default(), Rgba::BLACK);
}

#[test]
fn affine_parts_follow_svga_convention() {
    let m = affine_from_parts(1.0, 0.5, 0.25, 2.0, 10.0, 20.0);
    let p = m * Point::new(2.0, 4.0);
    assert!((p.x - (2.0 + 1.0 + 10.0)).abs() < 1e-9);
    assert!((p.y - (1.0 + 8.0 + 20.0)).abs() < 1e-9);
}
