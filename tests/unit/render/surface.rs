use super::*;

fn style(dash: Option<Dash>) -> ShapeStyle {
    ShapeStyle {
        stroke: Some(Rgba::BLACK),
        stroke_width: 2.0,
        line_cap: LineCap::Round,
        line_join: LineJoin::Bevel,
        miter_limit: 4.0,
        dash,
        ..ShapeStyle::default()
    }
}

#[test]
fn carries_stroke_parameters() {
    let s = StrokeStyle::from_shape_style(&style(None));
    assert_eq!(s.width, 2.0);
    assert_eq!(s.cap, LineCap::Round);
    assert_eq!(s.join, LineJoin::Bevel);
    assert_eq!(s.miter_limit, 4.0);
    assert_eq!(s.dash, None);
}

#[test]
fn dash_is_clamped() {
    let s = StrokeStyle::from_shape_style(&style(Some(Dash {
        on: 0.5,
        off: 0.0,
        phase: 3.0,
    })));
    assert_eq!(
        s.dash,
        Some(Dash {
            on: 1.0,
            off: 0.1,
            phase: 3.0
        })
    );
}

#[test]
fn zero_dash_means_solid() {
    let s = StrokeStyle::from_shape_style(&style(Some(Dash {
        on: 0.0,
        off: 0.0,
        phase: 5.0,
    })));
    assert_eq!(s.dash, None);
}
