use super::*;

fn els(src: &str) -> Vec<PathEl> {
    parse_bezpath(src).expect("parses").elements().to_vec()
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn absolute_and_relative_lines() {
    assert_eq!(
        els("M 10 10 l 5 0 v 5 H 0 Z"),
        vec![
            PathEl::MoveTo(p(10.0, 10.0)),
            PathEl::LineTo(p(15.0, 10.0)),
            PathEl::LineTo(p(15.0, 15.0)),
            PathEl::LineTo(p(0.0, 15.0)),
            PathEl::ClosePath,
        ]
    );
}

#[test]
fn relative_cubic_and_smooth_reflection() {
    assert_eq!(
        els("M 0 0 c 0 10 10 10 10 0 s 10 -10 10 0"),
        vec![
            PathEl::MoveTo(p(0.0, 0.0)),
            PathEl::CurveTo(p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0)),
            PathEl::CurveTo(p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0)),
        ]
    );
}

#[test]
fn smooth_cubic_without_previous_cubic_uses_current_point() {
    assert_eq!(
        els("M 5 5 S 10 0 15 5"),
        vec![
            PathEl::MoveTo(p(5.0, 5.0)),
            PathEl::CurveTo(p(5.0, 5.0), p(10.0, 0.0), p(15.0, 5.0)),
        ]
    );
}

#[test]
fn quadratic_relative() {
    assert_eq!(
        els("M 1 1 q 1 1 2 0"),
        vec![
            PathEl::MoveTo(p(1.0, 1.0)),
            PathEl::QuadTo(p(2.0, 2.0), p(3.0, 1.0)),
        ]
    );
}

#[test]
fn arc_is_a_chord_to_its_end_point() {
    assert_eq!(
        els("M 0 0 A 5 5 0 0 1 10 0 a 5 5 0 0 1 0 10"),
        vec![
            PathEl::MoveTo(p(0.0, 0.0)),
            PathEl::LineTo(p(10.0, 0.0)),
            PathEl::LineTo(p(10.0, 10.0)),
        ]
    );
}

#[test]
fn segment_without_move_starts_at_origin() {
    assert_eq!(
        els("L 3 4"),
        vec![PathEl::MoveTo(p(0.0, 0.0)), PathEl::LineTo(p(3.0, 4.0))]
    );
}

#[test]
fn segment_after_close_reopens_at_last_point() {
    assert_eq!(
        els("M 1 1 L 2 1 Z L 5 5"),
        vec![
            PathEl::MoveTo(p(1.0, 1.0)),
            PathEl::LineTo(p(2.0, 1.0)),
            PathEl::ClosePath,
            PathEl::MoveTo(p(2.0, 1.0)),
            PathEl::LineTo(p(5.0, 5.0)),
        ]
    );
}

#[test]
fn relative_segment_after_close_offsets_from_last_point() {
    let out = els("M0 0 L10 0 L10 10 Z l5 0");
    assert_eq!(out.last(), Some(&PathEl::LineTo(p(15.0, 10.0))));
    assert_eq!(out[out.len() - 2], PathEl::MoveTo(p(10.0, 10.0)));
}

#[test]
fn unparseable_input_has_no_geometry() {
    assert!(parse_bezpath("").is_none());
    assert!(parse_bezpath("hello").is_none());
}
