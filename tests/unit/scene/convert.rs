use super::*;
use crate::decode::schema::{RawEllipseArgs, RawParams, RawPathArgs, RawRectArgs};

#[test]
fn empty_movie_gets_documented_defaults() {
    let doc = document_from_raw(RawMovie::default(), HashMap::new());
    assert_eq!(doc.version, "");
    assert_eq!(doc.canvas_size, Size::ZERO);
    assert_eq!(doc.fps, 20);
    assert_eq!(doc.frame_count, 0);
    assert!(doc.sprites.is_empty());
    assert!(doc.audios.is_empty());
}

#[test]
fn params_are_carried_over() {
    let raw = RawMovie {
        version: Some("1.5".into()),
        params: Some(RawParams {
            view_box_width: Some(750.0),
            view_box_height: Some(1334.0),
            fps: Some(30),
            frames: Some(60),
        }),
        ..RawMovie::default()
    };
    let doc = document_from_raw(raw, HashMap::new());
    assert_eq!(doc.version, "1.5");
    assert_eq!(doc.canvas_size, Size::new(750.0, 1334.0));
    assert_eq!(doc.fps, 30);
    assert_eq!(doc.frame_count, 60);
}

#[test]
fn frame_defaults_identity_transform_and_zero_layout() {
    let f = frame(RawFrame::default());
    assert_eq!(f.alpha, 0.0);
    assert_eq!(f.layout, Rect::ZERO);
    assert_eq!(f.transform, Affine::IDENTITY);
    assert_eq!(f.clip_path, None);
}

#[test]
fn partial_transform_defaults_per_field() {
    let t = transform(RawTransform {
        tx: Some(5.0),
        d: Some(2.0),
        ..RawTransform::default()
    });
    assert_eq!(t.as_coeffs(), [1.0, 0.0, 0.0, 2.0, 5.0, 0.0]);
}

#[test]
fn layout_rect_spans_origin_plus_size() {
    let f = frame(RawFrame {
        alpha: Some(1.5),
        layout: Some(RawLayout {
            x: Some(10.0),
            y: Some(20.0),
            width: Some(30.0),
            height: Some(40.0),
        }),
        ..RawFrame::default()
    });
    assert_eq!(f.alpha, 1.5);
    assert_eq!(f.layout, Rect::new(10.0, 20.0, 40.0, 60.0));
}

#[test]
fn shape_kinds_and_missing_args() {
    let rect = shape(RawShape {
        kind: Some(1),
        rect: Some(RawRectArgs {
            width: Some(4.0),
            height: Some(3.0),
            ..RawRectArgs::default()
        }),
        ..RawShape::default()
    });
    assert_eq!(
        rect.geometry,
        ShapeGeometry::Rect {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 3.0,
            corner_radius: 0.0
        }
    );

    let ellipse = shape(RawShape {
        kind: Some(2),
        ellipse: Some(RawEllipseArgs {
            x: Some(1.0),
            radius_x: Some(2.0),
            ..RawEllipseArgs::default()
        }),
        ..RawShape::default()
    });
    assert_eq!(
        ellipse.geometry,
        ShapeGeometry::Ellipse {
            cx: 1.0,
            cy: 0.0,
            rx: 2.0,
            ry: 0.0
        }
    );

    let keep = shape(RawShape {
        kind: Some(3),
        ..RawShape::default()
    });
    assert_eq!(keep.geometry, ShapeGeometry::Keep);

    let unknown = shape(RawShape {
        kind: Some(42),
        path: Some(RawPathArgs {
            d: Some("M0 0".into()),
        }),
        ..RawShape::default()
    });
    assert_eq!(unknown.geometry, ShapeGeometry::Path { d: "M0 0".into() });

    let bare = shape(RawShape::default());
    assert_eq!(bare.geometry, ShapeGeometry::Path { d: String::new() });
    assert!(bare.style.is_none());
    assert!(bare.transform.is_none());
}

#[test]
fn style_defaults_and_enums() {
    let s = style(RawStyle::default());
    assert_eq!(s, ShapeStyle::default());
    assert_eq!(s.dash, None);

    let s = style(RawStyle {
        fill: Some(RawColor {
            r: Some(2.0),
            g: Some(-1.0),
            ..RawColor::default()
        }),
        line_cap: Some(2),
        line_join: Some(1),
        line_dash_ii: Some(3.0),
        ..RawStyle::default()
    });
    assert_eq!(s.fill, Some(Rgba::new(1.0, 0.0, 0.0, 1.0)));
    assert_eq!(s.line_cap, LineCap::Square);
    assert_eq!(s.line_join, LineJoin::Round);
    assert_eq!(
        s.dash,
        Some(Dash {
            on: 0.0,
            off: 3.0,
            phase: 0.0
        })
    );

    let s = style(RawStyle {
        line_cap: Some(9),
        line_join: Some(-1),
        ..RawStyle::default()
    });
    assert_eq!(s.line_cap, LineCap::Butt);
    assert_eq!(s.line_join, LineJoin::Miter);
}

#[test]
fn audio_defaults_to_zero() {
    let a = audio(RawAudio {
        audio_key: Some("k".into()),
        end_frame: Some(5),
        ..RawAudio::default()
    });
    assert_eq!(
        a,
        AudioCue {
            audio_key: Some("k".into()),
            start_frame: 0,
            end_frame: 5,
            start_time: 0,
            total_time: 0
        }
    );
}
