//! Raw schema to scene model conversion. Field defaults live here and nowhere else.

use std::collections::HashMap;

use crate::{
    decode::{
        raster::RasterImage,
        schema::{
            RawAudio, RawColor, RawFrame, RawLayout, RawMovie, RawShape, RawSprite, RawStyle,
            RawTransform,
        },
    },
    foundation::core::{Affine, Rect, Rgba, Size, affine_from_parts},
    scene::model::{
        AudioCue, Dash, Document, Frame, LineCap, LineJoin, Shape, ShapeGeometry, ShapeStyle,
        Sprite,
    },
};

pub const DEFAULT_FPS: i32 = 20;

/// Assemble a document from a decoded movie and its resolved image map.
pub fn document_from_raw(raw: RawMovie, images: HashMap<String, RasterImage>) -> Document {
    let params = raw.params.unwrap_or_default();
    Document {
        version: raw.version.unwrap_or_default(),
        canvas_size: Size::new(
            f64::from(params.view_box_width.unwrap_or(0.0)),
            f64::from(params.view_box_height.unwrap_or(0.0)),
        ),
        fps: params.fps.unwrap_or(DEFAULT_FPS),
        frame_count: params.frames.unwrap_or(0),
        sprites: raw.sprites.into_iter().map(sprite).collect(),
        images,
        audios: raw.audios.into_iter().map(audio).collect(),
    }
}

fn sprite(raw: RawSprite) -> Sprite {
    Sprite {
        image_key: raw.image_key,
        matte_key: raw.matte_key,
        frames: raw.frames.into_iter().map(frame).collect(),
    }
}

fn frame(raw: RawFrame) -> Frame {
    Frame {
        alpha: raw.alpha.unwrap_or(0.0),
        layout: layout(raw.layout.unwrap_or_default()),
        transform: raw.transform.map(transform).unwrap_or(Affine::IDENTITY),
        clip_path: raw.clip_path,
        shapes: raw.shapes.into_iter().map(shape).collect(),
    }
}

fn layout(raw: RawLayout) -> Rect {
    let x = f64::from(raw.x.unwrap_or(0.0));
    let y = f64::from(raw.y.unwrap_or(0.0));
    let w = f64::from(raw.width.unwrap_or(0.0));
    let h = f64::from(raw.height.unwrap_or(0.0));
    Rect::new(x, y, x + w, y + h)
}

pub(crate) fn transform(raw: RawTransform) -> Affine {
    let f = |v: Option<f32>, d: f32| f64::from(v.unwrap_or(d));
    affine_from_parts(
        f(raw.a, 1.0),
        f(raw.b, 0.0),
        f(raw.c, 0.0),
        f(raw.d, 1.0),
        f(raw.tx, 0.0),
        f(raw.ty, 0.0),
    )
}

fn shape(raw: RawShape) -> Shape {
    let geometry = match raw.kind.unwrap_or(0) {
        1 => {
            let r = raw.rect.unwrap_or_default();
            ShapeGeometry::Rect {
                x: r.x.unwrap_or(0.0),
                y: r.y.unwrap_or(0.0),
                width: r.width.unwrap_or(0.0),
                height: r.height.unwrap_or(0.0),
                corner_radius: r.corner_radius.unwrap_or(0.0),
            }
        }
        2 => {
            let e = raw.ellipse.unwrap_or_default();
            ShapeGeometry::Ellipse {
                cx: e.x.unwrap_or(0.0),
                cy: e.y.unwrap_or(0.0),
                rx: e.radius_x.unwrap_or(0.0),
                ry: e.radius_y.unwrap_or(0.0),
            }
        }
        3 => ShapeGeometry::Keep,
        // 0 and unknown values are plain paths
        _ => ShapeGeometry::Path {
            d: raw.path.and_then(|p| p.d).unwrap_or_default(),
        },
    };

    Shape {
        geometry,
        style: raw.styles.map(style),
        transform: raw.transform.map(transform),
    }
}

fn style(raw: RawStyle) -> ShapeStyle {
    let dash = if raw.line_dash_i.is_none()
        && raw.line_dash_ii.is_none()
        && raw.line_dash_iii.is_none()
    {
        None
    } else {
        Some(Dash {
            on: raw.line_dash_i.unwrap_or(0.0),
            off: raw.line_dash_ii.unwrap_or(0.0),
            phase: raw.line_dash_iii.unwrap_or(0.0),
        })
    };

    ShapeStyle {
        fill: raw.fill.map(color),
        stroke: raw.stroke.map(color),
        stroke_width: raw.stroke_width.unwrap_or(0.0),
        line_cap: match raw.line_cap {
            Some(1) => LineCap::Round,
            Some(2) => LineCap::Square,
            _ => LineCap::Butt,
        },
        line_join: match raw.line_join {
            Some(1) => LineJoin::Round,
            Some(2) => LineJoin::Bevel,
            _ => LineJoin::Miter,
        },
        miter_limit: raw.miter_limit.unwrap_or(0.0),
        dash,
    }
}

fn color(raw: RawColor) -> Rgba {
    Rgba::new(
        raw.r.unwrap_or(0.0),
        raw.g.unwrap_or(0.0),
        raw.b.unwrap_or(0.0),
        raw.a.unwrap_or(1.0),
    )
}

fn audio(raw: RawAudio) -> AudioCue {
    AudioCue {
        audio_key: raw.audio_key,
        start_frame: raw.start_frame.unwrap_or(0),
        end_frame: raw.end_frame.unwrap_or(0),
        start_time: raw.start_time.unwrap_or(0),
        total_time: raw.total_time.unwrap_or(0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/convert.rs"]
mod tests;
