//! Per-frame compositing: turns one frame of a [`Document`] into surface calls.

use std::{collections::HashMap, sync::Arc};

use kurbo::Shape as _;

use crate::{
    foundation::core::{Affine, BezPath, Rect, Size},
    path::geometry::parse_bezpath,
    render::{
        matte::MatteFlags,
        overrides::DynamicOverrides,
        recording::{DrawOp, RecordingSurface},
        scale::{ContentScale, ScaleResult, compute_scale_result},
        surface::{BlendMode, DrawSurface, StrokeStyle},
    },
    scene::model::{Document, Frame, MATTE_SUFFIX, Shape, ShapeGeometry, Sprite},
};

/// Below this magnitude the off-diagonal terms count as zero and images take the rect path.
const AXIS_EPSILON: f64 = 0.001;
/// Flattening tolerance for rect and ellipse outlines.
const SHAPE_TOLERANCE: f64 = 0.1;

type PathCache = HashMap<String, Option<BezPath>>;

/// Renders frames of one shared document. Holds only derived caches, never document state.
#[derive(Debug)]
pub struct FrameCompositor {
    document: Arc<Document>,
    /// Indices into `document.sprites` of drawable (non-matte) sprites, in paint order.
    drawn: Vec<usize>,
    /// Matte sprite index by image key.
    mattes: HashMap<String, usize>,
    flags: MatteFlags,
    scale_cache: Option<(Size, ContentScale, ScaleResult)>,
    clip_paths: PathCache,
    shape_paths: PathCache,
}

impl FrameCompositor {
    pub fn new(document: Arc<Document>) -> Self {
        let mut drawn = Vec::new();
        let mut mattes = HashMap::new();
        for (i, sprite) in document.sprites.iter().enumerate() {
            match sprite.image_key.as_deref() {
                Some(key) if sprite.is_matte() => {
                    mattes.insert(key.to_owned(), i);
                }
                _ => drawn.push(i),
            }
        }
        let keys: Vec<Option<&str>> = drawn
            .iter()
            .map(|&i| document.sprites[i].matte_key())
            .collect();
        let flags = MatteFlags::from_keys(&keys);

        Self {
            document,
            drawn,
            mattes,
            flags,
            scale_cache: None,
            clip_paths: HashMap::new(),
            shape_paths: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn matte_flags(&self) -> &MatteFlags {
        &self.flags
    }

    /// Scale/offset for `canvas` under `mode`, reused while both stay the same.
    pub fn scale_result(&mut self, canvas: Size, mode: ContentScale) -> ScaleResult {
        if let Some((c, m, r)) = self.scale_cache
            && c == canvas
            && m == mode
        {
            return r;
        }
        let r = compute_scale_result(canvas, self.document.canvas_size, mode);
        self.scale_cache = Some((canvas, mode, r));
        r
    }

    /// Draw frame `frame_index` onto `surface`. Drawables that cannot be drawn are skipped.
    #[tracing::instrument(level = "trace", skip(self, overrides, surface))]
    pub fn render(
        &mut self,
        frame_index: i32,
        canvas: Size,
        mode: ContentScale,
        overrides: &DynamicOverrides,
        surface: &mut dyn DrawSurface,
    ) {
        let doc = Arc::clone(&self.document);
        if doc.canvas_size.width <= 0.0 || doc.canvas_size.height <= 0.0 {
            return;
        }
        let scale = self.scale_result(canvas, mode);

        for slot in 0..self.drawn.len() {
            let sprite = &doc.sprites[self.drawn[slot]];
            if self.flags.begin[slot] {
                surface.push_layer();
            }

            self.draw_sprite(&doc, sprite, frame_index, scale, overrides, surface);

            if self.flags.end[slot] {
                let matte = sprite
                    .matte_key()
                    .and_then(|k| self.mattes.get(k))
                    .map(|&i| &doc.sprites[i]);
                if let Some(matte) = matte {
                    draw_matte_sprite(&doc, matte, frame_index, scale, surface);
                }
                surface.pop_layer();
            }
        }
    }

    /// Render into a fresh [`RecordingSurface`] and return the calls.
    pub fn record(
        &mut self,
        frame_index: i32,
        canvas: Size,
        mode: ContentScale,
        overrides: &DynamicOverrides,
    ) -> Vec<DrawOp> {
        let mut rec = RecordingSurface::new();
        self.render(frame_index, canvas, mode, overrides, &mut rec);
        rec.into_ops()
    }

    fn draw_sprite(
        &mut self,
        doc: &Document,
        sprite: &Sprite,
        frame_index: i32,
        scale: ScaleResult,
        overrides: &DynamicOverrides,
        surface: &mut dyn DrawSurface,
    ) {
        let Some(frame) = sprite.frame(frame_index) else {
            return;
        };
        if frame.alpha <= 0.0 {
            return;
        }
        let key = sprite.image_key.as_deref();
        if let Some(k) = key
            && (overrides.is_hidden(k) || k.ends_with(MATTE_SUFFIX))
        {
            return;
        }

        if let Some(k) = key {
            self.draw_image(doc, frame, k, scale, overrides, surface);
        }

        let dynamic = key.is_some_and(|k| overrides.has_dynamic_content(k));
        if frame.shapes.is_empty() && !dynamic {
            return;
        }
        let combined = scale.to_affine() * frame.transform;

        let mut last: Option<BezPath> = None;
        for shape in &frame.shapes {
            self.draw_shape(shape, combined, &mut last, surface);
        }

        if let Some(k) = key
            && dynamic
        {
            draw_dynamic(frame, frame_index, k, combined, overrides, surface);
        }
    }

    fn draw_image(
        &mut self,
        doc: &Document,
        frame: &Frame,
        key: &str,
        scale: ScaleResult,
        overrides: &DynamicOverrides,
        surface: &mut dyn DrawSurface,
    ) {
        let Some(raster) = overrides.dynamic_image(key).or_else(|| doc.image(key)) else {
            tracing::trace!(key, "no raster for sprite");
            return;
        };
        if !frame.has_layout_area() || raster.is_empty() {
            return;
        }

        let alpha = frame.clamped_alpha();
        let [a, b, c, d, tx, ty] = frame.transform.as_coeffs();
        let layout = frame.layout;
        let combined = scale.to_affine() * frame.transform;
        let clip = frame
            .clip_path()
            .and_then(|p| cached_path(&mut self.clip_paths, p));

        if b.abs() <= AXIS_EPSILON && c.abs() <= AXIS_EPSILON {
            let w = scale.scale_x * layout.width() * a;
            let h = scale.scale_y * layout.height() * d;
            if w <= 0.0 || h <= 0.0 {
                return;
            }
            let x = scale.offset_x + scale.scale_x * tx;
            let y = scale.offset_y + scale.scale_y * ty;
            let dst = Rect::new(x, y, x + w, y + h);

            // Clip path lives in sprite space, under content scale and sprite transform.
            with_clip(surface, clip, combined, |s| s.draw_image_rect(raster, dst, alpha));
        } else {
            let matrix = combined * raster_to_layout(layout, raster.width, raster.height);
            // Clip path lives in sprite space, under content scale and sprite transform.
            with_clip(surface, clip, combined, |s| {
                s.draw_image(raster, matrix, alpha, BlendMode::SrcOver)
            });
        }
    }

    /// `last` is the geometry slot reused by `Keep` shapes; it holds geometry after the
    /// shape's own transform.
    fn draw_shape(
        &mut self,
        shape: &Shape,
        combined: Affine,
        last: &mut Option<BezPath>,
        surface: &mut dyn DrawSurface,
    ) {
        let geometry = match &shape.geometry {
            ShapeGeometry::Path { d } => {
                if d.is_empty() {
                    return;
                }
                match cached_path(&mut self.shape_paths, d) {
                    Some(p) => p.clone(),
                    None => return,
                }
            }
            &ShapeGeometry::Rect {
                x,
                y,
                width,
                height,
                corner_radius,
            } => {
                let (x, y) = (f64::from(x), f64::from(y));
                let rect = Rect::new(x, y, x + f64::from(width), y + f64::from(height));
                if corner_radius > 0.0 {
                    rect.to_rounded_rect(f64::from(corner_radius))
                        .to_path(SHAPE_TOLERANCE)
                } else {
                    rect.to_path(SHAPE_TOLERANCE)
                }
            }
            &ShapeGeometry::Ellipse { cx, cy, rx, ry } => kurbo::Ellipse::new(
                (f64::from(cx), f64::from(cy)),
                (f64::from(rx), f64::from(ry)),
                0.0,
            )
            .to_path(SHAPE_TOLERANCE),
            ShapeGeometry::Keep => match last {
                Some(p) => p.clone(),
                None => return,
            },
        };

        let mut path = geometry;
        if let Some(t) = shape.transform {
            path.apply_affine(t);
        }
        *last = Some(path.clone());

        let Some(style) = &shape.style else {
            return;
        };
        if let Some(fill) = style.fill
            && !fill.is_transparent()
        {
            surface.fill_path(&path, combined, fill);
        }
        if let Some(stroke) = style.stroke
            && style.stroke_width > 0.0
        {
            surface.stroke_path(&path, combined, stroke, &StrokeStyle::from_shape_style(style));
        }
    }
}

fn draw_dynamic(
    frame: &Frame,
    frame_index: i32,
    key: &str,
    combined: Affine,
    overrides: &DynamicOverrides,
    surface: &mut dyn DrawSurface,
) {
    if let Some(drawer) = overrides.dynamic_drawer(key) {
        drawer(surface, combined, frame_index);
    }
    let Some((text, style)) = overrides.dynamic_text(key) else {
        return;
    };
    if !frame.has_layout_area() {
        return;
    }
    surface.draw_text(text, style, frame.layout, combined);
}

/// Mask the open layer with the matte sprite's raster (destination-in).
fn draw_matte_sprite(
    doc: &Document,
    matte: &Sprite,
    frame_index: i32,
    scale: ScaleResult,
    surface: &mut dyn DrawSurface,
) {
    let Some(frame) = matte.frame(frame_index) else {
        return;
    };
    if frame.alpha <= 0.0 {
        return;
    }
    let Some(key) = matte.image_key.as_deref() else {
        return;
    };
    let raster_key = key.strip_suffix(MATTE_SUFFIX).unwrap_or(key);
    let Some(raster) = doc.image(raster_key) else {
        tracing::trace!(key = raster_key, "no raster for matte");
        return;
    };
    if !frame.has_layout_area() || raster.is_empty() {
        return;
    }

    let matrix = scale.to_affine()
        * frame.transform
        * raster_to_layout(frame.layout, raster.width, raster.height);
    surface.draw_image(raster, matrix, frame.clamped_alpha(), BlendMode::DestIn);
}

fn raster_to_layout(layout: Rect, width: u32, height: u32) -> Affine {
    Affine::scale_non_uniform(
        layout.width() / f64::from(width),
        layout.height() / f64::from(height),
    )
}

fn with_clip(
    surface: &mut dyn DrawSurface,
    clip: Option<&BezPath>,
    transform: Affine,
    draw: impl FnOnce(&mut dyn DrawSurface),
) {
    match clip {
        Some(path) => {
            surface.push_clip(path, transform);
            draw(&mut *surface);
            surface.pop_clip();
        }
        None => draw(surface),
    }
}

/// Parse-once lookup. Unparseable strings are cached as `None`.
fn cached_path<'a>(cache: &'a mut PathCache, d: &str) -> Option<&'a BezPath> {
    if !cache.contains_key(d) {
        let parsed = parse_bezpath(d);
        if parsed.is_none() {
            tracing::debug!(d, "path string produced no geometry");
        }
        cache.insert(d.to_owned(), parsed);
    }
    cache.get(d).and_then(Option::as_ref)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
