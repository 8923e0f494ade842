use std::{collections::HashMap, sync::Arc};

use crate::{
    decode::raster::RasterImage,
    foundation::{
        core::{Affine, BezPath, Rect, Rgba, Size},
        error::{SvgaError, SvgaResult},
    },
    render::{
        overrides::TextStyle,
        surface::{BlendMode, DrawSurface, StrokeStyle},
    },
    scene::model::{LineCap, LineJoin},
};

/// Rendered frame pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRgba {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixels, e.g. for PNG encoding.
    pub fn to_unpremultiplied(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// `vello_cpu` raster surface. Call [`CpuSurface::finish`] to obtain the frame.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    /// Open clips and layers, popped on `finish` if the caller left any.
    depth: usize,
    images: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
    fonts: HashMap<usize, CachedFont>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

struct CachedFont {
    _bytes: Arc<Vec<u8>>,
    data: vello_cpu::peniko::FontData,
    family: String,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("cached_images", &self.images.len())
            .field("cached_fonts", &self.fonts.len())
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> SvgaResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| SvgaError::validation("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| SvgaError::validation("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(SvgaError::validation("surface size must be non-zero"));
        }

        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            depth: 0,
            images: HashMap::new(),
            fonts: HashMap::new(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Rasterize everything drawn since the last `finish` and start a fresh frame.
    ///
    /// Image and font caches survive across frames.
    pub fn finish(&mut self) -> FrameRgba {
        while self.depth > 0 {
            self.ctx.pop_layer();
            self.depth -= 1;
        }
        let mut ctx = std::mem::replace(
            &mut self.ctx,
            vello_cpu::RenderContext::new(self.width, self.height),
        );
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn image_paint_for(&mut self, image: &RasterImage) -> SvgaResult<vello_cpu::Image> {
        let id = Arc::as_ptr(&image.rgba8_premul) as usize;
        if let Some((_, paint)) = self.images.get(&id) {
            return Ok(paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.images
            .insert(id, (Arc::clone(&image.rgba8_premul), paint.clone()));
        Ok(paint)
    }

    fn paint_image(&mut self, image: &RasterImage, transform: Affine, opacity: f32) {
        let paint = match self.image_paint_for(image) {
            Ok(p) => p,
            Err(err) => {
                tracing::debug!(%err, "skip image");
                return;
            }
        };
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);

        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }

    fn font_for(
        &mut self,
        bytes: &Arc<Vec<u8>>,
    ) -> SvgaResult<(vello_cpu::peniko::FontData, String)> {
        let id = Arc::as_ptr(bytes) as usize;
        if let Some(f) = self.fonts.get(&id) {
            return Ok((f.data.clone(), f.family.clone()));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SvgaError::validation("no font families registered from font bytes"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SvgaError::validation("registered font family has no name"))?
            .to_string();

        let blob = vello_cpu::peniko::Blob::from(bytes.as_ref().clone());
        let data = vello_cpu::peniko::FontData::new(blob, 0);
        self.fonts.insert(
            id,
            CachedFont {
                _bytes: Arc::clone(bytes),
                data: data.clone(),
                family: family.clone(),
            },
        );
        Ok((data, family))
    }

    fn layout_text(
        &mut self,
        text: &str,
        family: String,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl DrawSurface for CpuSurface {
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba) {
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(
        &mut self,
        path: &BezPath,
        transform: Affine,
        color: Rgba,
        stroke: &StrokeStyle,
    ) {
        let mut s = vello_cpu::kurbo::Stroke::new(stroke.width)
            .with_caps(match stroke.cap {
                LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
                LineCap::Round => vello_cpu::kurbo::Cap::Round,
                LineCap::Square => vello_cpu::kurbo::Cap::Square,
            })
            .with_join(match stroke.join {
                LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
                LineJoin::Round => vello_cpu::kurbo::Join::Round,
                LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
            })
            .with_miter_limit(stroke.miter_limit);
        if let Some(d) = stroke.dash {
            s = s.with_dashes(f64::from(d.phase), [f64::from(d.on), f64::from(d.off)]);
        }

        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(s);
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn draw_image_rect(&mut self, image: &RasterImage, dst: Rect, opacity: f32) {
        if image.is_empty() {
            return;
        }
        let transform = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(
                dst.width() / f64::from(image.width),
                dst.height() / f64::from(image.height),
            );
        self.paint_image(image, transform, opacity);
    }

    fn draw_image(
        &mut self,
        image: &RasterImage,
        transform: Affine,
        opacity: f32,
        blend: BlendMode,
    ) {
        match blend {
            BlendMode::SrcOver => self.paint_image(image, transform, opacity),
            BlendMode::DestIn => {
                self.ctx.push_blend_layer(vello_cpu::peniko::BlendMode::new(
                    vello_cpu::peniko::Mix::Normal,
                    vello_cpu::peniko::Compose::DestIn,
                ));
                self.paint_image(image, transform, opacity);
                self.ctx.pop_layer();
            }
        }
    }

    fn push_clip(&mut self, path: &BezPath, transform: Affine) {
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.depth += 1;
    }

    fn pop_clip(&mut self) {
        self.pop_layer();
    }

    fn push_layer(&mut self) {
        self.ctx
            .push_blend_layer(vello_cpu::peniko::BlendMode::default());
        self.depth += 1;
    }

    fn pop_layer(&mut self) {
        if self.depth == 0 {
            tracing::debug!("unbalanced pop ignored");
            return;
        }
        self.ctx.pop_layer();
        self.depth -= 1;
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, bounds: Rect, transform: Affine) {
        let Some(font_bytes) = style.font.as_ref() else {
            tracing::trace!("text without font skipped");
            return;
        };
        if text.is_empty() || !style.font_size.is_finite() || style.font_size <= 0.0 {
            return;
        }
        let (font, family) = match self.font_for(font_bytes) {
            Ok(f) => f,
            Err(err) => {
                tracing::debug!(%err, "skip text");
                return;
            }
        };

        let [r, g, b, a] = style.color.to_rgba8();
        let layout = self.layout_text(text, family, style.font_size, TextBrushRgba8 { r, g, b, a });
        let dx = bounds.x0 + (bounds.width() - f64::from(layout.width())) / 2.0;
        let dy = bounds.y0 + (bounds.height() - f64::from(layout.height())) / 2.0;
        self.ctx
            .set_transform(affine_to_cpu(transform * Affine::translate((dx, dy))));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SvgaResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SvgaError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SvgaError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SvgaError::validation("raster byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
