use crate::{
    decode::raster::RasterImage,
    foundation::core::{Affine, BezPath, Rect, Rgba},
    render::overrides::TextStyle,
    scene::model::{Dash, LineCap, LineJoin, ShapeStyle},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[default]
    SrcOver,
    /// Keep existing content only where the source has coverage.
    DestIn,
}

/// Resolved stroke parameters handed to a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    /// Already clamped: `on >= 1`, `off >= 0.1`.
    pub dash: Option<Dash>,
}

impl StrokeStyle {
    pub fn from_shape_style(style: &ShapeStyle) -> Self {
        Self {
            width: f64::from(style.stroke_width),
            cap: style.line_cap,
            join: style.line_join,
            miter_limit: f64::from(style.miter_limit),
            dash: style
                .dash
                .filter(|d| d.on > 0.0 || d.off > 0.0)
                .map(|d| Dash {
                    on: d.on.max(1.0),
                    off: d.off.max(0.1),
                    phase: d.phase,
                }),
        }
    }
}

/// Drawing capability the compositor renders into.
///
/// Every call carries its own transform; surfaces keep no implicit transform stack.
/// Clips and layers nest and must be popped in reverse order.
pub trait DrawSurface {
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba);

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Rgba, stroke: &StrokeStyle);

    /// Blit the whole raster into an axis-aligned destination rectangle in surface space.
    fn draw_image_rect(&mut self, image: &RasterImage, dst: Rect, opacity: f32);

    /// Draw the raster's `(0, 0, width, height)` rectangle through `transform`.
    fn draw_image(
        &mut self,
        image: &RasterImage,
        transform: Affine,
        opacity: f32,
        blend: BlendMode,
    );

    fn push_clip(&mut self, path: &BezPath, transform: Affine);

    fn pop_clip(&mut self);

    /// Open an isolated compositing layer covering the surface.
    fn push_layer(&mut self);

    fn pop_layer(&mut self);

    /// Draw `text` centered within `bounds` (local coordinates under `transform`).
    fn draw_text(&mut self, text: &str, style: &TextStyle, bounds: Rect, transform: Affine);
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
