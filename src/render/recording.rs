use crate::{
    decode::raster::RasterImage,
    foundation::core::{Affine, BezPath, Rect, Rgba},
    render::{
        overrides::TextStyle,
        surface::{BlendMode, DrawSurface, StrokeStyle},
    },
};

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Rgba,
    },
    StrokePath {
        path: BezPath,
        transform: Affine,
        color: Rgba,
        stroke: StrokeStyle,
    },
    ImageRect {
        image: RasterImage,
        dst: Rect,
        opacity: f32,
    },
    Image {
        image: RasterImage,
        transform: Affine,
        opacity: f32,
        blend: BlendMode,
    },
    PushClip {
        path: BezPath,
        transform: Affine,
    },
    PopClip,
    PushLayer,
    PopLayer,
    Text {
        text: String,
        style: TextStyle,
        bounds: Rect,
        transform: Affine,
    },
}

impl DrawOp {
    /// Short tag for logs and assertions.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FillPath { .. } => "fill",
            Self::StrokePath { .. } => "stroke",
            Self::ImageRect { .. } => "image-rect",
            Self::Image { .. } => "image",
            Self::PushClip { .. } => "push-clip",
            Self::PopClip => "pop-clip",
            Self::PushLayer => "push-layer",
            Self::PopLayer => "pop-layer",
            Self::Text { .. } => "text",
        }
    }
}

/// Surface that stores calls instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Replay every recorded call onto another surface.
    pub fn replay(&self, target: &mut dyn DrawSurface) {
        for op in &self.ops {
            match op {
                DrawOp::FillPath {
                    path,
                    transform,
                    color,
                } => target.fill_path(path, *transform, *color),
                DrawOp::StrokePath {
                    path,
                    transform,
                    color,
                    stroke,
                } => target.stroke_path(path, *transform, *color, stroke),
                DrawOp::ImageRect {
                    image,
                    dst,
                    opacity,
                } => target.draw_image_rect(image, *dst, *opacity),
                DrawOp::Image {
                    image,
                    transform,
                    opacity,
                    blend,
                } => target.draw_image(image, *transform, *opacity, *blend),
                DrawOp::PushClip { path, transform } => target.push_clip(path, *transform),
                DrawOp::PopClip => target.pop_clip(),
                DrawOp::PushLayer => target.push_layer(),
                DrawOp::PopLayer => target.pop_layer(),
                DrawOp::Text {
                    text,
                    style,
                    bounds,
                    transform,
                } => target.draw_text(text, style, *bounds, *transform),
            }
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            transform,
            color,
        });
    }

    fn stroke_path(
        &mut self,
        path: &BezPath,
        transform: Affine,
        color: Rgba,
        stroke: &StrokeStyle,
    ) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            transform,
            color,
            stroke: *stroke,
        });
    }

    fn draw_image_rect(&mut self, image: &RasterImage, dst: Rect, opacity: f32) {
        self.ops.push(DrawOp::ImageRect {
            image: image.clone(),
            dst,
            opacity,
        });
    }

    fn draw_image(
        &mut self,
        image: &RasterImage,
        transform: Affine,
        opacity: f32,
        blend: BlendMode,
    ) {
        self.ops.push(DrawOp::Image {
            image: image.clone(),
            transform,
            opacity,
            blend,
        });
    }

    fn push_clip(&mut self, path: &BezPath, transform: Affine) {
        self.ops.push(DrawOp::PushClip {
            path: path.clone(),
            transform,
        });
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }

    fn push_layer(&mut self) {
        self.ops.push(DrawOp::PushLayer);
    }

    fn pop_layer(&mut self) {
        self.ops.push(DrawOp::PopLayer);
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, bounds: Rect, transform: Affine) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            style: style.clone(),
            bounds,
            transform,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
