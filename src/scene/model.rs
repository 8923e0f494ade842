use std::collections::HashMap;

use crate::{
    decode::raster::RasterImage,
    foundation::core::{Affine, Rect, Rgba, Size},
};

/// Suffix marking a sprite as a mask source rather than a drawn layer.
pub const MATTE_SUFFIX: &str = ".matte";

/// Decoded animation, immutable once built and shared read-only by playback and rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub version: String,
    /// Authoring canvas (view box) size in document units.
    pub canvas_size: Size,
    pub fps: i32,
    pub frame_count: i32,
    /// Sprites in paint order.
    pub sprites: Vec<Sprite>,
    pub images: HashMap<String, RasterImage>,
    pub audios: Vec<AudioCue>,
}

impl Document {
    pub fn image(&self, key: &str) -> Option<&RasterImage> {
        self.images.get(key)
    }

    /// Short, serializable description of the document.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            version: self.version.clone(),
            width: self.canvas_size.width,
            height: self.canvas_size.height,
            fps: self.fps,
            frames: self.frame_count,
            sprites: self.sprites.len(),
            matte_sprites: self.sprites.iter().filter(|s| s.is_matte()).count(),
            images: self.images.len(),
            audios: self.audios.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentSummary {
    pub version: String,
    pub width: f64,
    pub height: f64,
    pub fps: i32,
    pub frames: i32,
    pub sprites: usize,
    pub matte_sprites: usize,
    pub images: usize,
    pub audios: usize,
}

/// One animated layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub image_key: Option<String>,
    /// Non-empty: this sprite is masked by the matte sprite whose `image_key` equals this value.
    pub matte_key: Option<String>,
    pub frames: Vec<Frame>,
}

impl Sprite {
    /// Whether this sprite is a mask source (`image_key` ends with `.matte`).
    pub fn is_matte(&self) -> bool {
        self.image_key
            .as_deref()
            .is_some_and(|k| k.ends_with(MATTE_SUFFIX))
    }

    /// Matte key if present and non-empty.
    pub fn matte_key(&self) -> Option<&str> {
        self.matte_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Frame at `index`; out-of-range and negative indices yield `None`.
    pub fn frame(&self, index: i32) -> Option<&Frame> {
        usize::try_from(index).ok().and_then(|i| self.frames.get(i))
    }
}

/// Per-frame state of a sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Stored as decoded. Clamp to `[0, 1]` only when drawing.
    pub alpha: f32,
    /// Placement box for image content, in document space.
    pub layout: Rect,
    pub transform: Affine,
    pub clip_path: Option<String>,
    pub shapes: Vec<Shape>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            layout: Rect::ZERO,
            transform: Affine::IDENTITY,
            clip_path: None,
            shapes: Vec::new(),
        }
    }
}

impl Frame {
    pub fn clamped_alpha(&self) -> f32 {
        self.alpha.clamp(0.0, 1.0)
    }

    pub fn has_layout_area(&self) -> bool {
        self.layout.width() > 0.0 && self.layout.height() > 0.0
    }

    /// Clip path if present and non-empty.
    pub fn clip_path(&self) -> Option<&str> {
        self.clip_path.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Path,
    Rect,
    Ellipse,
    Keep,
}

/// Geometry arguments, one variant per [`ShapeKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    Path {
        d: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
    },
    /// Reuse the geometry most recently built in the current sprite frame.
    Keep,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: ShapeGeometry,
    pub style: Option<ShapeStyle>,
    /// Applied to the shape's own geometry before drawing.
    pub transform: Option<Affine>,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self.geometry {
            ShapeGeometry::Path { .. } => ShapeKind::Path,
            ShapeGeometry::Rect { .. } => ShapeKind::Rect,
            ShapeGeometry::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeGeometry::Keep => ShapeKind::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Dash tuple as stored: `(on, off, phase)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
    pub phase: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub dash: Option<Dash>,
}

/// Audio cue metadata. Payload bytes are not decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AudioCue {
    pub audio_key: Option<String>,
    pub start_frame: i32,
    pub end_frame: i32,
    pub start_time: i32,
    pub total_time: i32,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
