use std::{collections::HashMap, sync::Arc};

use crate::{
    decode::raster::{RasterDecoder, RasterImage},
    foundation::{
        core::{Affine, Rgba},
        error::SvgaResult,
    },
    render::surface::DrawSurface,
};

/// Custom per-sprite painter: `(surface, sprite matrix, frame index)`.
pub type DynamicDrawer = Arc<dyn Fn(&mut dyn DrawSurface, Affine, i32) + Send + Sync>;

/// Style for replacement text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    pub font_size: f32,
    /// Font file bytes (TTF/OTF). Surfaces that shape text skip runs without a font.
    pub font: Option<Arc<Vec<u8>>>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            font_size: 14.0,
            font: None,
        }
    }
}

impl TextStyle {
    pub fn with_font(mut self, bytes: impl Into<Arc<Vec<u8>>>) -> Self {
        self.font = Some(bytes.into());
        self
    }
}

/// Caller-owned replacements keyed by sprite image key.
#[derive(Clone, Default)]
pub struct DynamicOverrides {
    images: HashMap<String, RasterImage>,
    texts: HashMap<String, (String, TextStyle)>,
    hidden: HashMap<String, bool>,
    drawers: HashMap<String, DynamicDrawer>,
}

impl std::fmt::Debug for DynamicOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicOverrides")
            .field("images", &self.images.keys().collect::<Vec<_>>())
            .field("texts", &self.texts)
            .field("hidden", &self.hidden)
            .field("drawers", &self.drawers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DynamicOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dynamic_image(&mut self, image: RasterImage, key: impl Into<String>) {
        self.images.insert(key.into(), image);
    }

    /// Decode encoded image bytes now so rendering never decodes.
    pub fn set_dynamic_image_bytes(
        &mut self,
        decoder: &dyn RasterDecoder,
        bytes: &[u8],
        key: impl Into<String>,
    ) -> SvgaResult<()> {
        let image = decoder.decode(bytes)?;
        self.set_dynamic_image(image, key);
        Ok(())
    }

    pub fn set_dynamic_text(
        &mut self,
        text: impl Into<String>,
        style: TextStyle,
        key: impl Into<String>,
    ) {
        self.texts.insert(key.into(), (text.into(), style));
    }

    pub fn set_hidden(&mut self, hidden: bool, key: impl Into<String>) {
        self.hidden.insert(key.into(), hidden);
    }

    pub fn set_dynamic_drawer(
        &mut self,
        drawer: impl Fn(&mut dyn DrawSurface, Affine, i32) + Send + Sync + 'static,
        key: impl Into<String>,
    ) {
        self.drawers.insert(key.into(), Arc::new(drawer));
    }

    pub fn clear_dynamic_objects(&mut self) {
        self.images.clear();
        self.texts.clear();
        self.hidden.clear();
        self.drawers.clear();
    }

    pub fn dynamic_image(&self, key: &str) -> Option<&RasterImage> {
        self.images.get(key)
    }

    pub fn dynamic_text(&self, key: &str) -> Option<(&str, &TextStyle)> {
        self.texts.get(key).map(|(t, s)| (t.as_str(), s))
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.get(key).copied().unwrap_or(false)
    }

    pub fn dynamic_drawer(&self, key: &str) -> Option<&DynamicDrawer> {
        self.drawers.get(key)
    }

    /// Whether a drawer or text overlay is registered for `key`.
    pub fn has_dynamic_content(&self, key: &str) -> bool {
        self.drawers.contains_key(key) || self.texts.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
            && self.texts.is_empty()
            && self.hidden.is_empty()
            && self.drawers.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overrides.rs"]
mod tests;
