//! Raw SVGA schema messages as they appear on the wire.
//!
//! Every field is optional here. Defaults are applied when converting into the scene model.

use crate::{
    decode::wire::{WireReader, WireValue},
    foundation::error::SvgaResult,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMovie {
    pub version: Option<String>,
    pub params: Option<RawParams>,
    /// Embedded `imageKey -> encoded bytes`, in wire order.
    pub images: Vec<(String, Vec<u8>)>,
    pub sprites: Vec<RawSprite>,
    pub audios: Vec<RawAudio>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawParams {
    pub view_box_width: Option<f32>,
    pub view_box_height: Option<f32>,
    pub fps: Option<i32>,
    pub frames: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSprite {
    pub image_key: Option<String>,
    pub frames: Vec<RawFrame>,
    pub matte_key: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawFrame {
    pub alpha: Option<f32>,
    pub layout: Option<RawLayout>,
    pub transform: Option<RawTransform>,
    pub clip_path: Option<String>,
    pub shapes: Vec<RawShape>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLayout {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTransform {
    pub a: Option<f32>,
    pub b: Option<f32>,
    pub c: Option<f32>,
    pub d: Option<f32>,
    pub tx: Option<f32>,
    pub ty: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawShape {
    /// `SHAPE=0, RECT=1, ELLIPSE=2, KEEP=3`.
    pub kind: Option<i32>,
    pub path: Option<RawPathArgs>,
    pub rect: Option<RawRectArgs>,
    pub ellipse: Option<RawEllipseArgs>,
    pub styles: Option<RawStyle>,
    pub transform: Option<RawTransform>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPathArgs {
    pub d: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRectArgs {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub corner_radius: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawEllipseArgs {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub radius_x: Option<f32>,
    pub radius_y: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawColor {
    pub r: Option<f32>,
    pub g: Option<f32>,
    pub b: Option<f32>,
    pub a: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawStyle {
    pub fill: Option<RawColor>,
    pub stroke: Option<RawColor>,
    pub stroke_width: Option<f32>,
    /// `BUTT=0, ROUND=1, SQUARE=2`.
    pub line_cap: Option<i32>,
    /// `MITER=0, ROUND=1, BEVEL=2`.
    pub line_join: Option<i32>,
    pub miter_limit: Option<f32>,
    pub line_dash_i: Option<f32>,
    pub line_dash_ii: Option<f32>,
    pub line_dash_iii: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawAudio {
    pub audio_key: Option<String>,
    pub start_frame: Option<i32>,
    pub end_frame: Option<i32>,
    pub start_time: Option<i32>,
    pub total_time: Option<i32>,
}

/// A message that can be decoded field by field. Unknown fields are skipped.
pub(crate) trait WireMessage: Default {
    fn merge_field(&mut self, field: u32, value: WireValue<'_>) -> SvgaResult<()>;

    fn decode(buf: &[u8]) -> SvgaResult<Self> {
        let mut out = Self::default();
        let mut r = WireReader::new(buf);
        while let Some((field, value)) = r.next_field()? {
            out.merge_field(field, value)?;
        }
        Ok(out)
    }
}

fn sub<M: WireMessage>(value: WireValue<'_>, name: &str) -> SvgaResult<M> {
    M::decode(value.as_bytes(name)?)
}

impl RawMovie {
    /// Decode an (already inflated) MovieEntity payload.
    pub fn from_bytes(buf: &[u8]) -> SvgaResult<Self> {
        Self::decode(buf)
    }
}

impl WireMessage for RawMovie {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.version = Some(v.as_string("version")?),
            2 => self.params = Some(sub(v, "params")?),
            3 => {
                let entry: RawImageEntry = sub(v, "images")?;
                self.images
                    .push((entry.key.unwrap_or_default(), entry.value.unwrap_or_default()));
            }
            4 => self.sprites.push(sub(v, "sprites")?),
            5 => self.audios.push(sub(v, "audios")?),
            _ => {}
        }
        Ok(())
    }
}

#[derive(Default)]
struct RawImageEntry {
    key: Option<String>,
    value: Option<Vec<u8>>,
}

impl WireMessage for RawImageEntry {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.key = Some(v.as_string("images.key")?),
            2 => self.value = Some(v.as_bytes("images.value")?.to_vec()),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawParams {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.view_box_width = Some(v.as_f32("viewBoxWidth")?),
            2 => self.view_box_height = Some(v.as_f32("viewBoxHeight")?),
            3 => self.fps = Some(v.as_i32("fps")?),
            4 => self.frames = Some(v.as_i32("frames")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawSprite {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.image_key = Some(v.as_string("imageKey")?),
            2 => self.frames.push(sub(v, "frames")?),
            3 => self.matte_key = Some(v.as_string("matteKey")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawFrame {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.alpha = Some(v.as_f32("alpha")?),
            2 => self.layout = Some(sub(v, "layout")?),
            3 => self.transform = Some(sub(v, "transform")?),
            4 => self.clip_path = Some(v.as_string("clipPath")?),
            5 => self.shapes.push(sub(v, "shapes")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawLayout {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.x = Some(v.as_f32("layout.x")?),
            2 => self.y = Some(v.as_f32("layout.y")?),
            3 => self.width = Some(v.as_f32("layout.width")?),
            4 => self.height = Some(v.as_f32("layout.height")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawTransform {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.a = Some(v.as_f32("transform.a")?),
            2 => self.b = Some(v.as_f32("transform.b")?),
            3 => self.c = Some(v.as_f32("transform.c")?),
            4 => self.d = Some(v.as_f32("transform.d")?),
            5 => self.tx = Some(v.as_f32("transform.tx")?),
            6 => self.ty = Some(v.as_f32("transform.ty")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawShape {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.kind = Some(v.as_i32("type")?),
            2 => self.path = Some(sub(v, "shape")?),
            3 => self.rect = Some(sub(v, "rect")?),
            4 => self.ellipse = Some(sub(v, "ellipse")?),
            10 => self.styles = Some(sub(v, "styles")?),
            11 => self.transform = Some(sub(v, "transform")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawPathArgs {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        if field == 1 {
            self.d = Some(v.as_string("shape.d")?);
        }
        Ok(())
    }
}

impl WireMessage for RawRectArgs {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.x = Some(v.as_f32("rect.x")?),
            2 => self.y = Some(v.as_f32("rect.y")?),
            3 => self.width = Some(v.as_f32("rect.width")?),
            4 => self.height = Some(v.as_f32("rect.height")?),
            5 => self.corner_radius = Some(v.as_f32("rect.cornerRadius")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawEllipseArgs {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.x = Some(v.as_f32("ellipse.x")?),
            2 => self.y = Some(v.as_f32("ellipse.y")?),
            3 => self.radius_x = Some(v.as_f32("ellipse.radiusX")?),
            4 => self.radius_y = Some(v.as_f32("ellipse.radiusY")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawColor {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.r = Some(v.as_f32("color.r")?),
            2 => self.g = Some(v.as_f32("color.g")?),
            3 => self.b = Some(v.as_f32("color.b")?),
            4 => self.a = Some(v.as_f32("color.a")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawStyle {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.fill = Some(sub(v, "fill")?),
            2 => self.stroke = Some(sub(v, "stroke")?),
            3 => self.stroke_width = Some(v.as_f32("strokeWidth")?),
            4 => self.line_cap = Some(v.as_i32("lineCap")?),
            5 => self.line_join = Some(v.as_i32("lineJoin")?),
            6 => self.miter_limit = Some(v.as_f32("miterLimit")?),
            7 => self.line_dash_i = Some(v.as_f32("lineDashI")?),
            8 => self.line_dash_ii = Some(v.as_f32("lineDashII")?),
            9 => self.line_dash_iii = Some(v.as_f32("lineDashIII")?),
            _ => {}
        }
        Ok(())
    }
}

impl WireMessage for RawAudio {
    fn merge_field(&mut self, field: u32, v: WireValue<'_>) -> SvgaResult<()> {
        match field {
            1 => self.audio_key = Some(v.as_string("audioKey")?),
            2 => self.start_frame = Some(v.as_i32("startFrame")?),
            3 => self.end_frame = Some(v.as_i32("endFrame")?),
            4 => self.start_time = Some(v.as_i32("startTime")?),
            5 => self.total_time = Some(v.as_i32("totalTime")?),
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/schema.rs"]
mod tests;
