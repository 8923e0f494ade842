use std::str::FromStr;

use crate::foundation::{
    core::{Affine, Size},
    error::SvgaError,
};

/// Policy mapping the document canvas onto the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentScale {
    /// Uniform scale, whole content visible.
    #[default]
    Fit,
    /// Uniform scale, surface fully covered.
    Crop,
    /// Independent X/Y scale, exact fit.
    Fill,
    /// Same as [`ContentScale::Fill`].
    FillBounds,
    /// No scaling, centered.
    None,
    /// `Fit` when the content is larger than the surface, otherwise `None`.
    Inside,
    FillWidth,
    FillHeight,
}

impl ContentScale {
    pub const ALL: [Self; 8] = [
        Self::Fit,
        Self::Crop,
        Self::Fill,
        Self::FillBounds,
        Self::None,
        Self::Inside,
        Self::FillWidth,
        Self::FillHeight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Crop => "crop",
            Self::Fill => "fill",
            Self::FillBounds => "fill-bounds",
            Self::None => "none",
            Self::Inside => "inside",
            Self::FillWidth => "fill-width",
            Self::FillHeight => "fill-height",
        }
    }

    fn factors(self, content: Size, canvas: Size) -> (f64, f64) {
        let sx = canvas.width / content.width;
        let sy = canvas.height / content.height;
        match self {
            Self::Fit => uniform(sx.min(sy)),
            Self::Crop => uniform(sx.max(sy)),
            Self::Fill | Self::FillBounds => (sx, sy),
            Self::None => uniform(1.0),
            Self::Inside => {
                if content.width <= canvas.width && content.height <= canvas.height {
                    uniform(1.0)
                } else {
                    uniform(sx.min(sy))
                }
            }
            Self::FillWidth => uniform(sx),
            Self::FillHeight => uniform(sy),
        }
    }
}

fn uniform(s: f64) -> (f64, f64) {
    (s, s)
}

impl std::fmt::Display for ContentScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentScale {
    type Err = SvgaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| SvgaError::validation(format!("unknown content scale '{s}'")))
    }
}

/// Scale factors and centering offset for one canvas/mode pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleResult {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ScaleResult {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Scale then translate.
    pub fn to_affine(self) -> Affine {
        Affine::new([
            self.scale_x,
            0.0,
            0.0,
            self.scale_y,
            self.offset_x,
            self.offset_y,
        ])
    }
}

/// Map `content` into `canvas` under `mode`. Any non-positive dimension yields identity.
pub fn compute_scale_result(canvas: Size, content: Size, mode: ContentScale) -> ScaleResult {
    if content.width <= 0.0 || content.height <= 0.0 || canvas.width <= 0.0 || canvas.height <= 0.0
    {
        return ScaleResult::IDENTITY;
    }

    let (scale_x, scale_y) = mode.factors(content, canvas);
    ScaleResult {
        scale_x,
        scale_y,
        offset_x: (canvas.width - content.width * scale_x) / 2.0,
        offset_y: (canvas.height - content.height * scale_y) / 2.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scale.rs"]
mod tests;
