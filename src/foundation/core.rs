pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Straight-alpha colour with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Build a colour, clamping every channel into `[0, 1]`. NaN becomes 0.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Build an affine from SVGA-ordered components `(a, b, c, d, tx, ty)`.
///
/// Maps `(x, y)` to `(a*x + c*y + tx, b*x + d*y + ty)`.
pub fn affine_from_parts(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Affine {
    Affine::new([a, b, c, d, tx, ty])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
