use crate::foundation::error::{SpotlightError, SpotlightResult};

pub use kurbo::{Point, Rect};

/// Axis-aligned integer rectangle in root (screen) coordinates.
///
/// `right`/`bottom` are exclusive, matching how hosts report view bounds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl PixelRect {
    /// Construct from edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width in pixels (0 for inverted rects).
    pub fn width(self) -> u32 {
        self.right.saturating_sub(self.left).max(0) as u32
    }

    /// Height in pixels (0 for inverted rects).
    pub fn height(self) -> u32 {
        self.bottom.saturating_sub(self.top).max(0) as u32
    }

    /// Return `true` when the rect covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Convert to a floating-point rect for geometry work.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self::default()
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Byte array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Display density used to turn dp/sp style values into device pixels.
///
/// Every conversion goes through [`Density::px`], which rounds half away from zero to a whole
/// pixel. Rendering converts each style value exactly once.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Density(f32);

impl Density {
    /// 1 dp == 1 px.
    pub const IDENTITY: Self = Self(1.0);

    /// Create a validated density scale (finite and > 0).
    pub fn new(scale: f32) -> SpotlightResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SpotlightError::validation(
                "density scale must be finite and > 0",
            ));
        }
        Ok(Self(scale))
    }

    /// Raw scale factor.
    pub fn scale(self) -> f32 {
        self.0
    }

    /// Convert a dp (or sp) value into whole device pixels.
    pub fn px(self, dp: f32) -> f64 {
        (f64::from(dp) * f64::from(self.0)).round()
    }
}

impl TryFrom<f32> for Density {
    type Error = SpotlightError;

    fn try_from(scale: f32) -> SpotlightResult<Self> {
        Self::new(scale)
    }
}

impl From<Density> for f32 {
    fn from(density: Density) -> Self {
        density.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
