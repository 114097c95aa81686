use kurbo::{BezPath, Circle, PathEl, Point, Rect, RoundedRect, Shape, Stroke, StrokeOpts};

use crate::foundation::core::PixelRect;
use crate::model::step::HighlightShape;

/// Flattening tolerance for curves, in pixels.
const TOLERANCE: f64 = 0.1;

/// Dash pattern for dashed connectors: 10px on, 5px off.
pub(crate) const DASH_PATTERN: [f64; 2] = [10.0, 5.0];

/// Geometry of one spotlight hole. Cutout and border share it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoleOutline {
    Circle { center: Point, radius: f64 },
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f64 },
}

impl HoleOutline {
    /// Outline for `shape` around an already padded rect.
    pub fn new(shape: HighlightShape, expanded: Rect, corner_radius_px: f64) -> Self {
        match shape {
            HighlightShape::Circle => Self::Circle {
                center: expanded.center(),
                radius: expanded.width().max(expanded.height()) / 2.0,
            },
            HighlightShape::Rect => Self::Rect(expanded),
            HighlightShape::RoundedRect => Self::RoundedRect {
                rect: expanded,
                radius: corner_radius_px,
            },
        }
    }

    pub fn to_path(&self) -> BezPath {
        match *self {
            Self::Circle { center, radius } => Circle::new(center, radius).to_path(TOLERANCE),
            Self::Rect(rect) => rect.to_path(TOLERANCE),
            Self::RoundedRect { rect, radius } => {
                RoundedRect::from_rect(rect, radius).to_path(TOLERANCE)
            }
        }
    }
}

/// Grow `rect` outward by `pad` pixels on every side.
pub fn expand(rect: PixelRect, pad: f64) -> Rect {
    rect.to_rect().inflate(pad, pad)
}

/// Fillable outline of a stroke along `path`.
pub(crate) fn stroke_outline(path: &BezPath, width: f64, dashed: bool) -> BezPath {
    let mut style = Stroke::new(width);
    if dashed {
        style = style.with_dashes(0.0, DASH_PATTERN);
    }
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), TOLERANCE)
}

pub(crate) fn line_path(from: Point, to: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(to);
    p
}

pub(crate) fn circle_path(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius).to_path(TOLERANCE)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
