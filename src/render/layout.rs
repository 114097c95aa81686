//! Tooltip panel placement.
//!
//! Panels stack top-to-bottom in step order starting at a fixed offset, each centered
//! horizontally on the canvas. Every length here is already in whole pixels.

use kurbo::{Point, Rect};

use crate::foundation::core::Density;
use crate::model::style::StyleConfig;
use crate::render::text::{TooltipText, Typesetter};
use crate::resolve::resolver::TargetInfo;

/// Vertical offset of the first tooltip panel.
pub const TOOLTIP_START_DP: f32 = 100.0;
/// Gap between consecutive tooltip panels.
pub const TOOLTIP_SPACING_DP: f32 = 16.0;
/// Tooltip width limit for steps without their own.
pub const DEFAULT_MAX_WIDTH_DP: f32 = 250.0;

/// Style lengths converted to pixels once per render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StylePx {
    pub(crate) border_width: f64,
    pub(crate) corner_radius: f64,
    pub(crate) padding: f64,
    pub(crate) text_size: f64,
    pub(crate) panel_radius: f64,
    pub(crate) pad_h: f64,
    pub(crate) pad_v: f64,
    pub(crate) line_width: f64,
    pub(crate) cap_radius: f64,
    pub(crate) start: f64,
    pub(crate) spacing: f64,
}

impl StylePx {
    pub(crate) fn new(style: &StyleConfig, density: Density) -> Self {
        Self {
            border_width: density.px(style.highlight_border_width_dp),
            corner_radius: density.px(style.highlight_corner_radius_dp),
            padding: density.px(style.highlight_padding_dp),
            text_size: density.px(style.tooltip_text_size_sp),
            panel_radius: density.px(style.tooltip_corner_radius_dp),
            pad_h: density.px(style.tooltip_padding_horizontal_dp),
            pad_v: density.px(style.tooltip_padding_vertical_dp),
            line_width: density.px(style.connector_line_width_dp),
            cap_radius: density.px(style.connector_cap_radius_dp),
            start: density.px(TOOLTIP_START_DP),
            spacing: density.px(TOOLTIP_SPACING_DP),
        }
    }
}

/// One placed tooltip.
pub(crate) struct TooltipPlacement {
    pub(crate) panel: Rect,
    /// Top-left corner of the text block.
    pub(crate) text_origin: Point,
    pub(crate) text: TooltipText,
}

/// Top edge of each panel: `start`, then advancing by height plus `spacing`.
pub fn stack_panels(start: f64, spacing: f64, heights: &[f64]) -> Vec<f64> {
    let mut cursor = start;
    heights
        .iter()
        .map(|h| {
            let top = cursor;
            cursor += h + spacing;
            top
        })
        .collect()
}

/// Panel of size `w`×`h` at `top`, horizontally centered on a canvas `canvas_w` wide.
pub fn centered_panel(canvas_w: f64, top: f64, w: f64, h: f64) -> Rect {
    let left = ((canvas_w - w) / 2.0).floor();
    Rect::new(left, top, left + w, top + h)
}

/// Connector from the panel's bottom-center to the highlighted rect's top-center.
pub fn connector_endpoints(panel: Rect, highlight: Rect) -> (Point, Point) {
    (
        Point::new(panel.center().x, panel.y1),
        Point::new(highlight.center().x, highlight.y0),
    )
}

/// Wrap every target's text and place its panel, in target order.
pub(crate) fn place_tooltips(
    targets: &[TargetInfo],
    style: &StyleConfig,
    px: &StylePx,
    density: Density,
    typesetter: &mut Typesetter,
    canvas_w: f64,
) -> Vec<TooltipPlacement> {
    let texts: Vec<TooltipText> = targets
        .iter()
        .map(|t| {
            let max_width = density.px(t.max_width_dp.unwrap_or(DEFAULT_MAX_WIDTH_DP));
            typesetter.wrap(
                &t.text,
                px.text_size as f32,
                style.tooltip_text_color,
                max_width - 2.0 * px.pad_h,
            )
        })
        .collect();

    let heights: Vec<f64> = texts.iter().map(|t| t.height + 2.0 * px.pad_v).collect();
    let tops = stack_panels(px.start, px.spacing, &heights);

    texts
        .into_iter()
        .zip(tops)
        .zip(heights)
        .map(|((text, top), h)| {
            let panel = centered_panel(canvas_w, top, text.width + 2.0 * px.pad_h, h);
            TooltipPlacement {
                text_origin: Point::new(panel.x0 + px.pad_h, panel.y0 + px.pad_v),
                panel,
                text,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
