use std::sync::Arc;

use crate::foundation::error::{SpotlightError, SpotlightResult};
use crate::model::color::Color;
use serde::{Deserialize, Serialize};

/// Tooltip panel fill mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipFill {
    /// Flat fill with the first tooltip color.
    Solid,
    /// Corner-to-corner gradient (bottom-right → top-left) between the two tooltip colors.
    #[default]
    Gradient,
}

/// Connector line stroke style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    #[default]
    Dashed,
}

/// Preset backgrounds for the dismiss button drawn by the presentation sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    SolidBlue,
    #[default]
    GradientBlue,
    SolidYellow,
    GradientYellow,
    /// Solid fill with the first tooltip color.
    Custom,
}

impl ButtonStyle {
    /// Background colors for this preset; gradients run bottom-right → top-left.
    pub fn colors(self, style: &StyleConfig) -> Vec<Color> {
        const BLUE: Color = Color::rgb(0x2B, 0x44, 0xB1);
        const BLUE_LIGHT: Color = Color::rgb(0x01, 0x5B, 0xE2);
        const YELLOW: Color = Color::rgb(0xF7, 0xB5, 0x00);
        const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);

        match self {
            Self::SolidBlue => vec![BLUE],
            Self::GradientBlue => vec![BLUE, BLUE_LIGHT],
            Self::SolidYellow => vec![YELLOW],
            Self::GradientYellow => vec![YELLOW, GOLD],
            Self::Custom => vec![
                style
                    .tooltip_colors
                    .first()
                    .copied()
                    .unwrap_or(Color::rgb(0, 0, 255)),
            ],
        }
    }
}

/// Dismiss button shown next to the overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissButton {
    pub text: String,
    pub style: ButtonStyle,
}

impl Default for DismissButton {
    fn default() -> Self {
        Self {
            text: "知道了".to_owned(),
            style: ButtonStyle::GradientBlue,
        }
    }
}

/// Raw font file bytes used to shape and draw tooltip text.
#[derive(Clone, PartialEq, Eq)]
pub struct FontBytes(Arc<Vec<u8>>);

impl FontBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl std::fmt::Debug for FontBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FontBytes").field(&self.0.len()).finish()
    }
}

/// Fixed visual style of the overlay. Lengths are in dp (text size in sp).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub highlight_border_color: Color,
    pub highlight_border_width_dp: f32,
    pub highlight_corner_radius_dp: f32,
    pub highlight_padding_dp: f32,

    pub tooltip_fill: TooltipFill,
    /// One or two colors; gradient fills fall back to the first color when only one is given.
    pub tooltip_colors: Vec<Color>,
    pub tooltip_text_color: Color,
    pub tooltip_text_size_sp: f32,
    pub tooltip_corner_radius_dp: f32,
    pub tooltip_padding_horizontal_dp: f32,
    pub tooltip_padding_vertical_dp: f32,

    pub connector_line_color: Color,
    pub connector_line_style: LineStyle,
    pub connector_line_width_dp: f32,
    pub connector_cap_radius_dp: f32,

    pub dismiss_button: DismissButton,

    /// Font used for tooltip text. Without one, text is measured with approximate metrics and
    /// not drawn.
    #[serde(skip)]
    pub tooltip_font: Option<FontBytes>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let blue = Color::rgb(0x2B, 0x44, 0xB1);
        Self {
            highlight_border_color: blue,
            highlight_border_width_dp: 2.0,
            highlight_corner_radius_dp: 4.0,
            highlight_padding_dp: 8.0,
            tooltip_fill: TooltipFill::Gradient,
            tooltip_colors: vec![blue, Color::rgb(0x01, 0x5B, 0xE2)],
            tooltip_text_color: Color::WHITE,
            tooltip_text_size_sp: 14.0,
            tooltip_corner_radius_dp: 100.0,
            tooltip_padding_horizontal_dp: 16.0,
            tooltip_padding_vertical_dp: 8.0,
            connector_line_color: blue,
            connector_line_style: LineStyle::Dashed,
            connector_line_width_dp: 2.0,
            connector_cap_radius_dp: 4.0,
            dismiss_button: DismissButton::default(),
            tooltip_font: None,
        }
    }
}

impl StyleConfig {
    /// Return a copy that shapes tooltip text with `font`.
    pub fn with_font(mut self, font: FontBytes) -> Self {
        self.tooltip_font = Some(font);
        self
    }

    /// Validate value ranges.
    pub fn validate(&self) -> SpotlightResult<()> {
        if self.tooltip_colors.is_empty() || self.tooltip_colors.len() > 2 {
            return Err(SpotlightError::validation(format!(
                "tooltip_colors must hold 1 or 2 colors (got {})",
                self.tooltip_colors.len()
            )));
        }
        let lengths = [
            ("highlight_border_width_dp", self.highlight_border_width_dp),
            ("highlight_corner_radius_dp", self.highlight_corner_radius_dp),
            ("highlight_padding_dp", self.highlight_padding_dp),
            ("tooltip_corner_radius_dp", self.tooltip_corner_radius_dp),
            (
                "tooltip_padding_horizontal_dp",
                self.tooltip_padding_horizontal_dp,
            ),
            (
                "tooltip_padding_vertical_dp",
                self.tooltip_padding_vertical_dp,
            ),
            ("connector_line_width_dp", self.connector_line_width_dp),
            ("connector_cap_radius_dp", self.connector_cap_radius_dp),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(SpotlightError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.tooltip_text_size_sp.is_finite() || self.tooltip_text_size_sp <= 0.0 {
            return Err(SpotlightError::validation(
                "tooltip_text_size_sp must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Start/end colors of the tooltip fill (equal for solid fills).
    pub(crate) fn tooltip_fill_colors(&self) -> (Color, Color) {
        let first = self
            .tooltip_colors
            .first()
            .copied()
            .unwrap_or(Color::rgb(0x2B, 0x44, 0xB1));
        match self.tooltip_fill {
            TooltipFill::Solid => (first, first),
            TooltipFill::Gradient => (
                first,
                self.tooltip_colors.get(1).copied().unwrap_or(first),
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/style.rs"]
mod tests;
