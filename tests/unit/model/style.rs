use super::*;
use serde_json::json;

#[test]
fn defaults_validate() {
    StyleConfig::default().validate().unwrap();
}

#[test]
fn tooltip_color_count_is_bounded() {
    let mut s = StyleConfig {
        tooltip_colors: vec![],
        ..StyleConfig::default()
    };
    assert!(s.validate().is_err());

    s.tooltip_colors = vec![Color::WHITE; 3];
    assert!(s.validate().is_err());

    s.tooltip_colors = vec![Color::WHITE];
    s.validate().unwrap();
}

#[test]
fn negative_lengths_and_zero_text_size_are_rejected() {
    let s = StyleConfig {
        highlight_padding_dp: -1.0,
        ..StyleConfig::default()
    };
    assert!(s.validate().unwrap_err().to_string().contains("highlight_padding_dp"));

    let s = StyleConfig {
        tooltip_text_size_sp: 0.0,
        ..StyleConfig::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn gradient_with_single_color_degrades_to_flat() {
    let s = StyleConfig {
        tooltip_fill: TooltipFill::Gradient,
        tooltip_colors: vec![Color::rgb(1, 2, 3)],
        ..StyleConfig::default()
    };
    assert_eq!(s.tooltip_fill_colors(), (Color::rgb(1, 2, 3), Color::rgb(1, 2, 3)));

    let s = StyleConfig {
        tooltip_fill: TooltipFill::Solid,
        ..StyleConfig::default()
    };
    let (a, b) = s.tooltip_fill_colors();
    assert_eq!(a, b);
}

#[test]
fn partial_json_keeps_defaults() {
    let s: StyleConfig = serde_json::from_value(json!({
        "tooltip_fill": "solid",
        "connector_line_style": "solid",
        "highlight_padding_dp": 12.0
    }))
    .unwrap();
    assert_eq!(s.tooltip_fill, TooltipFill::Solid);
    assert_eq!(s.connector_line_style, LineStyle::Solid);
    assert_eq!(s.highlight_padding_dp, 12.0);
    assert_eq!(s.tooltip_text_size_sp, 14.0);
    assert!(s.tooltip_font.is_none());
}

#[test]
fn button_presets_expose_palettes() {
    let style = StyleConfig::default();
    assert_eq!(ButtonStyle::GradientBlue.colors(&style).len(), 2);
    assert_eq!(ButtonStyle::SolidYellow.colors(&style), vec![Color::rgb(0xF7, 0xB5, 0x00)]);
    assert_eq!(ButtonStyle::Custom.colors(&style), vec![style.tooltip_colors[0]]);
}
