use crate::model::color::Color;
use crate::model::style::FontBytes;

/// Advance of one character, in ems, when no font is available.
const APPROX_ADVANCE_EM: f32 = 0.55;
/// Line height, in ems, when no font is available.
const APPROX_LINE_HEIGHT_EM: f32 = 1.25;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Color> for TextBrushRgba8 {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for building Parley text layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes`; `None` when the bytes hold no usable family.
    pub(crate) fn new(font_bytes: &[u8]) -> Option<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id)?;
        let family_name = font_ctx.collection.family_name(family_id)?.to_string();
        Some(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape and lay out plain text, wrapping at `max_width_px` when given.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }
        layout
    }
}

/// Wrapped tooltip text, ready to be placed inside a panel.
pub(crate) struct TooltipText {
    /// Width of the text block (the wrap width, whole pixels).
    pub(crate) width: f64,
    /// Height of the wrapped text block.
    pub(crate) height: f64,
    /// Shaped glyphs; `None` when laid out with approximate metrics.
    pub(crate) layout: Option<parley::Layout<TextBrushRgba8>>,
}

/// Measures and wraps tooltip text, shaping real glyphs when a font is configured.
pub(crate) enum Typesetter {
    Shaped {
        engine: Box<TextLayoutEngine>,
        font: vello_cpu::peniko::FontData,
    },
    Approximate,
}

impl Typesetter {
    pub(crate) fn new(font: Option<&FontBytes>) -> Self {
        let Some(font) = font else {
            tracing::debug!("no tooltip font configured, using approximate text metrics");
            return Self::Approximate;
        };
        match TextLayoutEngine::new(font.as_slice()) {
            Some(engine) => Self::Shaped {
                engine: Box::new(engine),
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.as_slice().to_vec()),
                    0,
                ),
            },
            None => {
                tracing::warn!("tooltip font bytes hold no font family, using approximate metrics");
                Self::Approximate
            }
        }
    }

    /// Wrap `text` to `min(single-line width, limit_px)`.
    pub(crate) fn wrap(
        &mut self,
        text: &str,
        size_px: f32,
        color: Color,
        limit_px: f64,
    ) -> TooltipText {
        let limit_px = limit_px.max(0.0);
        match self {
            Self::Shaped { engine, .. } => {
                let brush = TextBrushRgba8::from(color);
                let measured = f64::from(engine.layout_plain(text, size_px, brush, None).width());
                let wrap_width = wrap_limit(measured, limit_px);
                let layout = engine.layout_plain(text, size_px, brush, Some(wrap_width as f32));
                TooltipText {
                    width: wrap_width,
                    height: f64::from(layout.height()),
                    layout: Some(layout),
                }
            }
            Self::Approximate => {
                let advance = f64::from(size_px * APPROX_ADVANCE_EM);
                let measured = text.chars().count() as f64 * advance;
                let wrap_width = wrap_limit(measured, limit_px);
                let max_chars = ((wrap_width / advance + WRAP_EPSILON).floor() as usize).max(1);
                let lines = approx_line_count(text, max_chars);
                TooltipText {
                    width: wrap_width,
                    height: (lines as f64 * f64::from(size_px * APPROX_LINE_HEIGHT_EM)).round(),
                    layout: None,
                }
            }
        }
    }

    pub(crate) fn font(&self) -> Option<&vello_cpu::peniko::FontData> {
        match self {
            Self::Shaped { font, .. } => Some(font),
            Self::Approximate => None,
        }
    }
}

const WRAP_EPSILON: f64 = 1e-6;

/// Text that fits on one line keeps its measured width, rounded up so the line never breaks.
/// Longer text wraps at the whole-pixel limit.
fn wrap_limit(measured: f64, limit_px: f64) -> f64 {
    if measured <= limit_px {
        measured.ceil().min(limit_px)
    } else {
        limit_px.floor()
    }
}

/// Greedy word wrap: number of lines needed at `max_chars` characters per line.
///
/// Words longer than a line are split across lines. Empty text still takes one line.
pub(crate) fn approx_line_count(text: &str, max_chars: usize) -> usize {
    let max_chars = max_chars.max(1);
    let mut lines = 0usize;
    for paragraph in text.split('\n') {
        let mut current = 0usize;
        let mut para_lines = 1usize;
        for word in paragraph.split_whitespace() {
            let len = word.chars().count();
            let needed = if current == 0 { len } else { current + 1 + len };
            if needed <= max_chars {
                current = needed;
                continue;
            }
            if current > 0 {
                para_lines += 1;
            }
            // Overlong words occupy whole lines and leave a remainder.
            para_lines += (len.saturating_sub(1)) / max_chars;
            current = match len % max_chars {
                0 => max_chars,
                r => r,
            };
        }
        lines += para_lines;
    }
    lines.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
