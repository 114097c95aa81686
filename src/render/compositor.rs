use kurbo::{Rect, RoundedRect, Shape};

use crate::foundation::core::Density;
use crate::model::color::Color;
use crate::model::style::{LineStyle, StyleConfig, TooltipFill};
use crate::render::frame::{OverlayImage, Snapshot};
use crate::render::layout::{StylePx, TooltipPlacement, connector_endpoints, place_tooltips};
use crate::render::pixels::{
    diagonal_gradient_rgba8, fill_rgba8, image_paint_from_premul_bytes, knock_out_in_place,
    premul_over_in_place, premultiply_rgba8_in_place,
};
use crate::render::shapes::{
    HoleOutline, bezpath_to_cpu, circle_path, expand, line_path, stroke_outline,
};
use crate::render::text::Typesetter;
use crate::resolve::resolver::TargetInfo;

/// Render the spotlight overlay for `targets` on top of `snapshot`.
///
/// The snapshot is consumed; its buffer becomes the output canvas. Output has the snapshot's
/// dimensions and is premultiplied RGBA8.
#[tracing::instrument(
    skip_all,
    fields(width = snapshot.width(), height = snapshot.height(), targets = targets.len())
)]
pub fn render_overlay(
    snapshot: Snapshot,
    targets: &[TargetInfo],
    overlay_color: Color,
    style: &StyleConfig,
    density: Density,
) -> OverlayImage {
    let (width, height) = (snapshot.width(), snapshot.height());
    // Snapshot construction bounds both sides by u16::MAX.
    let (w16, h16) = (width as u16, height as u16);
    let px = StylePx::new(style, density);

    let mut canvas = snapshot.into_bytes();
    premultiply_rgba8_in_place(&mut canvas);

    let holes: Vec<(HoleOutline, Rect)> = targets
        .iter()
        .map(|t| {
            let expanded = expand(t.rect, px.padding);
            (HoleOutline::new(t.shape, expanded, px.corner_radius), expanded)
        })
        .collect();

    let mut dim = vec![0u8; canvas.len()];
    fill_rgba8(&mut dim, overlay_color.to_premul());
    if !holes.is_empty() {
        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_paint(Color::WHITE.to_cpu());
        for (hole, _) in &holes {
            ctx.fill_path(&bezpath_to_cpu(&hole.to_path()));
        }
        let mask = rasterize(&mut ctx, w16, h16);
        knock_out_in_place(&mut dim, mask.data_as_u8_slice());
    }
    premul_over_in_place(&mut canvas, &dim);
    drop(dim);

    let mut typesetter = Typesetter::new(style.tooltip_font.as_ref());
    let placements = place_tooltips(
        targets,
        style,
        &px,
        density,
        &mut typesetter,
        f64::from(width),
    );

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_paint(style.highlight_border_color.to_cpu());
    for (hole, _) in &holes {
        let ring = stroke_outline(&hole.to_path(), px.border_width, false);
        ctx.fill_path(&bezpath_to_cpu(&ring));
    }

    for placement in &placements {
        draw_panel(&mut ctx, placement, style, &px);
        draw_text(&mut ctx, placement, &typesetter);
    }

    let dashed = style.connector_line_style == LineStyle::Dashed;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(style.connector_line_color.to_cpu());
    for (placement, (_, expanded)) in placements.iter().zip(&holes) {
        let (from, to) = connector_endpoints(placement.panel, *expanded);
        let line = stroke_outline(&line_path(from, to), px.line_width, dashed);
        ctx.fill_path(&bezpath_to_cpu(&line));
        ctx.fill_path(&bezpath_to_cpu(&circle_path(from, px.cap_radius)));
        ctx.fill_path(&bezpath_to_cpu(&circle_path(to, px.cap_radius)));
    }

    let decorations = rasterize(&mut ctx, w16, h16);
    premul_over_in_place(&mut canvas, decorations.data_as_u8_slice());

    OverlayImage {
        width,
        height,
        data: canvas,
        premultiplied: true,
    }
}

fn rasterize(ctx: &mut vello_cpu::RenderContext, w: u16, h: u16) -> vello_cpu::Pixmap {
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn paint_extent(v: f64) -> u16 {
    v.ceil().clamp(1.0, f64::from(u16::MAX)) as u16
}

fn draw_panel(
    ctx: &mut vello_cpu::RenderContext,
    placement: &TooltipPlacement,
    style: &StyleConfig,
    px: &StylePx,
) {
    let panel = placement.panel;
    let local = RoundedRect::from_rect(
        Rect::new(0.0, 0.0, panel.width(), panel.height()),
        px.panel_radius,
    );
    let (start, end) = style.tooltip_fill_colors();

    ctx.set_transform(vello_cpu::kurbo::Affine::translate((panel.x0, panel.y0)));
    match style.tooltip_fill {
        TooltipFill::Solid => ctx.set_paint(start.to_cpu()),
        TooltipFill::Gradient => {
            let (w, h) = (paint_extent(panel.width()), paint_extent(panel.height()));
            let bytes = diagonal_gradient_rgba8(
                start.to_premul(),
                end.to_premul(),
                u32::from(w),
                u32::from(h),
            );
            ctx.set_paint(image_paint_from_premul_bytes(&bytes, w, h));
        }
    }
    ctx.fill_path(&bezpath_to_cpu(&local.to_path(0.1)));
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    placement: &TooltipPlacement,
    typesetter: &Typesetter,
) {
    let (Some(layout), Some(font)) = (placement.text.layout.as_ref(), typesetter.font()) else {
        return;
    };
    let origin = placement.text_origin;
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
