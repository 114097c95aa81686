//! Premultiplied RGBA8 buffer operations used by the compositor.
//!
//! All buffers are row-major and tightly packed. Callers guarantee equal lengths; mismatched
//! buffers are processed up to the shorter one.

use std::sync::Arc;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::{lerp_u8, mul_div255_u8};

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

pub(crate) fn fill_rgba8(buf: &mut [u8], px: Rgba8Premul) {
    let px = px.to_array();
    for d in buf.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

/// Source-over: `dst = src + dst * (1 - src.a)`.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3] as u16;
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        d[3] = s[3].saturating_add(mul_div255_u8(d[3] as u16, inv));
        for c in 0..3 {
            d[c] = s[c].saturating_add(mul_div255_u8(d[c] as u16, inv));
        }
    }
}

/// Destination-out: scale every `layer` pixel by `1 - mask.a`, punching holes where the mask is
/// opaque.
pub(crate) fn knock_out_in_place(layer: &mut [u8], mask: &[u8]) {
    debug_assert_eq!(layer.len(), mask.len());
    for (d, m) in layer.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let keep = 255u16 - m[3] as u16;
        if keep == 255 {
            continue;
        }
        for c in d.iter_mut() {
            *c = mul_div255_u8(*c as u16, keep);
        }
    }
}

/// Linear gradient running from the bottom-right corner (`start`) to the top-left corner
/// (`end`), interpolated in premultiplied space.
pub(crate) fn diagonal_gradient_rgba8(
    start: Rgba8Premul,
    end: Rgba8Premul,
    w: u32,
    h: u32,
) -> Vec<u8> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let (wf, hf) = (w as f32, h as f32);
    let len2 = wf * wf + hf * hf;
    for y in 0..h {
        for x in 0..w {
            // Project the pixel center onto the bottom-right → top-left axis.
            let dx = wf - (x as f32 + 0.5);
            let dy = hf - (y as f32 + 0.5);
            let t = if len2 <= 0.0 {
                0.0
            } else {
                (dx * wf + dy * hf) / len2
            };
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx] = lerp_u8(start.r, end.r, t);
            bytes[idx + 1] = lerp_u8(start.g, end.g, t);
            bytes[idx + 2] = lerp_u8(start.b, end.b, t);
            bytes[idx + 3] = lerp_u8(start.a, end.a, t);
        }
    }
    bytes
}

/// Wrap premultiplied bytes as a `vello_cpu` pixmap. `bytes.len()` must be `w * h * 4`.
pub(crate) fn pixmap_from_premul_bytes(bytes: &[u8], w: u16, h: u16) -> vello_cpu::Pixmap {
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true)
}

pub(crate) fn image_paint_from_premul_bytes(bytes: &[u8], w: u16, h: u16) -> vello_cpu::Image {
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap_from_premul_bytes(bytes, w, h))),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixels.rs"]
mod tests;
