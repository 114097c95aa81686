use super::*;

#[test]
fn premultiply_then_unpremultiply_is_close_for_opaque_and_clear() {
    let mut px = vec![200u8, 100, 50, 255, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![200, 100, 50, 255, 0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![200, 100, 50, 255, 0, 0, 0, 0]);
}

#[test]
fn unpremultiply_restores_half_alpha_channels() {
    let mut px = vec![64u8, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px[3], 128);
    assert!((i32::from(px[0]) - 128).abs() <= 1);
    assert!((i32::from(px[1]) - 64).abs() <= 1);
}

#[test]
fn over_with_transparent_src_is_identity_and_opaque_src_replaces() {
    let mut dst = vec![10u8, 20, 30, 255, 10, 20, 30, 255];
    let src = vec![0u8, 0, 0, 0, 1, 2, 3, 255];
    premul_over_in_place(&mut dst, &src);
    assert_eq!(dst, vec![10, 20, 30, 255, 1, 2, 3, 255]);
}

#[test]
fn dim_layer_over_opaque_pixel_darkens_it() {
    let mut dst = vec![200u8, 100, 50, 255];
    let dim = Rgba8Premul::from_straight_rgba(0, 0, 0, 0xD0).to_array();
    premul_over_in_place(&mut dst, &dim);
    assert_eq!(dst[3], 255);
    assert_eq!(dst[0], 37);
    assert!(dst[1] < 20 && dst[2] < 10);
}

#[test]
fn knock_out_clears_where_mask_is_opaque_and_keeps_elsewhere() {
    let mut layer = vec![0u8, 0, 0, 208, 0, 0, 0, 208, 0, 0, 0, 208];
    let mask = vec![0u8, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0, 128];
    knock_out_in_place(&mut layer, &mask);
    assert_eq!(layer[3], 0);
    assert_eq!(layer[7], 208);
    assert_eq!(layer[11], 104);
}

#[test]
fn fill_writes_every_pixel() {
    let mut buf = vec![0u8; 12];
    fill_rgba8(&mut buf, Rgba8Premul::from_straight_rgba(1, 2, 3, 255));
    assert_eq!(buf, [1, 2, 3, 255].repeat(3));
}

#[test]
fn diagonal_gradient_runs_bottom_right_to_top_left() {
    let start = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    let end = Rgba8Premul::from_straight_rgba(0, 0, 255, 255);
    let (w, h) = (40u32, 20u32);
    let g = diagonal_gradient_rgba8(start, end, w, h);
    assert_eq!(g.len(), (w * h * 4) as usize);

    let at = |x: u32, y: u32| {
        let i = ((y * w + x) * 4) as usize;
        [g[i], g[i + 1], g[i + 2], g[i + 3]]
    };
    let br = at(w - 1, h - 1);
    let tl = at(0, 0);
    assert!(br[0] > 240 && br[2] < 15);
    assert!(tl[2] > 240 && tl[0] < 15);
    assert!(g.chunks_exact(4).all(|px| px[3] == 255));
}
