use super::*;
use crate::assets::decode::parse_svg;

const SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

#[test]
fn raster_params_follow_transform_scale() {
    let svg = parse_svg(SQUARE).unwrap();
    let (w, h, adjust) = svg_raster_params(&svg.tree, Affine::scale(2.0)).unwrap();
    assert_eq!((w, h), (20, 20));
    let corner = adjust * kurbo::Point::new(20.0, 20.0);
    assert!((corner.x - 20.0).abs() < 1e-9);
    assert!((corner.y - 20.0).abs() < 1e-9);
}

#[test]
fn raster_params_reject_huge_outputs() {
    let svg = parse_svg(SQUARE).unwrap();
    assert!(svg_raster_params(&svg.tree, Affine::scale(5_000.0)).is_err());
}

#[test]
fn rasterize_fills_square() {
    let svg = parse_svg(SQUARE).unwrap();
    let bytes = rasterize_svg_to_premul_rgba8(&svg.tree, 10, 10).unwrap();
    assert_eq!(bytes.len(), 10 * 10 * 4);
    let center = (5 * 10 + 5) * 4;
    assert_eq!(&bytes[center..center + 4], &[255, 0, 0, 255]);
}

#[test]
fn tint_keeps_coverage() {
    let mut px = vec![255, 0, 0, 255, 0, 0, 0, 0, 64, 0, 0, 128];
    tint_premul_rgba8_in_place(&mut px, Rgba8::rgb(17, 17, 17));
    assert_eq!(&px[0..4], &[17, 17, 17, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(px[11], 128);
    assert_eq!(px[8], 9);
}
