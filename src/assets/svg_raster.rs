use crate::foundation::core::{Affine, Rgba8};
use crate::foundation::error::{ConcertoError, ConcertoResult};

/// Upper bound for either side of an icon raster.
const MAX_DIM: u32 = 16_384;

/// Compute a raster size for an SVG given the draw transform.
///
/// The returned `(width, height, transform_adjust)` are used as:
///
/// - rasterize the SVG into a pixmap of `(width, height)`
/// - draw the resulting image with `transform_adjust` (not the caller's transform)
pub(crate) fn svg_raster_params(
    tree: &usvg::Tree,
    transform: Affine,
) -> ConcertoResult<(u32, u32, Affine)> {
    fn to_px(v: f32) -> ConcertoResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ConcertoError::render("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let base_w = to_px(size.width())?;
    let base_h = to_px(size.height())?;

    let [a, b, c, d, _e, _f] = transform.as_coeffs();
    let sx = (a * a + b * b).sqrt().max(1e-6);
    let sy = (c * c + d * d).sqrt().max(1e-6);

    let w = ((base_w as f64) * sx).ceil().max(1.0) as u32;
    let h = ((base_h as f64) * sy).ceil().max(1.0) as u32;

    if w > MAX_DIM || h > MAX_DIM {
        return Err(ConcertoError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    // Pixmap pixels map back to SVG user space before the caller's transform.
    let inv = Affine::scale_non_uniform(
        f64::from(size.width()) / f64::from(w),
        f64::from(size.height()) / f64::from(h),
    );
    Ok((w, h, transform * inv))
}

/// Rasterize `tree` into a `width × height` premultiplied RGBA8 buffer.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> ConcertoResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ConcertoError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Replace every pixel's color with `fill`, keeping coverage.
///
/// Equivalent to assigning one fill color to every shape of the icon.
pub(crate) fn tint_premul_rgba8_in_place(rgba8_premul: &mut [u8], fill: Rgba8) {
    for px in rgba8_premul.chunks_exact_mut(4) {
        let coverage = u16::from(px[3]);
        let a = ((coverage * u16::from(fill.a)) + 127) / 255;
        let premul = |c: u8| (((u16::from(c) * a) + 127) / 255) as u8;
        px[0] = premul(fill.r);
        px[1] = premul(fill.g);
        px[2] = premul(fill.b);
        px[3] = a as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
