//! Painting overlay: fit a raster into the paragraph bounds and drop dots colored by the
//! painting wherever the vertical probe grid crosses a paragraph row.

use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::assets::source::AssetSource;
use crate::assets::store::PreparedImage;
use crate::foundation::core::{Affine, Line, Point, Rect};
use crate::foundation::error::ConcertoResult;
use crate::foundation::geometry::segment_intersection;
use crate::foundation::rng::RandomSource;
use crate::scene::model::{DotItem, Group, Item, RasterItem};

/// Number of vertical probes, regardless of composition size.
pub const PROBE_COUNT: usize = 61;
/// Radius of every sampled dot.
pub const DOT_RADIUS: f64 = 5.0;
/// Fraction of the bounds the painting may occupy on each axis.
pub const FIT_RATIO: f64 = 0.9;

/// Read and decode the painting.
pub fn load_painting(assets: &dyn AssetSource, rel_path: &str) -> ConcertoResult<PreparedImage> {
    let bytes = assets.read_bytes(rel_path)?;
    decode_image(&bytes)
}

/// Uniform scale fitting a `width × height` image inside `FIT_RATIO` of `bounds`.
pub fn fit_scale(bounds: Rect, width: u32, height: u32) -> f64 {
    let sx = bounds.width() / f64::from(width) * FIT_RATIO;
    let sy = bounds.height() / f64::from(height) * FIT_RATIO;
    sx.min(sy)
}

/// Scale the image to fit and put its bottom-right corner on the bounds' bottom-right corner.
pub fn place_painting(image: Arc<PreparedImage>, bounds: Rect, visible: bool) -> RasterItem {
    let scale = fit_scale(bounds, image.width, image.height);
    let w = f64::from(image.width) * scale;
    let h = f64::from(image.height) * scale;
    let placement = Affine::translate((bounds.x1 - w, bounds.y1 - h)) * Affine::scale(scale);
    RasterItem {
        image,
        placement,
        visible,
    }
}

/// Vertical probes `x = bounds.x1 - spacing * i`, spanning the full bounds height.
pub fn probe_lines(bounds: Rect, spacing: f64) -> Vec<Line> {
    (0..PROBE_COUNT)
        .map(|i| {
            let x = bounds.x1 - spacing * i as f64;
            Line::new((x, bounds.y0), (x, bounds.y0 + bounds.height()))
        })
        .collect()
}

/// Every probe/row crossing, probe-major.
pub fn intersections(probes: &[Line], rows: &[Line]) -> Vec<Point> {
    probes
        .iter()
        .flat_map(|probe| {
            rows.iter()
                .filter_map(move |row| segment_intersection(*probe, *row))
        })
        .collect()
}

/// Visibility roll for one dot: hidden when the first draw beats `0.1 + 0.1 * second`.
pub fn dot_hidden(rng: &mut dyn RandomSource) -> bool {
    let first = rng.next_f64();
    let second = rng.next_f64();
    first > second * 0.1 + 0.1
}

/// Build the overlay group: the placed raster followed by one dot per crossing.
pub fn draw_painting(
    image: Arc<PreparedImage>,
    bounds: Rect,
    rows: &[Line],
    spacing: f64,
    visible: bool,
    rng: &mut dyn RandomSource,
) -> Group {
    let raster = place_painting(image, bounds, visible);
    let probes = probe_lines(bounds, spacing);
    let points = intersections(&probes, rows);

    let mut group = Group::new("painting");
    let mut dots = Vec::with_capacity(points.len());
    let mut shown = 0usize;
    for center in points {
        let fill = raster.sample(center);
        let visible = !dot_hidden(rng);
        shown += usize::from(visible);
        dots.push(Item::Dot(DotItem {
            center,
            radius: DOT_RADIUS,
            fill,
            visible,
        }));
    }

    tracing::debug!(dots = dots.len(), shown, "sampled painting dots");
    group.push(Item::Raster(raster));
    group.children.extend(dots);
    group
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/painting.rs"]
mod tests;
