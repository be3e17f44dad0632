//! Icon placement: center each imported icon on a random point of a random paragraph row.

use std::sync::Arc;

use crate::assets::decode::parse_svg;
use crate::assets::source::AssetSource;
use crate::assets::store::PreparedSvg;
use crate::foundation::core::{Line, Point, Rect, Rgba8};
use crate::foundation::error::ConcertoResult;
use crate::foundation::geometry::point_at_length;
use crate::foundation::rng::RandomSource;
use crate::scene::model::IconItem;

/// Read and parse one icon.
pub fn load_icon(assets: &dyn AssetSource, rel_path: &str) -> ConcertoResult<PreparedSvg> {
    let bytes = assets.read_bytes(rel_path)?;
    parse_svg(&bytes)
}

/// Random point along a random line: one draw for the line, one for the offset.
pub fn random_point_on_lines(lines: &[Line], rng: &mut dyn RandomSource) -> Option<Point> {
    let line = lines[rng.index(lines.len())?];
    let offset = rng.next_f64() * line.length();
    Some(point_at_length(line, offset))
}

/// Center `svg` at a random point of `lines`. `None` when there are no lines.
pub fn place_icon(
    name: &str,
    svg: Arc<PreparedSvg>,
    lines: &[Line],
    fill: Rgba8,
    rng: &mut dyn RandomSource,
) -> Option<IconItem> {
    let center = random_point_on_lines(lines, rng)?;
    let (w, h) = svg.size();
    let bounds = Rect::from_center_size(center, (w, h));
    tracing::debug!(icon = name, ?center, "placed icon");
    Some(IconItem {
        name: name.to_owned(),
        svg,
        bounds,
        fill,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/icons.rs"]
mod tests;
