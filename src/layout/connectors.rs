use crate::foundation::core::{Line, Point};
use crate::foundation::geometry::point_at_length;
use crate::foundation::rng::RandomSource;
use crate::scene::composition::Style;
use crate::scene::model::{Group, Item, LineItem};

/// Fewest connectors drawn per composition.
pub const MIN_CONNECTORS: usize = 2;
/// Most connectors drawn per composition.
pub const MAX_CONNECTORS: usize = 11;

const THIN: f64 = 1.0;
const THICK: f64 = 3.0;
const THICK_ABOVE: f64 = 0.75;

/// Draw `MIN_CONNECTORS..=MAX_CONNECTORS` vertical strokes between random pairs of rows.
///
/// Random draws, in order: the count, then per connector the two row picks, the snap index and
/// the thickness roll.
pub fn draw_connectors(lines: &[Line], style: &Style, rng: &mut dyn RandomSource) -> Group {
    let mut group = Group::new("connectors");
    if lines.is_empty() {
        return group;
    }

    let span = (MAX_CONNECTORS - MIN_CONNECTORS + 1) as f64;
    let count = (rng.next_f64() * span).floor() as usize + MIN_CONNECTORS;
    let count = count.min(MAX_CONNECTORS);

    for _ in 0..count {
        if let Some(item) = connector(lines, style, rng) {
            group.push(Item::Line(item));
        }
    }

    tracing::debug!(count = group.children.len(), "drew connectors");
    group
}

fn connector(lines: &[Line], style: &Style, rng: &mut dyn RandomSource) -> Option<LineItem> {
    let a = lines[rng.index(lines.len())?];
    let b = lines[rng.index(lines.len())?];
    // Stable: equal lengths keep pick order.
    let (long, short) = if b.length() > a.length() { (b, a) } else { (a, b) };

    let from = snapped_point(long, style.spacing / 2.0, rng.next_f64());
    let to = Point::new(from.x, short.midpoint().y);

    let width = if rng.next_f64() > THICK_ABOVE {
        THICK
    } else {
        THIN
    };

    Some(LineItem {
        line: Line::new(from, to),
        color: style.ink,
        width,
    })
}

/// Point at `floor(r * divs) / divs` of the way along `line`, with `divs = length / step`.
fn snapped_point(line: Line, step: f64, r: f64) -> Point {
    let len = line.length();
    let divs = len / step;
    if divs <= 0.0 || !divs.is_finite() {
        return line.p0;
    }
    let offset = ((r * divs).floor() / divs) * len;
    point_at_length(line, offset)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/connectors.rs"]
mod tests;
