use crate::foundation::core::{Line, Rect};
use crate::layout::table::LineSpan;
use crate::scene::composition::Style;
use crate::scene::model::{Group, Item, LineItem, RectItem};

/// Stroke width of paragraph rows.
pub const PARAGRAPH_STROKE: f64 = 1.25;

/// Header block width as a fraction of the header indent.
const HEADER_WIDTH_RATIO: f64 = 0.9;

/// Render one paragraph in local coordinates (row 0 at `y = 0`, `x = 0` at the left margin).
///
/// Row `i` becomes a segment at `y = i * spacing` spanning `width * start ..= width * end`.
/// When `draw_header` is set, a filled block centered on row 0 is emitted before the rows.
pub fn draw_paragraph(spans: &[LineSpan], draw_header: bool, style: &Style) -> Group {
    let mut group = Group::new("paragraph");

    for (index, span) in spans.iter().enumerate() {
        let y = index as f64 * style.spacing;

        if index == 0 && draw_header {
            let top = y - style.spacing / 2.0;
            group.push(Item::Rect(RectItem {
                rect: Rect::new(
                    0.0,
                    top,
                    style.width * style.start_offset * HEADER_WIDTH_RATIO,
                    top + style.spacing,
                ),
                fill: style.ink,
            }));
        }

        group.push(Item::Line(LineItem {
            line: Line::new((style.width * span.start, y), (style.width * span.end, y)),
            color: style.ink,
            width: PARAGRAPH_STROKE,
        }));
    }

    group
}

#[cfg(test)]
#[path = "../../tests/unit/layout/paragraph.rs"]
mod tests;
