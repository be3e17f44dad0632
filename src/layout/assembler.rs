use crate::foundation::core::{Line, Point, Rect, Viewport};
use crate::foundation::error::{ConcertoError, ConcertoResult};
use crate::layout::paragraph::draw_paragraph;
use crate::layout::table::LayoutTable;
use crate::scene::composition::Style;
use crate::scene::model::{Group, Item};

/// Stacked paragraphs plus the frame every later step is placed against.
#[derive(Clone, Debug)]
pub struct Assembled {
    /// One child group per paragraph, in table order.
    pub group: Group,
    /// Geometric bounds of `group`.
    pub bounds: Rect,
    /// Every paragraph row, in paragraph then row order.
    pub lines: Vec<Line>,
}

/// Render every paragraph, stack them, and anchor the stack in the viewport.
///
/// Paragraph `k > 0` gets a header block. Stacking places paragraph 0's center at `y = margin`
/// and every later paragraph's top at `prev.bottom + spacing + gap`, where the gap is
/// `2 * spacing` after the first paragraph and `-spacing / 2` after the rest. The stack is
/// then centered horizontally with its bottom edge `margin` above the viewport bottom.
#[tracing::instrument(skip(table, style), fields(paragraphs = table.len()))]
pub fn assemble(
    table: &LayoutTable,
    style: &Style,
    viewport: Viewport,
) -> ConcertoResult<Assembled> {
    let mut paragraphs: Vec<Group> = Vec::with_capacity(table.len());
    let mut prev_bottom: Option<f64> = None;

    for (index, spans) in table.paragraphs().iter().enumerate() {
        let mut paragraph = draw_paragraph(spans, index > 0, style);
        paragraph.name = format!("paragraph-{index}");

        if let Some(b) = paragraph.bounds() {
            let center_y = match prev_bottom {
                Some(bottom) if index > 0 => {
                    let gap = if index == 1 {
                        style.spacing * 2.0
                    } else {
                        -style.spacing / 2.0
                    };
                    bottom + b.height() / 2.0 + style.spacing + gap
                }
                _ => style.margin,
            };
            paragraph.set_center_y(center_y);
            prev_bottom = paragraph.bounds().map(|b| b.y1);
        }

        paragraphs.push(paragraph);
    }

    let mut group = Group::new("paragraphs");
    group.children = paragraphs.into_iter().map(Item::Group).collect();

    let stacked = group
        .bounds()
        .ok_or_else(|| ConcertoError::validation("layout table has no rows"))?;
    let vp = viewport.rect();
    group.set_center(Point::new(
        vp.center().x,
        vp.y1 - stacked.height() / 2.0 - style.margin,
    ));

    let bounds = group
        .bounds()
        .ok_or_else(|| ConcertoError::validation("layout table has no rows"))?;
    let lines = paragraph_lines(&group);
    tracing::debug!(lines = lines.len(), ?bounds, "assembled paragraphs");

    Ok(Assembled {
        group,
        bounds,
        lines,
    })
}

/// Two-endpoint segments of a paragraph stack, headers excluded.
pub fn paragraph_lines(group: &Group) -> Vec<Line> {
    group
        .leaves()
        .into_iter()
        .filter_map(|item| match item {
            Item::Line(l) => Some(l.line),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/assembler.rs"]
mod tests;
