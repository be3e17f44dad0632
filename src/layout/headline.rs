use crate::foundation::core::{Point, Rect, Vec2};
use crate::scene::composition::{HeadlineDef, Style};
use crate::scene::model::{Group, Item, RectItem, TextItem};

const TITLE_HEIGHT: f64 = 50.0;
const TITLE_WIDTH_RATIO: f64 = 0.4 * 0.95;
const SUBTITLE_WIDTH_RATIO: f64 = 0.2;
const SUBTITLE_CENTER_X_RATIO: f64 = 0.4;
const SUBTITLE_DROP: f64 = 2.8;
const TITLE_LABEL_DROP: f64 = 15.0;
const TEMPO_DROP: f64 = 4.0;

/// Title bar, subtitle bar and the two labels, all placed against the paragraph bounds.
///
/// Children order: title bar, subtitle bar, title label, tempo label.
pub fn draw_headlines(bounds: Rect, headline: &HeadlineDef, style: &Style) -> Group {
    let mut group = Group::new("headlines");
    let top_left = Point::new(bounds.x0, bounds.y0);

    let title = Rect::new(
        top_left.x,
        top_left.y - TITLE_HEIGHT,
        top_left.x + bounds.width() * TITLE_WIDTH_RATIO,
        top_left.y,
    );

    // The subtitle center x is a fraction of the width, in viewport coordinates.
    let sub_w = bounds.width() * SUBTITLE_WIDTH_RATIO;
    let sub_h = style.spacing * 2.0;
    let sub_center_x = bounds.width() * SUBTITLE_CENTER_X_RATIO;
    let sub_top = top_left.y + style.spacing * SUBTITLE_DROP;
    let subtitle = Rect::new(
        sub_center_x - sub_w / 2.0,
        sub_top,
        sub_center_x + sub_w / 2.0,
        sub_top + sub_h,
    );

    group.push(Item::Rect(RectItem {
        rect: title,
        fill: style.ink,
    }));
    group.push(Item::Rect(RectItem {
        rect: subtitle,
        fill: style.ink,
    }));

    let title_anchor =
        Point::new(title.x1, title.y0) + Vec2::new(style.spacing, TITLE_LABEL_DROP);
    group.push(Item::Text(TextItem {
        anchor: title_anchor,
        content: headline.title.clone(),
        font_size: headline.font_size,
        fill: style.ink,
    }));
    group.push(Item::Text(TextItem {
        anchor: top_left + Vec2::new(0.0, style.spacing * TEMPO_DROP),
        content: headline.tempo.clone(),
        font_size: headline.font_size,
        fill: style.ink,
    }));

    group
}

#[cfg(test)]
#[path = "../../tests/unit/layout/headline.rs"]
mod tests;
