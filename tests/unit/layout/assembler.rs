use super::*;
use crate::foundation::core::Rgba8;
use crate::layout::table::LineSpan;

fn style(width: u32) -> Style {
    Style {
        width: f64::from(width) - 80.0,
        spacing: 15.0,
        start_offset: 0.1,
        margin: 40.0,
        ink: Rgba8::rgb(17, 17, 17),
    }
}

fn three_paragraphs() -> LayoutTable {
    let full = LineSpan::new(0.0, 1.0);
    LayoutTable::new(vec![
        vec![LineSpan::new(0.4, 1.0), full, LineSpan::new(0.0, 0.6)],
        vec![LineSpan::new(0.1, 1.0), full],
        vec![LineSpan::new(0.1, 1.0), full, full],
    ])
}

fn paragraph_bounds(a: &Assembled) -> Vec<Rect> {
    a.group
        .children
        .iter()
        .map(|c| c.bounds().unwrap())
        .collect()
}

#[test]
fn stacking_gaps_are_asymmetric() {
    let vp = Viewport::new(600, 800).unwrap();
    let a = assemble(&three_paragraphs(), &style(600), vp).unwrap();
    let b = paragraph_bounds(&a);

    // first paragraph: 3 rows, no header
    assert!((b[0].height() - 30.0).abs() < 1e-9);
    // extra double spacing after the first paragraph
    assert!((b[1].y0 - b[0].y1 - 45.0).abs() < 1e-9);
    // half spacing for every later paragraph
    assert!((b[2].y0 - b[1].y1 - 7.5).abs() < 1e-9);
}

#[test]
fn headers_only_after_first_paragraph() {
    let vp = Viewport::new(600, 800).unwrap();
    let a = assemble(&three_paragraphs(), &style(600), vp).unwrap();
    for (k, child) in a.group.children.iter().enumerate() {
        let Item::Group(p) = child else {
            panic!("paragraph {k} is not a group");
        };
        let rects = p
            .children
            .iter()
            .filter(|c| matches!(c, Item::Rect(_)))
            .count();
        assert_eq!(rects, usize::from(k > 0), "paragraph {k}");
    }
    assert_eq!(a.lines.len(), 8);
}

#[test]
fn bottom_anchored_and_centered_for_any_width() {
    for width in [300u32, 600, 1234] {
        let vp = Viewport::new(width, 900).unwrap();
        let a = assemble(&three_paragraphs(), &style(width), vp).unwrap();
        assert!((a.bounds.y1 - (900.0 - 40.0)).abs() < 1e-9, "width {width}");
        assert!((a.bounds.center().x - f64::from(width) / 2.0).abs() < 1e-9);
        assert_eq!(a.bounds, a.group.bounds().unwrap());
    }
}

#[test]
fn stacking_is_deterministic() {
    let vp = Viewport::new(700, 1000).unwrap();
    let table = LayoutTable::default();
    let a = assemble(&table, &style(700), vp).unwrap();
    let b = assemble(&table, &style(700), vp).unwrap();
    assert_eq!(paragraph_bounds(&a), paragraph_bounds(&b));
    assert_eq!(a.lines, b.lines);
    assert_eq!(a.lines.len(), table.row_count());
}

#[test]
fn line_rows_keep_spacing_after_translation() {
    let vp = Viewport::new(600, 800).unwrap();
    let a = assemble(&three_paragraphs(), &style(600), vp).unwrap();
    let first: Vec<f64> = a.lines[..3].iter().map(|l| l.p0.y).collect();
    assert!((first[1] - first[0] - 15.0).abs() < 1e-9);
    assert!((first[2] - first[1] - 15.0).abs() < 1e-9);
}

#[test]
fn empty_table_is_rejected() {
    let vp = Viewport::new(600, 800).unwrap();
    assert!(assemble(&LayoutTable::new(vec![]), &style(600), vp).is_err());
    assert!(assemble(&LayoutTable::new(vec![vec![]]), &style(600), vp).is_err());
}
