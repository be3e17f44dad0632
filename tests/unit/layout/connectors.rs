use super::*;
use crate::foundation::core::Rgba8;
use crate::foundation::rng::{Rng64, ScriptedRandom};

fn style() -> Style {
    Style {
        width: 100.0,
        spacing: 15.0,
        start_offset: 0.1,
        margin: 40.0,
        ink: Rgba8::rgb(17, 17, 17),
    }
}

fn rows() -> Vec<Line> {
    vec![
        Line::new((0.0, 0.0), (100.0, 0.0)),
        Line::new((0.0, 50.0), (40.0, 50.0)),
    ]
}

fn segments(g: &Group) -> Vec<&LineItem> {
    g.children
        .iter()
        .map(|c| match c {
            Item::Line(l) => l,
            other => panic!("unexpected {other:?}"),
        })
        .collect()
}

#[test]
fn scripted_connectors_follow_the_snap_grid() {
    let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.75, 0.5, 0.9, 0.75, 0.0, 0.0, 0.1]);
    let g = draw_connectors(&rows(), &style(), &mut rng);
    assert_eq!(rng.consumed(), 9);

    let segs = segments(&g);
    assert_eq!(segs.len(), 2);

    // long row 0 snapped at 6 of 13.33 divisions, dropped to row 1
    assert!((segs[0].line.p0.x - 45.0).abs() < 1e-9);
    assert_eq!(segs[0].line.p0.y, 0.0);
    assert!((segs[0].line.p1.x - segs[0].line.p0.x).abs() < 1e-12);
    assert_eq!(segs[0].line.p1.y, 50.0);
    assert_eq!(segs[0].width, 3.0);

    // picks swapped by length
    assert_eq!(segs[1].line.p0, Point::new(0.0, 0.0));
    assert_eq!(segs[1].line.p1, Point::new(0.0, 50.0));
    assert_eq!(segs[1].width, 1.0);
}

#[test]
fn identical_picks_degenerate_to_a_point() {
    let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.0, 0.3, 0.0]);
    let g = draw_connectors(&rows(), &style(), &mut rng);
    let segs = segments(&g);
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].length(), 0.0);
}

#[test]
fn zero_length_rows_do_not_divide_by_zero() {
    let dot = vec![Line::new((5.0, 5.0), (5.0, 5.0))];
    let mut rng = ScriptedRandom::new(vec![0.5]);
    let g = draw_connectors(&dot, &style(), &mut rng);
    for seg in segments(&g) {
        assert_eq!(seg.line.p0, Point::new(5.0, 5.0));
        assert_eq!(seg.line.p1, Point::new(5.0, 5.0));
    }
}

#[test]
fn no_rows_no_connectors() {
    let mut rng = ScriptedRandom::new(vec![0.9]);
    let g = draw_connectors(&[], &style(), &mut rng);
    assert!(g.children.is_empty());
    assert_eq!(rng.consumed(), 0);
}

#[test]
fn count_stays_within_bounds_over_many_seeds() {
    let mut seen_min = false;
    let mut seen_max = false;
    for seed in 0..2_000u64 {
        let mut rng = Rng64::new(seed);
        let n = draw_connectors(&rows(), &style(), &mut rng).children.len();
        assert!((MIN_CONNECTORS..=MAX_CONNECTORS).contains(&n), "seed {seed}: {n}");
        seen_min |= n == MIN_CONNECTORS;
        seen_max |= n == MAX_CONNECTORS;
    }
    assert!(seen_min && seen_max);
}

#[test]
fn connectors_are_vertical() {
    let mut rng = Rng64::new(7);
    let g = draw_connectors(&rows(), &style(), &mut rng);
    for seg in segments(&g) {
        assert_eq!(seg.line.p0.x, seg.line.p1.x);
        assert!(seg.width == 1.0 || seg.width == 3.0);
    }
}
