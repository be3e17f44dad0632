use super::*;

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line {
    Line::new((x0, y0), (x1, y1))
}

#[test]
fn crossing_segments_meet() {
    let p = segment_intersection(line(5.0, 0.0, 5.0, 10.0), line(0.0, 4.0, 10.0, 4.0)).unwrap();
    assert!((p.x - 5.0).abs() < 1e-9);
    assert!((p.y - 4.0).abs() < 1e-9);
}

#[test]
fn endpoints_are_inclusive() {
    let p = segment_intersection(line(10.0, 0.0, 10.0, 10.0), line(0.0, 10.0, 10.0, 10.0)).unwrap();
    assert!((p.x - 10.0).abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);
}

#[test]
fn disjoint_parallel_and_collinear_have_none() {
    assert!(segment_intersection(line(20.0, 0.0, 20.0, 10.0), line(0.0, 4.0, 10.0, 4.0)).is_none());
    assert!(segment_intersection(line(0.0, 0.0, 10.0, 0.0), line(0.0, 1.0, 10.0, 1.0)).is_none());
    assert!(segment_intersection(line(0.0, 0.0, 10.0, 0.0), line(5.0, 0.0, 15.0, 0.0)).is_none());
}

#[test]
fn reversed_segment_still_intersects() {
    let p = segment_intersection(line(3.0, -1.0, 3.0, 1.0), line(8.0, 0.0, 1.0, 0.0)).unwrap();
    assert!((p.x - 3.0).abs() < 1e-9);
}

#[test]
fn point_at_length_walks_from_start() {
    let l = line(10.0, 5.0, 30.0, 5.0);
    assert_eq!(point_at_length(l, 0.0), Point::new(10.0, 5.0));
    let mid = point_at_length(l, 10.0);
    assert!((mid.x - 20.0).abs() < 1e-9);
    assert_eq!(point_at_length(l, 99.0), Point::new(30.0, 5.0));
    let zero = line(4.0, 4.0, 4.0, 4.0);
    assert_eq!(point_at_length(zero, 3.0), Point::new(4.0, 4.0));
}

#[test]
fn union_bounds_skips_missing() {
    let a = Rect::new(0.0, 0.0, 1.0, 1.0);
    let b = Rect::new(2.0, 2.0, 3.0, 3.0);
    assert_eq!(union_bounds(None, None), None);
    assert_eq!(union_bounds(Some(a), None), Some(a));
    assert_eq!(union_bounds(None, Some(b)), Some(b));
    assert_eq!(union_bounds(Some(a), Some(b)), Some(Rect::new(0.0, 0.0, 3.0, 3.0)));
}
