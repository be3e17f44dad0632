use kurbo::{Line, ParamCurve, ParamCurveArclen, Point, Rect};

const PARAM_EPS: f64 = 1e-9;

/// Intersection point of two segments, endpoints inclusive.
///
/// Parallel (and therefore collinear) pairs return `None`.
pub fn segment_intersection(a: Line, b: Line) -> Option<Point> {
    let r = a.p1 - a.p0;
    let s = b.p1 - b.p0;
    let denom = r.cross(s);
    if denom.abs() <= 1e-12 {
        return None;
    }

    let qp = b.p0 - a.p0;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    let in_unit = |v: f64| (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&v);
    if !in_unit(t) || !in_unit(u) {
        return None;
    }

    Some(a.eval(t.clamp(0.0, 1.0)))
}

/// Point at arc length `offset` from `line.p0`, clamped to the segment.
pub fn point_at_length(line: Line, offset: f64) -> Point {
    let len = line.arclen(0.0);
    if len <= 0.0 || !offset.is_finite() {
        return line.p0;
    }
    line.eval((offset / len).clamp(0.0, 1.0))
}

/// Union of two optional rects.
pub fn union_bounds(acc: Option<Rect>, next: Option<Rect>) -> Option<Rect> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
