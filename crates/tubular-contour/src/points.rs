//! Operations on lists of 2D points. None of them mutate their input.

use tubular_math::Point2;

/// Signed area of a closed ring (shoelace formula). Positive for
/// counter-clockwise order. A repeated closing point contributes nothing.
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice / 2.0
}

/// Rotate every point a quarter turn clockwise: `(x, y) → (y, −x)`.
pub fn rotate_cw(points: &[Point2]) -> Vec<Point2> {
    points.iter().map(|p| Point2::new(p.y, -p.x)).collect()
}

/// Rotate every point a quarter turn counter-clockwise: `(x, y) → (−y, x)`.
pub fn rotate_ccw(points: &[Point2]) -> Vec<Point2> {
    points.iter().map(|p| Point2::new(-p.y, p.x)).collect()
}

/// Mirror across the Y axis: `(x, y) → (−x, y)`.
pub fn flip_h(points: &[Point2]) -> Vec<Point2> {
    points.iter().map(|p| Point2::new(-p.x, p.y)).collect()
}

/// Mirror across the X axis: `(x, y) → (x, −y)`.
pub fn flip_v(points: &[Point2]) -> Vec<Point2> {
    points.iter().map(|p| Point2::new(p.x, -p.y)).collect()
}
