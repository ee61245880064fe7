use nalgebra::Vector2;

/// Absolute tolerance for collinearity and touching tests (nondimensional).
pub const SEGMENT_EPS: f64 = 1e-12;

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn within_box(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// True if closed segments `[a0,a1]` and `[b0,b1]` share at least one point,
/// including touching endpoints and collinear overlap.
pub fn segments_intersect(
    a0: Vector2<f64>,
    a1: Vector2<f64>,
    b0: Vector2<f64>,
    b1: Vector2<f64>,
    eps: f64,
) -> bool {
    let d1 = cross(b0, b1, a0);
    let d2 = cross(b0, b1, a1);
    let d3 = cross(a0, a1, b0);
    let d4 = cross(a0, a1, b1);
    let straddle = |p: f64, q: f64| (p > eps && q < -eps) || (p < -eps && q > eps);
    if straddle(d1, d2) && straddle(d3, d4) {
        return true;
    }
    (d1.abs() <= eps && within_box(b0, b1, a0, eps))
        || (d2.abs() <= eps && within_box(b0, b1, a1, eps))
        || (d3.abs() <= eps && within_box(a0, a1, b0, eps))
        || (d4.abs() <= eps && within_box(a0, a1, b1, eps))
}

/// True if the segments `[shared, a]` and `[shared, b]` leave their common
/// endpoint along the same ray, so they overlap beyond that endpoint.
///
/// `eps` bounds the sine of the angle between the two directions.
pub fn segments_fold_back(
    shared: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    eps: f64,
) -> bool {
    let u = a - shared;
    let v = b - shared;
    let sine = u.x * v.y - u.y * v.x;
    sine.abs() <= eps * u.norm() * v.norm() && u.dot(&v) > 0.0
}
