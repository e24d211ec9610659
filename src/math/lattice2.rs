use nalgebra::{Matrix2, Vector2};

/// `A` times the integer vector `v` (spec.md §4.1).
pub fn apply(a: &Matrix2<f64>, v: Vector2<i64>) -> Vector2<f64> {
    a * Vector2::new(v.x as f64, v.y as f64)
}

/// 2D rotation of `v` by `theta` radians (spec.md §4.1).
pub fn rotate(v: Vector2<f64>, theta: f64) -> Vector2<f64> {
    let (sin, cos) = theta.sin_cos();
    Vector2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Euclidean distance between `u` and `v`.
pub fn distance(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    (u - v).norm()
}
