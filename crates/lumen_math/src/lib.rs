//! Lumen math - vector, ray and colour primitives shared by every crate.
//!
//! Vectors are glam's double-precision `DVec3`, re-exported as `Vec3`.

pub use glam::{dvec3, DVec3 as Vec3};

mod color;
mod interval;
mod quadratic;
mod ray;

pub use color::Color;
pub use interval::Interval;
pub use quadratic::solve_quadratic;
pub use ray::Ray;

/// Tolerance used for hit acceptance, parallelism tests and surface offsets.
pub const EPSILON: f64 = 1e-4;

/// Normalize `v`, returning it unchanged when its length is zero.
///
/// Callers that need unit length must check for the zero vector themselves.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(v)
}

/// Build two unit vectors `(u, v)` that complete `axis` to a right-handed
/// orthonormal frame, so that `u × v = axis`.
///
/// For `axis = +Z` the frame is exactly `(+X, +Y)`.
pub fn axis_frame(axis: Vec3) -> (Vec3, Vec3) {
    let reference = if axis.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u = normalize(reference - axis * reference.dot(axis));
    let v = axis.cross(u);
    (u, v)
}
