//! Surface trait: the per-primitive capabilities the tracer needs.

use lumen_core::Shape;
use lumen_math::{Interval, Ray, Vec3};

/// Trait for primitives that can be hit by rays and shaded.
pub trait Surface {
    /// Nearest hit parameter strictly inside `ray_t`, if any.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64>;

    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Texture coordinates at a point on the surface.
    fn uv_at(&self, point: Vec3) -> (f64, f64);
}

impl Surface for Shape {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        match self {
            Shape::Sphere(s) => s.intersect(ray, ray_t),
            Shape::Plane(s) => s.intersect(ray, ray_t),
            Shape::Cylinder(s) => s.intersect(ray, ray_t),
            Shape::Cone(s) => s.intersect(ray, ray_t),
            Shape::Hyperboloid(s) => s.intersect(ray, ray_t),
            Shape::Triangle(s) => s.intersect(ray, ray_t),
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(s) => s.normal_at(point),
            Shape::Cylinder(s) => s.normal_at(point),
            Shape::Cone(s) => s.normal_at(point),
            Shape::Hyperboloid(s) => s.normal_at(point),
            Shape::Triangle(s) => s.normal_at(point),
        }
    }

    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        match self {
            Shape::Sphere(s) => s.uv_at(point),
            Shape::Plane(s) => s.uv_at(point),
            Shape::Cylinder(s) => s.uv_at(point),
            Shape::Cone(s) => s.uv_at(point),
            Shape::Hyperboloid(s) => s.uv_at(point),
            Shape::Triangle(s) => s.uv_at(point),
        }
    }
}

/// Smaller of two optional hit parameters.
pub(crate) fn nearer(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// First of the sorted roots inside `ray_t` that also passes `accept`.
pub(crate) fn first_root(
    roots: (f64, f64),
    ray_t: Interval,
    accept: impl Fn(f64) -> bool,
) -> Option<f64> {
    [roots.0, roots.1]
        .into_iter()
        .find(|&t| ray_t.surrounds(t) && accept(t))
}

/// Intersection with the disk of `radius` around `center`, facing `normal`.
pub(crate) fn intersect_disk(
    ray: &Ray,
    ray_t: Interval,
    center: Vec3,
    normal: Vec3,
    radius: f64,
) -> Option<f64> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < lumen_math::EPSILON {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if !ray_t.surrounds(t) {
        return None;
    }
    (ray.at(t).distance(center) <= radius).then_some(t)
}

/// Angle around `axis` mapped to [0, 1], measured in the frame `(u, v)`.
pub(crate) fn angular_u(offset: Vec3, u: Vec3, v: Vec3) -> f64 {
    0.5 + offset.dot(v).atan2(offset.dot(u)) / (2.0 * std::f64::consts::PI)
}
