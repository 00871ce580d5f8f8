//! Infinite plane.

use lumen_core::Plane;
use lumen_math::{normalize, Interval, Ray, Vec3, EPSILON};

use crate::surface::Surface;

/// World-space size of one texture tile on a plane, inverted.
const PLANE_UV_SCALE: f64 = 0.1;

impl Surface for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        ray_t.surrounds(t).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    /// Planar mapping in a basis built from the normal, tiled every 10 units.
    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        let x_axis = if self.normal.y.abs() > 0.9 {
            Vec3::X
        } else {
            normalize(Vec3::Y.cross(self.normal))
        };
        let y_axis = normalize(self.normal.cross(x_axis));

        let local = point - self.point;
        let u = (local.dot(x_axis) * PLANE_UV_SCALE).rem_euclid(1.0);
        let v = (local.dot(y_axis) * PLANE_UV_SCALE).rem_euclid(1.0);
        (u, v)
    }
}
