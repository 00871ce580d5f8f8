//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lumen_core::Triangle;
use lumen_math::{Interval, Ray, Vec3};

use crate::surface::Surface;

/// Determinant threshold below which the ray counts as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

impl Surface for Triangle {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        ray_t.surrounds(t).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    /// Barycentric weights of `v1` and `v2`.
    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let p = point - self.v0;

        let d00 = edge1.dot(edge1);
        let d01 = edge1.dot(edge2);
        let d11 = edge2.dot(edge2);
        let d20 = p.dot(edge1);
        let d21 = p.dot(edge2);

        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < PARALLEL_EPSILON {
            return (0.0, 0.0);
        }
        let u = (d11 * d20 - d01 * d21) / denom;
        let v = (d00 * d21 - d01 * d20) / denom;
        (u, v)
    }
}
