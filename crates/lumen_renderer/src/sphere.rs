//! Sphere intersection, normal and spherical UV mapping.

use std::f64::consts::PI;

use lumen_core::Sphere;
use lumen_math::{normalize, solve_quadratic, Interval, Ray, Vec3};

use crate::surface::{first_root, Surface};

impl Surface for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let roots = solve_quadratic(a, b, c)?;
        first_root(roots, ray_t, |_| true)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        normalize(point - self.center)
    }

    /// Longitude/latitude mapping around +Y.
    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        let dir = normalize(point - self.center);
        let u = 0.5 + dir.z.atan2(dir.x) / (2.0 * PI);
        let v = 0.5 - dir.y.clamp(-1.0, 1.0).asin() / PI;
        (u, v)
    }
}
