//! Hyperboloid of one sheet, truncated along its axis.
//!
//! The surface is evaluated in a local frame `(x, y, z)` where `z` runs
//! along the axis; for an axis of `+Z` the frame is the world frame.

use std::f64::consts::PI;

use lumen_core::Hyperboloid;
use lumen_math::{axis_frame, normalize, solve_quadratic, Interval, Ray, Vec3};

use crate::surface::{first_root, Surface};

fn to_local(hy: &Hyperboloid, v: Vec3) -> Vec3 {
    let (x_axis, y_axis) = axis_frame(hy.axis);
    Vec3::new(v.dot(x_axis), v.dot(y_axis), v.dot(hy.axis))
}

fn from_local(hy: &Hyperboloid, v: Vec3) -> Vec3 {
    let (x_axis, y_axis) = axis_frame(hy.axis);
    x_axis * v.x + y_axis * v.y + hy.axis * v.z
}

/// `1/a², 1/b², −1/c²`
fn weights(hy: &Hyperboloid) -> Vec3 {
    Vec3::new(
        1.0 / (hy.a * hy.a),
        1.0 / (hy.b * hy.b),
        -1.0 / (hy.c * hy.c),
    )
}

impl Surface for Hyperboloid {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let o = to_local(self, ray.origin - self.center);
        let d = to_local(self, ray.direction);
        let w = weights(self);

        let a = (d * d).dot(w);
        let b = 2.0 * (o * d).dot(w);
        let c = (o * o).dot(w) - 1.0;

        let roots = solve_quadratic(a, b, c)?;
        first_root(roots, ray_t, |t| (o + d * t).z.abs() <= self.height / 2.0)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        let p = to_local(self, point - self.center);
        normalize(from_local(self, p * weights(self) * 2.0))
    }

    /// Angle around the axis for `u`, axial offset over height for `v`.
    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        let p = to_local(self, point - self.center);
        let u = 0.5 + p.y.atan2(p.x) / (2.0 * PI);
        let v = 0.5 + p.z / self.height;
        (u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::EPSILON;

    fn unbounded() -> Interval {
        Interval::new(EPSILON, f64::INFINITY)
    }

    #[test]
    fn test_waist_hit() {
        // x² + y² − z² = 1, waist radius 1 at z = 0
        let hy = Hyperboloid::new(Vec3::ZERO, Vec3::Z, 1.0, 1.0, 1.0, 4.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);

        let t = hy.intersect(&ray, unbounded()).unwrap();
        assert!((t - 4.0).abs() < 1e-9);
        assert!((hy.normal_at(ray.at(t)) + Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_flares_with_height() {
        // at z = 1 the radius is sqrt(2)
        let hy = Hyperboloid::new(Vec3::ZERO, Vec3::Z, 1.0, 1.0, 1.0, 4.0);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 1.0), Vec3::X);

        let t = hy.intersect(&ray, unbounded()).unwrap();
        assert!((t - (5.0 - 2.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_height_clamp_is_axial() {
        let hy = Hyperboloid::new(Vec3::ZERO, Vec3::Z, 1.0, 1.0, 1.0, 4.0);
        // z = 1.9 is inside the half height of 2 even though the hit point
        // is more than 2 units from the centre
        let inside = Ray::new(Vec3::new(-5.0, 0.0, 1.9), Vec3::X);
        assert!(hy.intersect(&inside, unbounded()).is_some());

        let outside = Ray::new(Vec3::new(-5.0, 0.0, 2.1), Vec3::X);
        assert!(hy.intersect(&outside, unbounded()).is_none());
    }

    #[test]
    fn test_axis_along_y() {
        let hy = Hyperboloid::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Y, 1.0, 1.0, 1.0, 4.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z);

        // waist circle of radius 1 around (0, 0, 10) in the xz-plane
        let t = hy.intersect(&ray, unbounded()).unwrap();
        assert!((t - 9.0).abs() < 1e-9);
        assert!((hy.normal_at(ray.at(t)) + Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_ray_through_axis_misses_inside() {
        let hy = Hyperboloid::new(Vec3::ZERO, Vec3::Z, 1.0, 1.0, 1.0, 4.0);
        // straight down the hollow middle
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        assert!(hy.intersect(&ray, unbounded()).is_none());
    }

    #[test]
    fn test_uv() {
        let hy = Hyperboloid::new(Vec3::ZERO, Vec3::Z, 1.0, 1.0, 1.0, 4.0);
        let (u, v) = hy.uv_at(Vec3::new(1.0, 0.0, 0.0));
        assert!((u - 0.5).abs() < 1e-12);
        assert!((v - 0.5).abs() < 1e-12);
    }
}
