//! Finite single-nappe cone closed by a base disk.

use lumen_core::Cone;
use lumen_math::{axis_frame, normalize, solve_quadratic, Interval, Ray, Vec3, EPSILON};

use crate::surface::{angular_u, first_root, intersect_disk, nearer, Surface};

/// Hit on the lateral surface between the vertex and the base.
fn intersect_side(cone: &Cone, ray: &Ray, ray_t: Interval) -> Option<f64> {
    let cos2 = cone.half_angle.cos().powi(2);
    let co = ray.origin - cone.vertex;
    let d_axis = ray.direction.dot(cone.axis);
    let co_axis = co.dot(cone.axis);

    let a = d_axis * d_axis - cos2 * ray.direction.length_squared();
    let b = 2.0 * (d_axis * co_axis - cos2 * ray.direction.dot(co));
    let c = co_axis * co_axis - cos2 * co.length_squared();

    let roots = solve_quadratic(a, b, c)?;
    first_root(roots, ray_t, |t| {
        let m = (ray.at(t) - cone.vertex).dot(cone.axis);
        (0.0..=cone.height).contains(&m)
    })
}

impl Surface for Cone {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let base = intersect_disk(ray, ray_t, self.base_center(), self.axis, self.base_radius());
        nearer(intersect_side(self, ray, ray_t), base)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        let vp = point - self.vertex;
        let m = vp.dot(self.axis);

        if (m - self.height).abs() < EPSILON {
            return self.axis;
        }

        // -∇F / (2·cos²θ) for F = (vp·axis)² − cos²θ·|vp|²
        let cos2 = self.half_angle.cos().powi(2);
        let normal = normalize(vp - self.axis * (m / cos2));
        if normal == Vec3::ZERO {
            -self.axis
        } else {
            normal
        }
    }

    /// Angle around the axis for `u`, distance from the vertex for `v`.
    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        let (x_axis, y_axis) = axis_frame(self.axis);
        let vp = point - self.vertex;
        let u = angular_u(vp, x_axis, y_axis);
        let v = (vp.dot(self.axis) / self.height).clamp(0.0, 1.0);
        (u, v)
    }
}
