//! Finite capped cylinder.

use lumen_core::Cylinder;
use lumen_math::{axis_frame, normalize, solve_quadratic, Interval, Ray, Vec3, EPSILON};

use crate::surface::{angular_u, first_root, intersect_disk, nearer, Surface};

/// Hit on the curved side, limited to `0 ≤ axial ≤ height`.
fn intersect_body(cy: &Cylinder, ray: &Ray, ray_t: Interval) -> Option<f64> {
    let oc = ray.origin - cy.center;
    let d_perp = ray.direction - cy.axis * ray.direction.dot(cy.axis);
    let oc_perp = oc - cy.axis * oc.dot(cy.axis);

    let a = d_perp.length_squared();
    if a < EPSILON * EPSILON {
        // parallel to the axis: only the caps can be hit
        return None;
    }
    let b = 2.0 * d_perp.dot(oc_perp);
    let c = oc_perp.length_squared() - cy.radius * cy.radius;

    let roots = solve_quadratic(a, b, c)?;
    first_root(roots, ray_t, |t| {
        let axial = (ray.at(t) - cy.center).dot(cy.axis);
        (0.0..=cy.height).contains(&axial)
    })
}

fn intersect_caps(cy: &Cylinder, ray: &Ray, ray_t: Interval) -> Option<f64> {
    let bottom = intersect_disk(ray, ray_t, cy.center, cy.axis, cy.radius);
    let top = intersect_disk(ray, ray_t, cy.top_center(), cy.axis, cy.radius);
    nearer(bottom, top)
}

impl Surface for Cylinder {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        nearer(intersect_body(self, ray, ray_t), intersect_caps(self, ray, ray_t))
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        let on_cap = |cap: Vec3| {
            (point - cap).length() <= self.radius + EPSILON
                && (point - cap).dot(self.axis).abs() < EPSILON
        };

        if on_cap(self.center) {
            return -self.axis;
        }
        if on_cap(self.top_center()) {
            return self.axis;
        }

        let cp = point - self.center;
        normalize(cp - self.axis * cp.dot(self.axis))
    }

    /// Angle around the axis for `u`, height fraction for `v`.
    fn uv_at(&self, point: Vec3) -> (f64, f64) {
        let (x_axis, y_axis) = axis_frame(self.axis);
        let cp = point - self.center;
        let u = angular_u(cp, x_axis, y_axis);
        let v = (cp.dot(self.axis) / self.height).clamp(0.0, 1.0);
        (u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cylinder() -> Cylinder {
        // radius 1, from y = 0 to y = 2
        Cylinder::new(Vec3::ZERO, Vec3::Y, 1.0, 2.0)
    }

    fn unbounded() -> Interval {
        Interval::new(EPSILON, f64::INFINITY)
    }

    #[test]
    fn test_body_hit() {
        let cy = unit_cylinder();
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);

        let t = cy.intersect(&ray, unbounded()).unwrap();
        assert!((t - 4.0).abs() < 1e-9);
        assert_eq!(cy.normal_at(ray.at(t)), -Vec3::X);
    }

    #[test]
    fn test_body_outside_height_rejected() {
        let cy = unit_cylinder();
        // the infinite cylinder is hit at y = 3, above the top cap
        let ray = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(cy.intersect(&ray, unbounded()).is_none());
    }

    #[test]
    fn test_cap_accepted_where_body_rejected() {
        let cy = unit_cylinder();
        // first body root is at y = 3 (rejected); the top cap is crossed at (0, 2, 0)
        let ray = Ray::new(Vec3::new(-2.0, 4.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        assert!(intersect_body(&cy, &ray, Interval::new(EPSILON, 2.0_f64.sqrt() * 2.5)).is_none());

        let t = cy.intersect(&ray, unbounded()).unwrap();
        assert!((t - 2.0 * 2.0_f64.sqrt()).abs() < 1e-9);

        let p = ray.at(t);
        assert!((p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-9);
        assert_eq!(cy.normal_at(p), Vec3::Y);
    }

    #[test]
    fn test_axis_parallel_ray_hits_cap() {
        let cy = unit_cylinder();
        let ray = Ray::new(Vec3::new(0.5, -3.0, 0.0), Vec3::Y);

        let t = cy.intersect(&ray, unbounded()).unwrap();
        assert!((t - 3.0).abs() < 1e-9);
        assert_eq!(cy.normal_at(ray.at(t)), -Vec3::Y);
    }

    #[test]
    fn test_tilted_cylinder() {
        let cy = Cylinder::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(1.0, 1.0, 0.0), 0.5, 4.0);
        let ray = Ray::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Z);

        let t = cy.intersect(&ray, unbounded()).unwrap();
        assert!((t - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_uv_height_fraction() {
        let cy = unit_cylinder();
        let (u, v) = cy.uv_at(Vec3::new(1.0, 0.5, 0.0));
        assert!((v - 0.25).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&u));
    }
}
