//! Closest-hit and any-hit queries over a scene's objects.

use lumen_core::Object;
use lumen_math::{Interval, Ray, Vec3};

use crate::surface::Surface;

/// The nearest intersection found along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the intersection
    pub t: f64,
    /// Index into the scene's object list
    pub object_index: usize,
}

impl Hit {
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.t)
    }
}

/// Find the closest object hit by `ray` inside `ray_t`.
///
/// The upper bound shrinks to each accepted hit, so later objects only
/// win when strictly closer. Ties keep the earlier object.
pub fn closest_hit(objects: &[Object], ray: &Ray, ray_t: Interval) -> Option<Hit> {
    objects
        .iter()
        .enumerate()
        .fold(None, |closest: Option<Hit>, (object_index, object)| {
            let bound = closest.map_or(ray_t, |hit| ray_t.with_max(hit.t));
            match object.shape.intersect(ray, bound) {
                Some(t) => Some(Hit { t, object_index }),
                None => closest,
            }
        })
}

/// True if any object intersects `ray` inside `ray_t`.
pub fn any_hit(objects: &[Object], ray: &Ray, ray_t: Interval) -> bool {
    objects
        .iter()
        .any(|object| object.shape.intersect(ray, ray_t).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Plane, Sphere};
    use lumen_math::{Color, EPSILON};

    fn objects() -> Vec<Object> {
        vec![
            Object::new(Plane::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z), Color::WHITE),
            Object::new(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0), Color::WHITE),
            Object::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0), Color::WHITE),
        ]
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = closest_hit(&objects(), &ray, Interval::new(EPSILON, f64::INFINITY)).unwrap();

        assert_eq!(hit.object_index, 2);
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!((hit.point(&ray) - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-9);
    }

    #[test]
    fn test_closest_hit_none() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(closest_hit(&objects(), &ray, Interval::new(EPSILON, f64::INFINITY)).is_none());
        assert!(closest_hit(&[], &ray, Interval::new(EPSILON, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_any_hit_respects_bound() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(any_hit(&objects(), &ray, Interval::new(EPSILON, 5.0)));
        assert!(!any_hit(&objects(), &ray, Interval::new(EPSILON, 3.5)));
    }
}
