use crate::{normalize, Vec3};

/// A ray in 3D space with an origin and a unit direction.
///
/// Unlike a "best t so far" accumulator, a ray carries no traversal state:
/// the closest-hit search threads its bound through an [`Interval`](crate::Interval).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize(direction),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
