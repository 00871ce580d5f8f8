//! Analytic primitive geometry.
//!
//! These types only describe shape; ray intersection, normals and UV
//! mapping live in the renderer.

use lumen_math::{normalize, Vec3};

/// Closed set of primitive kinds an [`Object`](crate::Object) can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Cylinder(Cylinder),
    Cone(Cone),
    Hyperboloid(Hyperboloid),
    Triangle(Triangle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Infinite plane through `point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    /// Unit normal
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normalize(normal),
        }
    }
}

/// Capped cylinder from `center` (bottom cap) to `center + axis·height` (top cap).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub center: Vec3,
    /// Unit axis
    pub axis: Vec3,
    pub radius: f64,
    pub height: f64,
}

impl Cylinder {
    pub fn new(center: Vec3, axis: Vec3, radius: f64, height: f64) -> Self {
        Self {
            center,
            axis: normalize(axis),
            radius,
            height,
        }
    }

    pub fn top_center(&self) -> Vec3 {
        self.center + self.axis * self.height
    }
}

/// Single-nappe cone opening from `vertex` along `axis`, closed by a base disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub vertex: Vec3,
    /// Unit axis, pointing from the vertex towards the base
    pub axis: Vec3,
    /// Half of the aperture angle, in radians
    pub half_angle: f64,
    pub height: f64,
}

impl Cone {
    pub fn new(vertex: Vec3, axis: Vec3, half_angle: f64, height: f64) -> Self {
        Self {
            vertex,
            axis: normalize(axis),
            half_angle,
            height,
        }
    }

    pub fn base_center(&self) -> Vec3 {
        self.vertex + self.axis * self.height
    }

    pub fn base_radius(&self) -> f64 {
        self.height * self.half_angle.tan()
    }
}

/// Hyperboloid of one sheet `x²/a² + y²/b² − z²/c² = 1`, with `z` along `axis`,
/// truncated to `height` along the axis (centred on `center`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperboloid {
    pub center: Vec3,
    /// Unit axis
    pub axis: Vec3,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub height: f64,
}

impl Hyperboloid {
    pub fn new(center: Vec3, axis: Vec3, a: f64, b: f64, c: f64, height: f64) -> Self {
        Self {
            center,
            axis: normalize(axis),
            a,
            b,
            c,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    pub normal: Vec3,
}

impl Triangle {
    /// Create a triangle; the normal follows the `v0→v1`, `v0→v2` winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = normalize((v1 - v0).cross(v2 - v0));
        Self { v0, v1, v2, normal }
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }
}

macro_rules! impl_into_shape {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Shape::$ty(shape)
                }
            }
        )*
    };
}

impl_into_shape!(Sphere, Plane, Cylinder, Cone, Hyperboloid, Triangle);
