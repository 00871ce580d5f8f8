//! Primary-ray generation.

use lumen_core::{Camera, Canvas, Scene, Viewport};
use lumen_math::{normalize, Ray, Vec3};

/// World up used to derive the camera basis.
const WORLD_UP: Vec3 = Vec3::Y;

/// Pinhole camera with a precomputed orthonormal basis.
#[derive(Debug, Clone, Copy)]
pub struct RayCamera {
    pub image_width: u32,
    pub image_height: u32,

    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    viewport: Viewport,
}

impl RayCamera {
    /// Build the ray camera for `camera` rendering onto `canvas`.
    pub fn new(camera: &Camera, canvas: Canvas) -> Self {
        let forward = normalize(camera.direction);

        // looking straight up or down leaves world-up parallel to forward
        let mut right = normalize(WORLD_UP.cross(forward));
        if right == Vec3::ZERO {
            right = Vec3::X;
        }
        let up = forward.cross(right);

        Self {
            image_width: canvas.width,
            image_height: canvas.height,
            origin: camera.position,
            forward,
            right,
            up,
            viewport: Viewport::fit(canvas, camera),
        }
    }

    pub fn from_scene(scene: &Scene) -> Self {
        Self::new(&scene.camera, scene.canvas)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Generate the primary ray through pixel `(x, y)`, `y` growing downwards.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let u = screen_coord(x, self.image_width);
        let v = -screen_coord(y, self.image_height);

        let direction = self.forward * self.viewport.distance
            + self.right * (u * self.viewport.width)
            + self.up * (v * self.viewport.height);
        Ray::new(self.origin, direction)
    }
}

/// `i / (n − 1) − 0.5`, or 0 for a single row or column.
fn screen_coord(i: u32, n: u32) -> f64 {
    if n > 1 {
        i as f64 / (n - 1) as f64 - 0.5
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(direction: Vec3) -> Camera {
        Camera {
            position: Vec3::new(0.0, 0.0, -1.0),
            direction,
            fov: 90.0,
        }
    }

    #[test]
    fn test_center_ray_is_forward() {
        let cam = RayCamera::new(&camera(Vec3::Z), Canvas::new(5, 5));
        let ray = cam.get_ray(2, 2);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, -1.0));
        assert!((ray.direction - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_rays() {
        // fov 90 on a square canvas: viewport is 2x2 at distance 1
        let cam = RayCamera::new(&camera(Vec3::Z), Canvas::new(3, 3));

        let top_left = cam.get_ray(0, 0).direction;
        let expected = normalize(Vec3::new(-1.0, 1.0, 1.0));
        assert!((top_left - expected).length() < 1e-12);

        let bottom_right = cam.get_ray(2, 2).direction;
        let expected = normalize(Vec3::new(1.0, -1.0, 1.0));
        assert!((bottom_right - expected).length() < 1e-12);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let cam = RayCamera::new(&camera(normalize(Vec3::new(1.0, -0.5, 2.0))), Canvas::default());
        assert!(cam.right.dot(cam.forward).abs() < 1e-12);
        assert!(cam.up.dot(cam.forward).abs() < 1e-12);
        assert!((cam.right.length() - 1.0).abs() < 1e-12);
        assert!(cam.up.y > 0.0);
    }

    #[test]
    fn test_looking_straight_down() {
        let cam = RayCamera::new(&camera(-Vec3::Y), Canvas::new(4, 4));
        assert_eq!(cam.right, Vec3::X);

        let ray = cam.get_ray(1, 2);
        assert!(ray.direction.is_finite());
        assert!(ray.direction.y < 0.0);
    }

    #[test]
    fn test_edge_rays_span_the_fov() {
        // 60° vertical fov on a 2:1 canvas
        let cam = RayCamera::new(
            &Camera {
                fov: 60.0,
                ..camera(Vec3::Z)
            },
            Canvas::new(201, 101),
        );
        let viewport = cam.viewport();
        assert!((viewport.height - 2.0 * 30f64.to_radians().tan()).abs() < 1e-12);
        assert!((viewport.width / viewport.height - 201.0 / 101.0).abs() < 1e-12);

        let top = cam.get_ray(100, 0).direction;
        let bottom = cam.get_ray(100, 100).direction;
        assert!((top.angle_between(bottom).to_degrees() - 60.0).abs() < 1e-9);

        let left = cam.get_ray(0, 50).direction;
        let right = cam.get_ray(200, 50).direction;
        let half_width = (viewport.width / 2.0).atan();
        assert!((left.angle_between(right) - 2.0 * half_width).abs() < 1e-9);
    }

    #[test]
    fn test_single_pixel_canvas() {
        let cam = RayCamera::new(&camera(Vec3::Z), Canvas::new(1, 1));
        assert!((cam.get_ray(0, 0).direction - Vec3::Z).length() < 1e-12);
    }
}
