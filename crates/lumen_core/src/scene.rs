//! Scene model for Lumen.
//!
//! A scene is built once by the parser, never mutated while rendering,
//! and owns every object, light and texture reference it uses.

use std::sync::Arc;

use lumen_math::{Color, Vec3};

use crate::shape::Shape;
use crate::texture::Texture;

/// Output raster size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1200, 800)
    }
}

/// Pinhole camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Viewing direction (unit length)
    pub direction: Vec3,
    /// Vertical field of view in degrees, in (0, 180)
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::Z,
            fov: 70.0,
        }
    }
}

/// Image plane dimensions, derived from the canvas aspect and camera FOV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub distance: f64,
}

impl Viewport {
    /// Fit a viewport at distance 1 to `canvas` for `camera`.
    ///
    /// `height = 2·distance·tan(fov·π/360)`, `width = height·aspect`.
    pub fn fit(canvas: Canvas, camera: &Camera) -> Self {
        let distance = 1.0;
        let height = 2.0 * distance * (camera.fov * std::f64::consts::PI / 360.0).tan();
        Self {
            width: height * canvas.aspect_ratio(),
            height,
            distance,
        }
    }
}

/// Ambient light term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ambient {
    /// Intensity in [0, 1]
    pub ratio: f64,
    pub color: Color,
}

impl Default for Ambient {
    fn default() -> Self {
        Self {
            ratio: 0.1,
            color: Color::WHITE,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Brightness in [0, 1]
    pub brightness: f64,
    pub color: Color,
    /// Phong specular exponent
    pub specular_exponent: f64,
}

impl Light {
    /// Specular exponent used when a light record omits it.
    pub const DEFAULT_SPECULAR_EXPONENT: f64 = 32.0;

    pub fn new(position: Vec3, brightness: f64, color: Color) -> Self {
        Self {
            position,
            brightness,
            color,
            specular_exponent: Self::DEFAULT_SPECULAR_EXPONENT,
        }
    }

    pub fn with_specular_exponent(mut self, exponent: f64) -> Self {
        self.specular_exponent = exponent;
        self
    }
}

/// A renderable primitive with its base colour and optional texture.
#[derive(Debug, Clone)]
pub struct Object {
    pub shape: Shape,
    pub color: Color,
    pub texture: Option<Arc<Texture>>,
}

impl Object {
    pub fn new(shape: impl Into<Shape>, color: Color) -> Self {
        Self {
            shape: shape.into(),
            color,
            texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// A complete scene: canvas, camera, lighting and objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    pub canvas: Canvas,
    pub camera: Camera,
    pub ambient: Ambient,

    /// Objects in file order
    pub objects: Vec<Object>,

    /// Lights in file order
    pub lights: Vec<Light>,

    /// Procedural checkerboard for every untextured object
    pub checkerboard: bool,
}

impl Scene {
    /// Create an empty scene with default camera, ambient and canvas.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append an object and return its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
