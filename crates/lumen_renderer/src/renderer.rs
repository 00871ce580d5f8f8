//! Frame rendering: one primary ray per pixel, shaded with Phong lighting.

use std::time::Instant;

use lumen_core::Scene;
use lumen_math::{Color, Interval, Ray, EPSILON};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::RayCamera;
use crate::hit::closest_hit;
use crate::shading::shade;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Background color when a ray doesn't hit anything
    pub background: Color,
    /// Render buckets in parallel on the rayon thread pool
    pub parallel: bool,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            parallel: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Colour seen along `ray`.
pub fn trace(scene: &Scene, ray: &Ray, config: &RenderConfig) -> Color {
    match closest_hit(&scene.objects, ray, Interval::new(EPSILON, f64::INFINITY)) {
        Some(hit) => shade(scene, ray, hit),
        None => config.background,
    }
}

/// Render a single pixel to a packed `0xRRGGBBAA` value.
pub fn render_pixel(
    scene: &Scene,
    camera: &RayCamera,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> u32 {
    let ray = camera.get_ray(x, y);
    trace(scene, &ray, config).to_rgba()
}

/// Packed `0xRRGGBBAA` pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK.to_rgba(); width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: u32) {
        let index = self.index(x, y);
        self.pixels[index] = rgba;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, line) in result
            .pixels
            .chunks(bucket.width.max(1) as usize)
            .enumerate()
        {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }
}

/// Render the whole scene.
///
/// With `config.parallel` the image is split into buckets rendered on the
/// rayon pool, centre first; otherwise pixels are rendered in scanline order.
pub fn render(scene: &Scene, config: &RenderConfig) -> Framebuffer {
    let camera = RayCamera::from_scene(scene);
    let (width, height) = (camera.image_width, camera.image_height);
    let viewport = camera.viewport();
    log::debug!(
        "Viewport {:.3}x{:.3} at distance {} (fov {})",
        viewport.width,
        viewport.height,
        viewport.distance,
        scene.camera.fov
    );
    let mut image = Framebuffer::new(width, height);

    let start = Instant::now();

    if config.parallel {
        let buckets = generate_buckets(width, height, config.bucket_size.max(1));
        log::info!(
            "Rendering '{}' at {}x{} in {} buckets",
            scene.name,
            width,
            height,
            buckets.len()
        );

        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, scene, &camera, config)))
            .collect();

        for result in &results {
            image.write_bucket(result);
        }
    } else {
        log::info!("Rendering '{}' at {}x{} single-threaded", scene.name, width, height);
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, render_pixel(scene, &camera, x, y, config));
            }
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
