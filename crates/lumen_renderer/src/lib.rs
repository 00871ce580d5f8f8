//! Lumen Renderer - CPU ray tracing with Phong shading.
//!
//! One primary ray per pixel, nearest-hit resolution across all objects,
//! then ambient, diffuse and specular terms per light with hard shadows.
//! Buckets of pixels are rendered in parallel with rayon.

mod bucket;
mod camera;
mod cone;
mod cylinder;
mod hit;
mod hyperboloid;
mod plane;
mod renderer;
mod shading;
mod sphere;
mod surface;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::RayCamera;
pub use hit::{any_hit, closest_hit, Hit};
pub use renderer::{render, render_pixel, trace, Framebuffer, RenderConfig};
pub use shading::{apply_checkerboard, bump_normal, is_in_shadow, shade, surface_color, BUMP_STRENGTH};
pub use surface::Surface;

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Interval, Ray, Vec3};
