//! Lumen Core - scene model, textures and the `.rt` scene-file format.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Camera`, `Ambient`, `Light`, `Object`
//!   and the six analytic primitives in `shape`
//! - **Textures**: PNG decoding, nearest-texel sampling and bump maps
//! - **Scene files**: the line-oriented `.rt` parser and loader
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::scene_file::{load_scene, ParserConfig};
//!
//! let scene = load_scene("scenes/room.rt", &ParserConfig::default())?;
//! println!("Loaded {} objects, {} lights",
//!     scene.object_count(),
//!     scene.light_count());
//! ```

pub mod scene;
pub mod scene_file;
pub mod shape;
pub mod texture;

// Re-export commonly used types
pub use scene::{Ambient, Camera, Canvas, Light, Object, Scene, Viewport};
pub use scene_file::{load_scene, load_scene_from_string, ParserConfig};
pub use shape::{Cone, Cylinder, Hyperboloid, Plane, Shape, Sphere, Triangle};
pub use texture::{NoTextures, Texture, TextureCache, TextureError, TextureSource};
