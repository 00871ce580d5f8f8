//! Scene file (`.rt`) support.
//!
//! This module parses the line-oriented scene description format and
//! loads it, together with any referenced textures, into a [`Scene`].
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::scene_file::{load_scene, ParserConfig};
//!
//! let scene = load_scene("scenes/room.rt", &ParserConfig::default())?;
//! println!("Loaded {} objects, {} lights", scene.object_count(), scene.light_count());
//! ```
//!
//! [`Scene`]: crate::Scene

mod loader;
mod number;
mod parser;

pub use loader::*;
pub use number::*;
pub use parser::*;
