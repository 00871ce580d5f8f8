//! High-level scene loading from disk.

use std::path::Path;

use thiserror::Error;

use super::parser::{parse_scene, ParseError, ParserConfig};
use crate::scene::Scene;
use crate::texture::{TextureCache, TextureSource};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file, resolving textures relative to its directory.
pub fn load_scene<P: AsRef<Path>>(path: P, config: &ParserConfig) -> LoadResult<Scene> {
    let path = path.as_ref();
    let mut textures = match path.parent() {
        Some(dir) => TextureCache::with_base_dir(dir),
        None => TextureCache::new(),
    };
    load_scene_with(path, config, &mut textures)
}

/// Load a scene file with a caller-supplied texture source.
pub fn load_scene_with<P: AsRef<Path>>(
    path: P,
    config: &ParserConfig,
    textures: &mut dyn TextureSource,
) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    log::info!("Loading scene: {}", path.display());
    load_scene_from_string(&content, name, config, textures)
}

/// Load a scene from a string (useful for testing).
pub fn load_scene_from_string(
    content: &str,
    name: &str,
    config: &ParserConfig,
    textures: &mut dyn TextureSource,
) -> LoadResult<Scene> {
    let scene = parse_scene(content, name, config, textures)?;

    let textured = scene.objects.iter().filter(|o| o.texture.is_some()).count();
    log::info!(
        "Loaded scene '{}': {} objects ({} textured), {} lights, {}x{}",
        scene.name,
        scene.object_count(),
        textured,
        scene.light_count(),
        scene.canvas.width,
        scene.canvas.height
    );

    Ok(scene)
}
