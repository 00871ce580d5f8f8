//! Texture loading and caching for textured objects.
//!
//! Textures are decoded from PNG files into packed `0xRRGGBBAA` pixels and
//! shared between objects through [`Arc`]. The scene parser only talks to
//! the [`TextureSource`] trait, so it can run without touching the disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_math::Color;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported texture format: {0}")]
    UnsupportedFormat(String),

    #[error("Bump map is {bump_width}x{bump_height}, texture is {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        bump_width: u32,
        bump_height: u32,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture, optionally paired with a bump map of the same size.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Packed `0xRRGGBBAA` pixels, row-major
    pub pixels: Vec<u32>,

    /// Packed bump-map pixels, same layout and size as `pixels`
    pub bump_map: Option<Vec<u32>>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from packed pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            bump_map: None,
            path: path.into(),
        }
    }

    /// Build a texture from a decoded RGBA8 image.
    pub fn from_rgba8(image: &image::RgbaImage, path: impl Into<String>) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, pack_pixels(image), path)
    }

    /// Attach a bump map; its dimensions must match the texture.
    pub fn with_bump_map(mut self, width: u32, height: u32, bump: Vec<u32>) -> TextureResult<Self> {
        if width != self.width || height != self.height {
            return Err(TextureError::DimensionMismatch {
                width: self.width,
                height: self.height,
                bump_width: width,
                bump_height: height,
            });
        }
        self.bump_map = Some(bump);
        Ok(self)
    }

    pub fn has_bump_map(&self) -> bool {
        self.bump_map.is_some()
    }

    /// Nearest-texel colour at `(u, v)`. Coordinates outside [0, 1) wrap.
    ///
    /// An empty texture samples as white.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        match self.texel_index(u, v) {
            Some(index) => Color::from_rgba(self.pixels[index]),
            None => Color::WHITE,
        }
    }

    /// Signed tangent/bitangent offsets from the bump texel at `(u, v)`.
    ///
    /// Green and blue channels decode as `channel / 128 − 1`.
    pub fn bump_at(&self, u: f64, v: f64) -> Option<(f64, f64)> {
        let bump = self.bump_map.as_ref()?;
        let texel = *bump.get(self.texel_index(u, v)?)?;
        let du = ((texel >> 16) & 0xFF) as f64 / 128.0 - 1.0;
        let dv = ((texel >> 8) & 0xFF) as f64 / 128.0 - 1.0;
        Some((du, dv))
    }

    fn texel_index(&self, u: f64, v: f64) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x = wrap_texel(u, self.width);
        let y = wrap_texel(v, self.height);
        let index = (y * self.width as i64 + x) as usize;
        (index < self.pixels.len()).then_some(index)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        let bump = self.bump_map.as_ref().map_or(0, Vec::len);
        (self.pixels.len() + bump) * std::mem::size_of::<u32>()
    }
}

/// `floor(t·(n−1)) mod n`, always in `0..n`.
fn wrap_texel(t: f64, n: u32) -> i64 {
    let raw = (t * (n as f64 - 1.0)).floor();
    if !raw.is_finite() {
        return 0;
    }
    (raw as i64).rem_euclid(n as i64)
}

fn pack_pixels(image: &image::RgbaImage) -> Vec<u32> {
    image
        .pixels()
        .map(|p| u32::from_be_bytes([p[0], p[1], p[2], p[3]]))
        .collect()
}

/// Anything that can hand the scene parser a decoded texture.
pub trait TextureSource {
    /// Load the texture at `path`, with an optional explicit bump map.
    ///
    /// Failures are reported to the caller, which treats them as non-fatal.
    fn load(&mut self, path: &str, bump_path: Option<&str>) -> TextureResult<Arc<Texture>>;
}

/// A texture source that refuses every request.
///
/// Useful when rendering untextured previews or parsing without a filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextures;

impl TextureSource for NoTextures {
    fn load(&mut self, path: &str, _bump_path: Option<&str>) -> TextureResult<Arc<Texture>> {
        Err(TextureError::LoadError(format!("texture loading disabled: {path}")))
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on demand from PNG files and cached by
/// `(path, bump path)` for reuse across objects.
pub struct TextureCache {
    /// Cached textures by requested paths
    textures: HashMap<(String, Option<String>), Arc<Texture>>,

    /// Base directory for resolving relative paths (usually the scene's directory)
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Candidate locations for `path`, in search order.
    fn candidates(&self, path: &Path) -> Vec<PathBuf> {
        if path.is_absolute() {
            return vec![path.to_path_buf()];
        }

        let mut roots = vec![PathBuf::new()];
        if let Some(base) = &self.base_dir {
            roots.push(base.clone());
        }

        let mut candidates = Vec::new();
        for root in &roots {
            candidates.push(root.join(path));
        }
        for dir in ["textures", "imgs"] {
            for root in &roots {
                candidates.push(root.join(dir).join(path));
            }
        }
        candidates
    }

    /// Find the first existing file for `path`.
    fn resolve_path(&self, path: &str) -> TextureResult<PathBuf> {
        let path = with_png_extension(path)?;
        self.candidates(&path)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| TextureError::LoadError(format!("{} not found", path.display())))
    }

    fn load_bump(&self, texture: Texture, bump_path: &Path) -> Texture {
        let decoded = match decode_png(bump_path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Ignoring bump map {}: {}", bump_path.display(), e);
                return texture;
            }
        };

        let (width, height) = decoded.dimensions();
        let fallback = texture.clone();
        match texture.with_bump_map(width, height, pack_pixels(&decoded)) {
            Ok(texture) => {
                log::debug!("Loaded bump map: {}", bump_path.display());
                texture
            }
            Err(e) => {
                log::warn!("Ignoring bump map {}: {}", bump_path.display(), e);
                fallback
            }
        }
    }
}

impl TextureSource for TextureCache {
    fn load(&mut self, path: &str, bump_path: Option<&str>) -> TextureResult<Arc<Texture>> {
        let key = (path.to_string(), bump_path.map(str::to_string));
        if let Some(texture) = self.textures.get(&key) {
            return Ok(texture.clone());
        }

        log::debug!("Loading texture: {}", path);
        let full_path = self.resolve_path(path)?;
        let mut texture = load_texture_file(&full_path)?;

        let bump_file = match bump_path {
            Some(bump) => match self.resolve_path(bump) {
                Ok(resolved) => Some(resolved),
                Err(e) => {
                    log::warn!("Ignoring bump map {}: {}", bump, e);
                    None
                }
            },
            None => sibling_bump_path(&full_path).filter(|p| p.is_file()),
        };
        if let Some(bump_file) = bump_file {
            texture = self.load_bump(texture, &bump_file);
        }

        let texture = Arc::new(texture);
        self.textures.insert(key, texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB{})",
            full_path.display(),
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0,
            if texture.has_bump_map() { ", bump" } else { "" }
        );

        Ok(texture)
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `.png` to extension-less paths; reject anything that is not PNG.
fn with_png_extension(path: &str) -> TextureResult<PathBuf> {
    let path = PathBuf::from(path);
    match path.extension().and_then(|e| e.to_str()) {
        None => Ok(path.with_extension("png")),
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(path),
        Some(_) => Err(TextureError::UnsupportedFormat(path.display().to_string())),
    }
}

/// `dir/stem.png` -> `dir/stem_bump.png`
fn sibling_bump_path(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    Some(path.with_file_name(format!("{stem}_bump.png")))
}

fn decode_png(path: &Path) -> TextureResult<image::RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Load a texture from a file path.
fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = decode_png(path)?;
    Ok(Texture::from_rgba8(&img, path.to_string_lossy().to_string()))
}
