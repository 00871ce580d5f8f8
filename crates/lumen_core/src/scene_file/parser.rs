//! Line-oriented scene file parser.
//!
//! Each non-empty line that does not start with `#` is one record, split on
//! whitespace. The first token selects the record kind:
//!
//! - `A ratio r,g,b` - ambient light
//! - `C x,y,z dx,dy,dz fov` - camera
//! - `L x,y,z brightness r,g,b [specular_exponent]` - point light
//! - `sp center diameter color [texture]`
//! - `pl point normal color [texture]`
//! - `cy center axis diameter height color [texture]`
//! - `cn vertex axis angle height color [texture]`
//! - `hy center axis a b c height color [texture]`
//! - `tr v1 v2 v3 color [texture]`
//! - `cb` - checkerboard shading for untextured objects
//!
//! The optional texture is either a bare path, or `txm:<path>` with an
//! optional `bum:<path>` bump map.

use lumen_math::{dvec3, normalize, Color, Vec3};
use thiserror::Error;

use super::number::NumberMode;
use crate::scene::{Ambient, Camera, Light, Object, Scene};
use crate::shape::{Cone, Cylinder, Hyperboloid, Plane, Shape, Sphere, Triangle};
use crate::texture::TextureSource;

/// Fatal scene file errors. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: unknown record type '{record}'")]
    UnknownRecord { line: usize, record: String },

    #[error("line {line}: '{record}' record is missing its {field}")]
    MissingField {
        line: usize,
        record: &'static str,
        field: &'static str,
    },

    #[error("line {line}: invalid number '{token}' for {field}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("line {line}: {field} must be three comma-separated values, got '{token}'")]
    InvalidTriple {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("line {line}: {field} = {value} is out of range, expected {expected}")]
    OutOfRange {
        line: usize,
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("line {line}: {field} must not be a zero vector")]
    ZeroVector { line: usize, field: &'static str },

    #[error("line {line}: too many lights (at most {max})")]
    TooManyLights { line: usize, max: usize },

    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },

    #[error("scene has no objects")]
    NoObjects,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parser options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub number_mode: NumberMode,

    /// Maximum number of `L` records
    pub max_lights: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            number_mode: NumberMode::Lenient,
            max_lights: 3,
        }
    }
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self {
            number_mode: NumberMode::Strict,
            ..Default::default()
        }
    }
}

/// Parse a whole scene file.
///
/// Texture paths are handed to `textures`; a texture that fails to load
/// is logged and the object is kept untextured.
pub fn parse_scene(
    content: &str,
    name: &str,
    config: &ParserConfig,
    textures: &mut dyn TextureSource,
) -> ParseResult<Scene> {
    let mut parser = SceneParser::new(name, config, textures);
    for (i, line) in content.lines().enumerate() {
        parser.parse_line(i + 1, line)?;
    }
    parser.finish()
}

/// Incremental scene builder, fed one line at a time.
pub struct SceneParser<'a> {
    config: &'a ParserConfig,
    textures: &'a mut dyn TextureSource,
    scene: Scene,
    seen_ambient: bool,
    seen_camera: bool,
}

impl<'a> SceneParser<'a> {
    pub fn new(name: &str, config: &'a ParserConfig, textures: &'a mut dyn TextureSource) -> Self {
        Self {
            config,
            textures,
            scene: Scene::new(name),
            seen_ambient: false,
            seen_camera: false,
        }
    }

    /// Parse one line. Blank lines and `#` comments are skipped.
    pub fn parse_line(&mut self, line: usize, text: &str) -> ParseResult<()> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(());
        }

        let mut tokens = text.split_whitespace();
        let Some(kind) = tokens.next() else {
            return Ok(());
        };

        let mode = self.config.number_mode;
        let fields = |record| Fields::new(line, record, tokens, mode);
        match kind {
            "A" => self.parse_ambient(fields("A")),
            "C" => self.parse_camera(fields("C")),
            "L" => self.parse_light(fields("L")),
            "sp" => self.parse_sphere(fields("sp")),
            "pl" => self.parse_plane(fields("pl")),
            "cy" => self.parse_cylinder(fields("cy")),
            "cn" => self.parse_cone(fields("cn")),
            "hy" => self.parse_hyperboloid(fields("hy")),
            "tr" => self.parse_triangle(fields("tr")),
            "cb" => {
                fields("cb").end()?;
                self.scene.checkerboard = true;
                Ok(())
            }
            other => Err(ParseError::UnknownRecord {
                line,
                record: other.to_string(),
            }),
        }
    }

    /// Finish parsing. A scene without objects is an error.
    pub fn finish(self) -> ParseResult<Scene> {
        if self.scene.objects.is_empty() {
            return Err(ParseError::NoObjects);
        }
        Ok(self.scene)
    }

    fn parse_ambient(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let ratio = f.float("ratio")?;
        f.check(ratio, "ratio", (0.0..=1.0).contains(&ratio), "[0, 1]")?;
        let color = f.color("color")?;
        f.end()?;

        if self.seen_ambient {
            log::warn!("line {}: duplicate ambient record overrides the previous one", f.line);
        }
        self.seen_ambient = true;
        self.scene.ambient = Ambient { ratio, color };
        Ok(())
    }

    fn parse_camera(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let position = f.vector("position")?;
        let direction = f.direction("direction")?;
        let fov = f.float("fov")?;
        f.check(fov, "fov", fov > 0.0 && fov < 180.0, "(0, 180)")?;
        f.end()?;

        if self.seen_camera {
            log::warn!("line {}: duplicate camera record overrides the previous one", f.line);
        }
        self.seen_camera = true;
        self.scene.camera = Camera {
            position,
            direction,
            fov,
        };
        Ok(())
    }

    fn parse_light(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let max = self.config.max_lights;
        if self.scene.lights.len() >= max {
            return Err(ParseError::TooManyLights { line: f.line, max });
        }

        let position = f.vector("position")?;
        let brightness = f.float("brightness")?;
        f.check(brightness, "brightness", (0.0..=1.0).contains(&brightness), "[0, 1]")?;
        let color = f.color("color")?;
        let mut light = Light::new(position, brightness, color);
        if f.has_more() {
            light = light.with_specular_exponent(f.float("specular exponent")?);
        }
        f.end()?;

        self.scene.add_light(light);
        Ok(())
    }

    fn parse_sphere(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let center = f.vector("center")?;
        let diameter = f.positive("diameter")?;
        let color = f.color("color")?;
        self.push_object(f, Sphere::new(center, diameter / 2.0), color)
    }

    fn parse_plane(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let point = f.vector("point")?;
        let normal = f.direction("normal")?;
        let color = f.color("color")?;
        self.push_object(f, Plane::new(point, normal), color)
    }

    fn parse_cylinder(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let center = f.vector("center")?;
        let axis = f.direction("axis")?;
        let diameter = f.positive("diameter")?;
        let height = f.positive("height")?;
        let color = f.color("color")?;
        self.push_object(f, Cylinder::new(center, axis, diameter / 2.0, height), color)
    }

    fn parse_cone(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let vertex = f.vector("vertex")?;
        let axis = f.direction("axis")?;
        let angle = f.float("angle")?;
        f.check(angle, "angle", angle > 0.0 && angle < 180.0, "(0, 180)")?;
        let height = f.positive("height")?;
        let color = f.color("color")?;
        let half_angle = angle.to_radians() / 2.0;
        self.push_object(f, Cone::new(vertex, axis, half_angle, height), color)
    }

    fn parse_hyperboloid(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let center = f.vector("center")?;
        let axis = f.direction("axis")?;
        let a = f.positive("a")?;
        let b = f.positive("b")?;
        let c = f.positive("c")?;
        let height = f.positive("height")?;
        let color = f.color("color")?;
        self.push_object(f, Hyperboloid::new(center, axis, a, b, c, height), color)
    }

    fn parse_triangle(&mut self, mut f: Fields<'_>) -> ParseResult<()> {
        let v0 = f.vector("first vertex")?;
        let v1 = f.vector("second vertex")?;
        let v2 = f.vector("third vertex")?;
        let color = f.color("color")?;

        let triangle = Triangle::new(v0, v1, v2);
        if triangle.is_degenerate() {
            log::warn!("line {}: degenerate triangle will never be hit", f.line);
        }
        self.push_object(f, triangle, color)
    }

    /// Read the optional texture tokens, then append the object.
    fn push_object(&mut self, mut f: Fields<'_>, shape: impl Into<Shape>, color: Color) -> ParseResult<()> {
        let texture = f.texture()?;
        let mut object = Object::new(shape, color);

        if let Some(TextureRef { path, bump }) = texture {
            log::debug!("line {}: loading texture {}", f.line, path);
            match self.textures.load(&path, bump.as_deref()) {
                Ok(texture) => object = object.with_texture(texture),
                Err(e) => log::warn!(
                    "line {}: failed to load texture '{}', continuing without it: {}",
                    f.line,
                    path,
                    e
                ),
            }
        }

        self.scene.add_object(object);
        Ok(())
    }
}

/// Texture reference from the trailing tokens of an object record.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextureRef {
    path: String,
    bump: Option<String>,
}

/// Cursor over the tokens of one record.
struct Fields<'l> {
    line: usize,
    record: &'static str,
    tokens: std::iter::Peekable<std::str::SplitWhitespace<'l>>,
    mode: NumberMode,
}

impl<'l> Fields<'l> {
    fn new(
        line: usize,
        record: &'static str,
        tokens: std::str::SplitWhitespace<'l>,
        mode: NumberMode,
    ) -> Self {
        Self {
            line,
            record,
            tokens: tokens.peekable(),
            mode,
        }
    }

    fn has_more(&mut self) -> bool {
        self.tokens.peek().is_some()
    }

    fn next(&mut self, field: &'static str) -> ParseResult<&'l str> {
        self.tokens.next().ok_or(ParseError::MissingField {
            line: self.line,
            record: self.record,
            field,
        })
    }

    /// No tokens may remain.
    fn end(&mut self) -> ParseResult<()> {
        match self.tokens.next() {
            Some(token) => Err(ParseError::UnexpectedToken {
                line: self.line,
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn check(&self, value: f64, field: &'static str, ok: bool, expected: &'static str) -> ParseResult<()> {
        if ok {
            Ok(())
        } else {
            Err(ParseError::OutOfRange {
                line: self.line,
                field,
                value,
                expected,
            })
        }
    }

    fn number(&self, field: &'static str, token: &str) -> ParseResult<f64> {
        self.mode
            .parse_f64(token)
            .ok_or_else(|| ParseError::InvalidNumber {
                line: self.line,
                field,
                token: token.to_string(),
            })
    }

    fn float(&mut self, field: &'static str) -> ParseResult<f64> {
        let token = self.next(field)?;
        self.number(field, token)
    }

    /// A number that must be strictly positive.
    fn positive(&mut self, field: &'static str) -> ParseResult<f64> {
        let value = self.float(field)?;
        self.check(value, field, value > 0.0, "> 0")?;
        Ok(value)
    }

    fn triple(&mut self, field: &'static str) -> ParseResult<[&'l str; 3]> {
        let token = self.next(field)?;
        let parts: Vec<&str> = token.split(',').collect();
        match parts.as_slice() {
            [x, y, z] => Ok([*x, *y, *z]),
            _ => Err(ParseError::InvalidTriple {
                line: self.line,
                field,
                token: token.to_string(),
            }),
        }
    }

    fn vector(&mut self, field: &'static str) -> ParseResult<Vec3> {
        let [x, y, z] = self.triple(field)?;
        Ok(dvec3(
            self.number(field, x)?,
            self.number(field, y)?,
            self.number(field, z)?,
        ))
    }

    /// A vector normalized to unit length; zero vectors are rejected.
    fn direction(&mut self, field: &'static str) -> ParseResult<Vec3> {
        let direction = normalize(self.vector(field)?);
        if direction == Vec3::ZERO {
            return Err(ParseError::ZeroVector {
                line: self.line,
                field,
            });
        }
        Ok(direction)
    }

    fn color(&mut self, field: &'static str) -> ParseResult<Color> {
        let channels = self.triple(field)?;
        let mut rgb = [0i32; 3];
        for (out, token) in rgb.iter_mut().zip(channels) {
            let value = self
                .mode
                .parse_channel(token)
                .ok_or_else(|| ParseError::InvalidNumber {
                    line: self.line,
                    field,
                    token: token.to_string(),
                })?;
            if self.mode == NumberMode::Strict {
                self.check(value as f64, field, (0..=255).contains(&value), "0..=255")?;
            }
            *out = value;
        }
        Ok(Color::new(rgb[0], rgb[1], rgb[2]))
    }

    /// Trailing `[path]` or `[txm:path] [bum:path]` tokens.
    fn texture(&mut self) -> ParseResult<Option<TextureRef>> {
        let mut path = None;
        let mut bump = None;

        for token in self.tokens.by_ref() {
            if let Some(p) = token.strip_prefix("txm:") {
                if path.is_some() {
                    return Err(ParseError::UnexpectedToken {
                        line: self.line,
                        token: token.to_string(),
                    });
                }
                path = Some(p.to_string());
            } else if let Some(b) = token.strip_prefix("bum:") {
                if bump.is_some() {
                    return Err(ParseError::UnexpectedToken {
                        line: self.line,
                        token: token.to_string(),
                    });
                }
                bump = Some(b.to_string());
            } else if path.is_none() && bump.is_none() {
                path = Some(token.to_string());
            } else {
                return Err(ParseError::UnexpectedToken {
                    line: self.line,
                    token: token.to_string(),
                });
            }
        }

        match (path, bump) {
            (Some(path), bump) => Ok(Some(TextureRef { path, bump })),
            (None, Some(bump)) => {
                log::warn!("line {}: bump map '{}' ignored without a texture", self.line, bump);
                Ok(None)
            }
            (None, None) => Ok(None),
        }
    }
}
