//! Lumen - render a `.rt` scene file to a PNG image.
//!
//! Usage: `lumen <scene.rt> [options]`, see `--help`.
//! Logging goes through `RUST_LOG`; the render thread count follows
//! `RAYON_NUM_THREADS`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use lumen_core::scene_file::{load_scene, load_scene_with, ParserConfig};
use lumen_core::{Canvas, NoTextures};
use lumen_renderer::{render, Framebuffer, RenderConfig, DEFAULT_BUCKET_SIZE};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "lumen")]
#[command(about = "Render a .rt scene file to a PNG image", long_about = None)]
struct Args {
    /// Scene file to render
    scene: PathBuf,

    /// Output image (default: <scene name>.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the canvas size, e.g. 1200x800
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Render scanlines on the calling thread
    #[arg(long)]
    single_threaded: bool,

    /// Bucket edge length for parallel rendering
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    bucket_size: u32,

    /// Reject malformed numbers and out-of-range colours
    #[arg(long)]
    strict: bool,

    /// Ignore texture references
    #[arg(long)]
    no_textures: bool,
}

impl Args {
    /// Explicit output path, or `<scene stem>.png` in the working directory.
    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .scene
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("render");
            PathBuf::from(format!("{stem}.png"))
        })
    }
}

/// Parse `WxH`, both non-zero.
fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WxH such as 1200x800, got '{value}'"))?;
    let w: u32 = w.parse().map_err(|e| format!("invalid width '{w}': {e}"))?;
    let h: u32 = h.parse().map_err(|e| format!("invalid height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got '{value}'"));
    }
    Ok((w, h))
}

fn save_png(image: &Framebuffer, path: &Path) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba_bytes())
        .ok_or_else(|| anyhow!("framebuffer size does not match {}x{}", image.width, image.height))?;
    buffer
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    if args.scene.extension().and_then(|e| e.to_str()) != Some("rt") {
        log::warn!("{} does not have an .rt extension", args.scene.display());
    }

    let parser_config = if args.strict {
        ParserConfig::strict()
    } else {
        ParserConfig::default()
    };

    let mut scene = if args.no_textures {
        load_scene_with(&args.scene, &parser_config, &mut NoTextures)
    } else {
        load_scene(&args.scene, &parser_config)
    }
    .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    if let Some((width, height)) = args.size {
        scene.canvas = Canvas::new(width, height);
    }

    let config = RenderConfig {
        parallel: !args.single_threaded,
        bucket_size: args.bucket_size,
        ..Default::default()
    };
    let image = render(&scene, &config);

    let output = args.output_path();
    save_png(&image, &output)?;
    log::info!("Wrote {}", output.display());

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    run(&args)
}
