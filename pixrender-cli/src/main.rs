use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pixrender::{Argb, Filter, PixelFormat, Pixmap, Point, Rect, Render, RenderConfig, Rotation};

#[derive(Parser, Debug)]
#[command(name = "pixrender", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place an image on a canvas, synthesize the background around it and write a PNG.
    Draw(DrawArgs),
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Input image (PNG, JPEG, GIF, BMP or WebP).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long)]
    width: usize,

    /// Canvas height in pixels.
    #[arg(long)]
    height: usize,

    /// Scale factor; fits the image inside the canvas when omitted.
    #[arg(long)]
    scale: Option<f64>,

    /// Left edge of the image; centered when omitted.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i32>,

    /// Top edge of the image; centered when omitted.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i32>,

    /// Rotate the image clockwise before placing it (90, 180 or 270).
    #[arg(long)]
    rotate: Option<i32>,

    /// How to fill the canvas around the image.
    #[arg(long, value_enum, default_value_t = Background::Color)]
    background: Background,

    /// Background color as `AARRGGBB` or `RRGGBB` hex.
    #[arg(long, default_value = "ff000000")]
    color: String,

    /// Scale with nearest neighbour instead of the anti-aliased kernels.
    #[arg(long)]
    no_aa: bool,

    /// Anti-aliasing filter: box, linear, cubic or mks13.
    #[arg(long)]
    filter: Option<Filter>,

    /// Worker threads (0 = auto).
    #[arg(long)]
    threads: Option<usize>,

    /// Render config JSON; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Background {
    Color,
    Extend,
    Mirror,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
    }
}

fn parse_color(s: &str) -> anyhow::Result<Argb> {
    let hex = s.trim_start_matches('#');
    let v = u32::from_str_radix(hex, 16).with_context(|| format!("parse color '{s}'"))?;
    match hex.len() {
        6 => Ok(Argb::from_u32(0xff00_0000 | v)),
        8 => Ok(Argb::from_u32(v)),
        _ => anyhow::bail!("color '{s}' must have 6 or 8 hex digits"),
    }
}

fn build_config(args: &DrawArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if args.no_aa {
        cfg.antialiasing = false;
    }
    if let Some(filter) = args.filter {
        cfg.filter = filter;
    }
    if let Some(threads) = args.threads {
        cfg.threads = threads;
    }
    Ok(cfg)
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "canvas width/height must be > 0"
    );
    let color = parse_color(&args.color)?;
    let render = Render::new(build_config(&args)?)?;

    let mut image = pixrender::assets::load_image(&args.in_path)
        .with_context(|| format!("load image '{}'", args.in_path.display()))?;
    if let Some(deg) = args.rotate {
        let rotation = Rotation::from_degrees(deg)
            .with_context(|| format!("rotation must be a multiple of 90, got {deg}"))?;
        image.rotate(rotation);
    }
    anyhow::ensure!(!image.is_empty(), "image '{}' is empty", args.in_path.display());

    let scale = args.scale.unwrap_or_else(|| {
        (args.width as f64 / image.width() as f64).min(args.height as f64 / image.height() as f64)
    });
    anyhow::ensure!(
        scale.is_finite() && scale > 0.0,
        "scale must be > 0, got {scale}"
    );
    let scaled_w = (image.width() as f64 * scale).round() as i64;
    let scaled_h = (image.height() as f64 * scale).round() as i64;
    let pos = Point::new(
        args.x
            .unwrap_or(((args.width as i64 - scaled_w) / 2) as i32),
        args.y
            .unwrap_or(((args.height as i64 - scaled_h) / 2) as i32),
    );
    let placed = Rect::new(pos.x, pos.y, scaled_w as u32, scaled_h as u32);

    let mut canvas = Pixmap::new(PixelFormat::Argb, args.width, args.height);
    match args.background {
        Background::Color => {
            render.fill_inverse(&mut canvas, placed, color);
            render.draw(&mut canvas, &image, pos, scale);
        }
        Background::Extend => {
            render.draw(&mut canvas, &image, pos, scale);
            render.extend_background(&mut canvas, placed);
        }
        Background::Mirror => {
            render.draw(&mut canvas, &image, pos, scale);
            render.mirror_background(&mut canvas, placed);
        }
    }
    tracing::info!(?pos, scale, background = ?args.background, "canvas rendered");

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    pixrender::assets::save_png(&canvas, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
