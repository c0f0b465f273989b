use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use animblit::{
    Blitter, BlitterMode, BlitterParams, BlitterSettings, Colour, Rect, ScreenBuffers,
    SpriteCollection, ZoomLevel,
};

#[derive(Parser, Debug)]
#[command(name = "animblit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blit one PNG sprite onto a canvas and write the realized screen as a PNG.
    Blit(BlitArgs),
}

#[derive(Parser, Debug)]
struct BlitArgs {
    /// Sprite PNG (RGBA).
    #[arg(long)]
    sprite: PathBuf,

    /// Optional mask PNG; its red channel is the palette index of each pixel.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Blitter mode, e.g. `normal`, `colour_remap`, `transparent`.
    #[arg(long, default_value = "normal")]
    mode: BlitterMode,

    /// Sprite position on the canvas; may be negative.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    x: i64,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    y: i64,

    /// Canvas size as `WIDTHxHEIGHT`.
    #[arg(long, default_value = "64x64", value_parser = parse_canvas)]
    canvas: (usize, usize),

    /// Blitter settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Palette animation steps to apply before writing the output.
    #[arg(long, default_value_t = 0)]
    cycle: u32,

    /// Canvas background as `r,g,b`.
    #[arg(long, default_value = "18,20,28", value_parser = parse_rgb)]
    background: Colour,
}

fn parse_canvas(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<usize>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<usize>().map_err(|e| format!("height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("canvas must not be empty".to_string());
    }
    Ok((w, h))
}

fn parse_rgb(s: &str) -> Result<Colour, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u8>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [r, g, b] => Ok(Colour::new(*r, *g, *b)),
        _ => Err(format!("expected r,g,b, got '{s}'")),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Blit(args) => cmd_blit(args),
    }
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
}

fn cmd_blit(args: BlitArgs) -> anyhow::Result<()> {
    let settings = match &args.settings {
        Some(p) => BlitterSettings::from_json_file(p)?,
        None => BlitterSettings::default(),
    }
    .with_env_overrides();
    let mut blitter = Blitter::new(settings)?;

    let sprite_bytes = read_bytes(&args.sprite)?;
    let raw = match &args.mask {
        Some(mask) => animblit::decode_sprite_with_mask(&sprite_bytes, &read_bytes(mask)?)?,
        None => animblit::decode_sprite(&sprite_bytes)?,
    };
    let sprite = animblit::encode_sprite(&SpriteCollection::single(raw))?;

    let (width, height) = args.canvas;
    let mut screen = ScreenBuffers::new(width, height);
    screen.fill(args.background);

    let mut target = screen.target();
    let clip = Rect::new(0, 0, width, height);
    match BlitterParams::placed(&sprite, ZoomLevel::Normal, args.x, args.y, clip) {
        Some(bp) => blitter.draw(&mut target, &bp, args.mode),
        None => tracing::warn!(x = args.x, y = args.y, "sprite lies outside the canvas"),
    }

    for _ in 0..args.cycle {
        blitter.palette_mut().cycle_animated();
    }
    let pixels = blitter.realize(&target);
    let fp = animblit::fingerprint_target(&target);

    let mut img = image::RgbaImage::new(width as u32, height as u32);
    for (dst, px) in img.pixels_mut().zip(&pixels) {
        *dst = image::Rgba(px.to_rgba8());
    }
    if let Some(dir) = args.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("create '{}'", dir.display()))?;
    }
    img.save(&args.out)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    println!(
        "wrote {} ({}x{}, mode {}, colour {:016x}, anim {:016x})",
        args.out.display(),
        width,
        height,
        args.mode,
        fp.colour,
        fp.anim
    );
    Ok(())
}
