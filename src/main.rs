use clap::{Parser, Subcommand};
use framefit::{
    BUILTIN_PRESETS, DragOffset, FitterConfig, ProcessOptions, SizeSelector, TargetSize,
    load_config, process_image,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "framefit")]
#[command(about = "Fit images onto social and marketplace canvas presets")]
#[command(long_about = "\
Fit images onto social and marketplace canvas presets

Takes a raster image, scales it to fit a target canvas, and fills the
letterboxed remainder with a background synthesized from the image's own
border (a solid tone or a vertical gradient). Output is always a JPEG with
exactly the requested dimensions.

Examples:

  framefit process photo.png -o story.jpg --preset story
  framefit process photo.png -o cover.jpg --width 1600 --height 900
  framefit process photo.png -o post.jpg --preset square_post --zoom 1.4 --offset-y -80
  framefit presets

Custom sizes are validated against configured bounds (default 50-4096 per
edge). A framefit.toml passed via --config can adjust limits, encoding
quality, the compressor budget, and add extra presets.")]
#[command(version)]
struct Cli {
    /// Path to a framefit.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process one image onto a target canvas
    Process(ProcessArgs),
    /// List available presets (built-in plus config-defined)
    Presets,
}

#[derive(clap::Args)]
struct ProcessArgs {
    /// Input image (JPEG, PNG, TIFF, or WebP)
    input: PathBuf,

    /// Output JPEG path
    #[arg(short, long)]
    output: PathBuf,

    /// Preset name (see `framefit presets`)
    #[arg(long, conflicts_with_all = ["width", "height"])]
    preset: Option<String>,

    /// Custom canvas width in pixels
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Custom canvas height in pixels
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Zoom factor (clamped to 0.5-2.0)
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Horizontal repositioning in pixels (clamped to ±200)
    #[arg(long, default_value_t = 0.0)]
    offset_x: f32,

    /// Vertical repositioning in pixels (clamped to ±200)
    #[arg(long, default_value_t = 0.0)]
    offset_y: f32,
}

impl ProcessArgs {
    fn selector(&self) -> Result<SizeSelector, String> {
        match (&self.preset, self.width, self.height) {
            (Some(name), _, _) => Ok(SizeSelector::Preset(name.clone())),
            (None, Some(w), Some(h)) => Ok(SizeSelector::Custom(TargetSize::new(w, h))),
            _ => Err("specify either --preset or both --width and --height".into()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FitterConfig::default(),
    };

    match cli.command {
        Command::Process(args) => {
            let selector = args.selector()?;
            let input = std::fs::read(&args.input)?;
            let options = ProcessOptions {
                zoom: args.zoom,
                drag: DragOffset::new(args.offset_x, args.offset_y),
            };

            let artifact = process_image(&input, &selector, &options, &config, None)?;
            std::fs::write(&args.output, &artifact.bytes)?;
            println!(
                "{} -> {} ({}x{}, {} bytes)",
                args.input.display(),
                args.output.display(),
                artifact.target.width,
                artifact.target.height,
                artifact.bytes.len()
            );
        }
        Command::Presets => {
            for preset in BUILTIN_PRESETS {
                println!(
                    "{:<16} {:>4}x{:<4}  {}",
                    preset.name, preset.width, preset.height, preset.label
                );
            }
            for (name, entry) in &config.presets {
                println!(
                    "{:<16} {:>4}x{:<4}  {}",
                    name,
                    entry.width,
                    entry.height,
                    entry.label.as_deref().unwrap_or(name)
                );
            }
            println!("{:<16} (--width/--height, 50-4096 per edge)", "custom");
        }
    }

    Ok(())
}
