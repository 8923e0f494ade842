use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

use svga::{
    ContentScale, CpuSurface, DynamicOverrides, FrameCompositor, PlaybackConfig, PlaybackState,
    Size, SvgaLoader, parse_path, print_path,
};

#[derive(Parser, Debug)]
#[command(name = "svga", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of an SVGA file.
    Info(InfoArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Normalise a path-language string.
    Path(PathArgs),
    /// Simulate playback and print the frame sequence.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input SVGA file.
    file: PathBuf,

    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input SVGA file.
    file: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: i32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output width; defaults to the document canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Output height; defaults to the document canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Content scale mode (fit, crop, fill, fill-bounds, none, inside, fill-width, fill-height).
    #[arg(long, default_value = "fit")]
    scale: ContentScale,

    /// Hide the sprite with this image key (repeatable).
    #[arg(long = "hide")]
    hide: Vec<String>,
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Path data, e.g. "M0 0 L10 10 Z".
    d: String,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input SVGA file.
    file: PathBuf,

    /// Playback config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick rate in Hz; defaults to the document fps.
    #[arg(long)]
    fps_clock: Option<u32>,

    /// Stop after this many ticks (infinite loops never complete).
    #[arg(long, default_value_t = 1000)]
    max_ticks: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Path(args) => cmd_path(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load(file: &std::path::Path) -> anyhow::Result<svga::Document> {
    SvgaLoader::new()
        .load_file(file)
        .with_context(|| format!("load '{}'", file.display()))
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let summary = load(&args.file)?.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("version: {}", summary.version);
    println!("canvas:  {}x{}", summary.width, summary.height);
    println!("fps:     {}", summary.fps);
    println!("frames:  {}", summary.frames);
    println!(
        "sprites: {} ({} matte)",
        summary.sprites, summary.matte_sprites
    );
    println!("images:  {}", summary.images);
    println!("audios:  {}", summary.audios);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = Arc::new(load(&args.file)?);
    let width = args
        .width
        .unwrap_or_else(|| doc.canvas_size.width.round().max(1.0) as u32);
    let height = args
        .height
        .unwrap_or_else(|| doc.canvas_size.height.round().max(1.0) as u32);

    let mut overrides = DynamicOverrides::new();
    for key in &args.hide {
        overrides.set_hidden(true, key.clone());
    }

    let mut surface = CpuSurface::new(width, height)?;
    let mut compositor = FrameCompositor::new(doc);
    compositor.render(
        args.frame,
        Size::new(f64::from(width), f64::from(height)),
        args.scale,
        &overrides,
        &mut surface,
    );
    let frame = surface.finish();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_unpremultiplied(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    println!("{}", print_path(&parse_path(&args.d)));
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let doc = Arc::new(load(&args.file)?);
    let config = match &args.config {
        Some(path) => PlaybackConfig::from_json_path(path)?,
        None => PlaybackConfig::default(),
    };

    let clock = args
        .fps_clock
        .unwrap_or_else(|| u32::try_from(doc.fps).unwrap_or(0));
    anyhow::ensure!(clock > 0, "tick rate must be positive (document fps is {})", doc.fps);
    let delta = 1_000_000_000 / u64::from(clock);

    let mut state = PlaybackState::new(doc, config)?;
    if !state.is_playing() {
        state.play();
    }

    println!("tick\tframe\tprogress");
    for tick in 1..=args.max_ticks {
        state.advance_frame(delta);
        println!(
            "{tick}\t{}\t{:.3}",
            state.current_frame(),
            state.progress()
        );
        if state.is_completed() {
            break;
        }
    }
    eprintln!(
        "phase: {:?}, completed loops: {}",
        state.phase(),
        state.completed_loops()
    );
    Ok(())
}
