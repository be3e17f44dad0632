use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "concerto", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a composition to a PNG.
    Render(RenderArgs),
    /// Write the default composition as JSON.
    Init(InitArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input composition JSON. The built-in default composition is used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Seed for every random decision. Overrides the composition's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the painting, icons and font.
    /// Defaults to the composition's directory, or `.` without one.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Init(args) => cmd_init(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let comp = match &args.in_path {
        Some(path) => concerto::Composition::from_path(path)
            .with_context(|| format!("load composition '{}'", path.display()))?,
        None => concerto::Composition::default(),
    };
    comp.validate()?;

    let assets_root = args.assets.clone().unwrap_or_else(|| {
        args.in_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    });
    let assets = concerto::DirAssets::new(assets_root);

    let seed = concerto::resolve_seed(args.seed, &comp);
    tracing::info!(seed, "rendering composition");

    let frame = concerto::render_composition(&comp, &assets, seed)?;

    create_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} (seed {seed})", args.out.display());
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let json = concerto::Composition::default().to_json_pretty()?;
    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write composition '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
