use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spotlight", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an overlay PNG from a screenshot and a captured UI tree.
    Render(RenderArgs),
    /// Print how each step resolves against a captured UI tree.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Screenshot to draw the overlay over.
    #[arg(long)]
    snapshot: PathBuf,

    /// Captured UI tree JSON.
    #[arg(long)]
    tree: PathBuf,

    /// Tutorial JSON (config and steps).
    #[arg(long)]
    config: PathBuf,

    /// Font file used to shape and draw tooltip text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Pixels per dp.
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Captured UI tree JSON.
    #[arg(long)]
    tree: PathBuf,

    /// Tutorial JSON (config and steps).
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn load_tree(path: &Path) -> anyhow::Result<spotlight::UiNode> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read UI tree '{}'", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse UI tree '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut tutorial = spotlight::Tutorial::from_path(&args.config)?;
    if let Some(font) = &args.font {
        let bytes =
            std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
        tutorial.config.style = tutorial
            .config
            .style
            .with_font(spotlight::FontBytes::new(bytes));
    }
    let density = spotlight::Density::new(args.density)?;
    let tree = load_tree(&args.tree)?;

    let screenshot = image::open(&args.snapshot)
        .with_context(|| format!("open snapshot '{}'", args.snapshot.display()))?
        .to_rgba8();
    let snapshot = spotlight::Snapshot::from_rgba_image(screenshot)?;

    let targets = spotlight::resolve_all(&tree, &tutorial.steps);
    if targets.is_empty() {
        anyhow::bail!("no step resolved to an on-screen target");
    }
    tracing::info!(
        resolved = targets.len(),
        steps = tutorial.steps.len(),
        "targets resolved"
    );

    let overlay = spotlight::render_overlay(
        snapshot,
        &targets,
        tutorial.config.overlay_color,
        &tutorial.config.style,
        density,
    );

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    overlay
        .to_rgba_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let tutorial = spotlight::Tutorial::from_path(&args.config)?;
    let tree = load_tree(&args.tree)?;

    for (index, (step, outcome)) in tutorial
        .steps
        .iter()
        .zip(spotlight::resolve_each(&tree, &tutorial.steps))
        .enumerate()
    {
        match outcome {
            spotlight::StepResolution::Resolved(t) => println!(
                "step {index} {}: resolved ({}, {}, {}, {})",
                step.selector(),
                t.rect.left,
                t.rect.top,
                t.rect.right,
                t.rect.bottom
            ),
            other => println!("step {index} {}: {}", step.selector(), other.label()),
        }
    }
    Ok(())
}
