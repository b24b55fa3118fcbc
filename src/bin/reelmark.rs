use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "reelmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a review script and print the final state as JSON.
    Replay(ReplayArgs),
    /// Replay a review script, seek, and write the overlay as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input review script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Directory for PNGs produced by `render` steps.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input review script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Playback time in seconds.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("REELMARK_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_script(path: &Path) -> anyhow::Result<reelmark::ReviewScript> {
    reelmark::ReviewScript::from_path(path)
        .with_context(|| format!("load review script '{}'", path.display()))
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let mut backend = reelmark::CpuOverlayBackend::new();
    let report = reelmark::replay_script(&script, &mut backend)?;

    for rendered in &report.frames {
        write_png(&args.out_dir.join(&rendered.out), rendered.frame.clone())?;
    }

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &report).context("write replay report")?;
    println!();
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let mut backend = reelmark::CpuOverlayBackend::new();
    let mut replay = reelmark::Replay::run(&script, &mut backend)?;

    let session = replay.session_mut();
    let applied = session.seek(args.at);
    let frame = session.render(&mut backend)?;
    write_png(&args.out, frame)?;

    eprintln!("wrote {} at {applied:.3}s", args.out.display());
    Ok(())
}

fn write_png(path: &Path, mut frame: reelmark::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    frame.unpremultiply();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
