mod app;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use fsorbit::Config;
use fsorbit::fs::IgnoreList;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory to visualize.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// JSON file overriding physics, layout and marker settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Scan once instead of following changes on disk.
    #[arg(long)]
    no_watch: bool,

    /// Extra entry names to skip, in addition to .git, target and node_modules.
    #[arg(long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("cannot open {}", args.path.display()))?;
    let ignore = IgnoreList::default().with(args.ignore.clone());
    let watch = !args.no_watch;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "fsorbit",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::OrbitApp::new(
                cc,
                root.clone(),
                ignore.clone(),
                config,
                watch,
            )))
        }),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}
