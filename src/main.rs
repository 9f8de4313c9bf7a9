//! Backgammon GUI
//!
//! A graphical interface for playing backgammon against the AI or another
//! player on the same screen.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use backgammon::ui::BackgammonApp;
use backgammon::{GameConfig, PlayerId};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON game configuration; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Two human players, no AI
    #[arg(long)]
    hotseat: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("backgammon=info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.hotseat {
        config.ai_side = PlayerId::None;
    }
    info!(?config, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([820.0, 560.0])
            .with_title("Backgammon"),
        ..Default::default()
    };

    eframe::run_native(
        "Backgammon",
        options,
        Box::new(move |cc| Ok(Box::new(BackgammonApp::new(cc, config)))),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}
