//! Standalone TUI binary for Dicetower.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use dt_core::DieKind;
use dt_engine::{DiceEngine, EngineConfig};

#[derive(Parser)]
#[command(
    name = "dtower-tui",
    about = "Terminal dice tray for Dicetower",
    version
)]
struct Args {
    /// Die selected at startup (d4, d6, d8, d10, d12, d20, d100)
    #[arg(long, default_value = "d20")]
    die: String,

    /// RNG seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Spin time before the outcome is drawn, in milliseconds
    #[arg(long)]
    spin_ms: Option<u64>,

    /// JSON engine config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write engine logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs only go to a file; stderr would draw over the alternate screen.
fn init_tracing(path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("{}: {e}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dt_engine=debug")),
        )
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn build_engine(args: &Args) -> Result<DiceEngine, String> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = args.spin_ms {
        config = config.with_spin_duration(Duration::from_millis(ms));
    }
    let mut engine = DiceEngine::new(config).map_err(|e| e.to_string())?;
    let die = DieKind::from_id(&args.die).map_err(|e| e.to_string())?;
    engine.preview_die(die);
    Ok(engine)
}

fn main() {
    let args = Args::parse();

    let result = args
        .log_file
        .as_deref()
        .map_or(Ok(()), init_tracing)
        .and_then(|()| build_engine(&args))
        .and_then(|engine| dt_tui::terminal::run(dt_tui::app::DiceApp::new(engine)));

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
