//! CLI frontend for the Dicetower roll engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "dtower",
    about = "Dicetower: roll polyhedral dice from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported die kinds and their faces
    Kinds,

    /// Roll one or more dice groups, e.g. `dtower roll 2d6 d4 -m 3`
    Roll {
        /// Dice groups such as 2d6, d20, 1d100
        #[arg(required = true)]
        exprs: Vec<String>,

        /// Flat modifier added to the total
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        modifier: i32,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of times to roll
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,

        /// Spin time before the outcome is drawn, in milliseconds
        #[arg(long)]
        spin_ms: Option<u64>,

        /// Simulation frame rate
        #[arg(long)]
        fps: Option<f32>,

        /// JSON engine config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print phase transitions and engine debug logs
        #[arg(short, long)]
        verbose: bool,

        /// Print the roll history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show each face of a die and the orientation that puts it on top
    Faces {
        /// Die id, e.g. d20 or d%
        die: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,dt_engine=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Roll { verbose: true, .. });
    init_tracing(verbose);

    let result = match cli.command {
        Commands::Kinds => commands::kinds::run(),
        Commands::Roll {
            exprs,
            modifier,
            seed,
            times,
            spin_ms,
            fps,
            config,
            verbose,
            json,
        } => commands::roll::run(&commands::roll::RollOptions {
            exprs,
            modifier,
            seed,
            times,
            spin_ms,
            fps,
            config,
            verbose,
            json,
        }),
        Commands::Faces { die } => commands::faces::run(&die),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
