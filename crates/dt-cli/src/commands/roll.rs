use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dt_core::{DiceGroup, RollOutcome, RollRequest};
use dt_engine::{DiceEngine, EngineConfig, HistoryLedger};

/// Arguments of `dtower roll`.
pub struct RollOptions {
    pub exprs: Vec<String>,
    pub modifier: i32,
    pub seed: Option<u64>,
    pub times: u32,
    pub spin_ms: Option<u64>,
    pub fps: Option<f32>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub json: bool,
}

pub fn run(opts: &RollOptions) -> Result<(), String> {
    let config = engine_config(opts)?;
    let budget = config.frame_budget();
    let mut engine = DiceEngine::new(config).map_err(|e| e.to_string())?;

    let groups = opts
        .exprs
        .iter()
        .map(|expr| DiceGroup::parse(expr))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    let request = engine
        .compose_request(&groups, opts.modifier)
        .map_err(|e| e.to_string())?;

    if opts.verbose && !opts.json {
        engine.on_phase_change(|phase| {
            let label = format!("[{phase}]").dimmed();
            println!("  {label}");
        });
    }

    for _ in 0..opts.times {
        engine
            .begin_roll(request.clone())
            .map_err(|e| e.to_string())?;
        let outcome = engine
            .run_until_settled(budget)
            .ok_or_else(|| format!("roll did not settle within {budget} frames"))?;
        if !opts.json {
            print_outcome(&request, outcome);
        }
    }

    if opts.json {
        let json = serde_json::to_string_pretty(engine.history())
            .map_err(|e| format!("cannot serialize history: {e}"))?;
        println!("{json}");
    } else if opts.times > 1 {
        println!();
        print_history(engine.history());
    }

    Ok(())
}

/// Config file (if any) with command-line overrides applied.
fn engine_config(opts: &RollOptions) -> Result<EngineConfig, String> {
    let mut config = match &opts.config {
        Some(path) => EngineConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if let Some(ms) = opts.spin_ms {
        config = config.with_spin_duration(Duration::from_millis(ms));
    }
    if let Some(fps) = opts.fps {
        config = config.with_frame_rate(fps);
    }
    Ok(config)
}

fn print_outcome(request: &RollRequest, outcome: &RollOutcome) {
    println!(
        "  {} {} {}",
        request.expression().bold(),
        "=>".dimmed(),
        outcome.total().to_string().green().bold()
    );
    println!("    {}", outcome.breakdown().dimmed());
}

fn print_history(history: &HistoryLedger) {
    println!("  {}", "Roll History".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Roll", "Dice", "Total"]);
    for entry in history.entries() {
        table.add_row(vec![
            entry.display_time(),
            entry.expression.clone(),
            entry.outcome.breakdown(),
            entry.outcome.total().to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} of the last {} rolls", history.len(), history.capacity());
}
