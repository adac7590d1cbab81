//! Search a single position from the command line.
//!
//! ```text
//! gambit [FEN] [MILLIS] [name=value ...]
//! ```
//!
//! The FEN defaults to the starting position and the budget to five seconds.
//! Any `name=value` argument sets an engine tunable. Logging follows
//! `RUST_LOG` and goes to stderr; the chosen move goes to stdout.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gambit_core::{Position, STARTING_FEN};
use gambit_engine::{ChosenMove, EngineConfig, SearchControl, Searcher};

const DEFAULT_MILLIS: u64 = 5_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut fen = None;
    let mut millis = None;
    let mut pairs = Vec::new();
    for arg in std::env::args().skip(1) {
        if let Some((name, value)) = arg.split_once('=') {
            pairs.push((name.to_string(), value.to_string()));
        } else if fen.is_none() && arg.contains('/') {
            fen = Some(arg);
        } else if millis.is_none() {
            millis = Some(arg.parse::<u64>().with_context(|| format!("invalid time budget \"{arg}\""))?);
        } else {
            bail!("unexpected argument \"{arg}\"");
        }
    }

    let config = EngineConfig::from_pairs(pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())))?;
    let fen = fen.unwrap_or_else(|| STARTING_FEN.to_string());
    let root: Position = fen.parse().with_context(|| format!("invalid FEN \"{fen}\""))?;
    let budget = Duration::from_millis(millis.unwrap_or(DEFAULT_MILLIS));

    info!(%fen, budget_ms = budget.as_millis() as u64, max_depth = config.max_depth, "gambit starting");

    let mut searcher = Searcher::new(config);
    let control = SearchControl::new(budget);
    let result = searcher.id_search(&root, &[], &control);
    let stats = searcher.stats();

    info!(
        score = result.score,
        depth = result.depth,
        elapsed_ms = control.elapsed().as_millis() as u64,
        expanded = stats.expanded,
        pruned = stats.pruned,
        non_quiescent = stats.non_quiescent,
        "search finished"
    );

    match result.best_move {
        Some(mv) => println!("{}", ChosenMove::from(mv)),
        None => println!("(none)"),
    }
    Ok(())
}
