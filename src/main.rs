//! prediction-tracker: record forecasts, mark outcomes, report calibration
//!
//! With no mode flag, prints the statistics summary followed by the pending
//! list.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::{debug, info};

use prediction_tracker::cli::{display, interactive_add, interactive_evaluate, Prompter};
use prediction_tracker::config::Config;
use prediction_tracker::logging;
use prediction_tracker::store::{today, PredictionStore};

#[derive(Parser)]
#[command(name = "prediction-tracker")]
#[command(about = "Track forecasts and score them once they resolve")]
#[command(group(ArgGroup::new("mode").args(["add", "evaluate", "pending", "stats"])))]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "prediction-tracker.toml")]
    config: PathBuf,

    /// Prediction document (overrides config file)
    #[arg(short, long, env = "PREDICTION_TRACKER_DATA")]
    data_file: Option<PathBuf>,

    /// Add a new prediction interactively
    #[arg(long)]
    add: bool,

    /// Record the outcome of a prediction
    #[arg(long, value_name = "ID")]
    evaluate: Option<String>,

    /// List pending predictions by due date
    #[arg(long)]
    pending: bool,

    /// Show accuracy and Brier score
    #[arg(long)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();

    let (mut config, found) = Config::load_or_default(&cli.config)?;
    if found {
        info!("Config file: {}", cli.config.display());
    } else {
        debug!("Config file {} not found, using defaults", cli.config.display());
    }

    // Apply CLI overrides
    if let Some(data_file) = cli.data_file {
        config.storage.path = data_file;
    }

    let mut store = PredictionStore::open(&config.storage.path)?;

    if cli.add {
        let mut prompter = Prompter::stdio();
        interactive_add(&mut store, &mut prompter, &config.display, today())?;
    } else if let Some(id) = cli.evaluate {
        let mut prompter = Prompter::stdio();
        interactive_evaluate(&mut store, &mut prompter, &id, today())?;
    } else if cli.pending {
        print_pending(&store, &config);
    } else if cli.stats {
        println!("{}", display::format_stats(&store.stats()));
    } else {
        println!("{}", display::format_stats(&store.stats()));
        println!();
        print_pending(&store, &config);
    }

    Ok(())
}

fn print_pending(store: &PredictionStore, config: &Config) {
    let pending = store.list_pending();
    println!(
        "{}",
        display::format_pending(&pending, config.display.statement_preview)
    );
}
