use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use txn_series::cli::{handle_aggregate_command, handle_rollup_command, AggregateArgs, RollupArgs};
use txn_series::config::{SeriesPaths, Settings};

#[derive(Parser)]
#[command(
    name = "txn-series",
    author = "Kaylee Beyene",
    version,
    about = "Turns ordered bank transaction events into chart-ready series",
    long_about = "txn-series reads transaction events (amount, balance, concept, group \
                  and entity tags) and derives running-total series: incoming and \
                  spending evolution, account balance evolution, and per-group or \
                  per-entity accumulations, plus per-month and per-year totals."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate an event file into series
    #[command(alias = "agg")]
    Aggregate(AggregateArgs),

    /// Sum amounts per month or year by group or entity
    Rollup(RollupArgs),

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool, settings: &Settings) {
    let filter = if verbose {
        EnvFilter::new("txn_series=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("txn_series={}", settings.log_level)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SeriesPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_logging(cli.verbose, &settings);

    match cli.command {
        Some(Commands::Aggregate(args)) => {
            handle_aggregate_command(&settings, args)?;
        }
        Some(Commands::Rollup(args)) => {
            handle_rollup_command(&settings, args)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("txn-series Configuration");
            println!("========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!(
                "Settings file:    {}{}",
                paths.settings_file().display(),
                if paths.is_initialized() { "" } else { " (not created)" }
            );
            println!();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        None => {
            println!("txn-series - transaction events to chart series");
            println!();
            println!("Run 'txn-series --help' for usage information.");
            println!("Run 'txn-series aggregate <events.json>' to build series.");
        }
    }

    Ok(())
}
