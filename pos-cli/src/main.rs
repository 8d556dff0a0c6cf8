//! posfx CLI
//!
//! Command-line driver for converting point-of-sale transactions with
//! base-relative rate histories:
//! - Load configuration from environment and flags
//! - Build a trend store from a rates file (or the built-in demo)
//! - Convert transactions or print the stored trends

mod config;
mod demo;
mod updates;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pos_convert::ConversionEngine;
use pos_types::PosTransaction;
use trend_store::TrendStore;

use config::Config;

#[derive(Parser)]
#[command(name = "posfx")]
#[command(author, version, about = "Point-of-sale currency conversion CLI", long_about = None)]
struct Cli {
    /// Currency every rate is quoted against (overrides POSFX_BASE_CURRENCY)
    #[arg(long)]
    base_currency: Option<String>,

    /// chrono format for time strings (overrides POSFX_TIME_FORMAT)
    #[arg(long)]
    time_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demonstration scenario
    Demo,
    /// Convert one transaction using rates from a file
    Convert {
        /// JSON rates file
        #[arg(long, env = "POSFX_RATES_FILE")]
        rates: PathBuf,
        /// Transaction amount
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Transaction currency
        #[arg(long)]
        currency: String,
        /// Transaction time
        #[arg(long)]
        at: String,
        /// Target currency
        #[arg(long)]
        to: String,
    },
    /// Print the trends built from a rates file
    Trends {
        /// JSON rates file
        #[arg(long, env = "POSFX_RATES_FILE")]
        rates: PathBuf,
    },
}

fn load_store(path: &Path, config: &Config) -> Result<TrendStore> {
    let store = TrendStore::new(config.base_currency.as_str())?;
    let updates = updates::load(path)?;
    updates::apply(&store, &updates, config)?;
    Ok(store)
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,pos_cli=info,trend_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.base_currency, cli.time_format)?;
    tracing::debug!(base = %config.base_currency, "Configuration loaded");

    match cli.command {
        Commands::Demo => demo::run(&config)?,

        Commands::Convert {
            rates,
            amount,
            currency,
            at,
            to,
        } => {
            let engine = ConversionEngine::new(load_store(&rates, &config)?);
            let tx = PosTransaction::new(amount, currency, config.parse_time(&at)?);
            let converted = engine.convert(&tx, &to)?;
            println!("{}", serde_json::to_string_pretty(&converted)?);
        }

        Commands::Trends { rates } => {
            let store = load_store(&rates, &config)?;
            let snapshot = store.snapshot();
            let ordered: BTreeMap<_, _> = snapshot.iter().collect();
            println!("{}", serde_json::to_string_pretty(&ordered)?);
        }
    }

    Ok(())
}
