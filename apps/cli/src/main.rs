//! Ferrocast CLI: operational jobs for the forecast platform.
//!
//! `ferrocast ingest` pulls historical observations from FRED into the
//! history store; `ferrocast train` fits a model per series and persists
//! the artifacts through the configured storage backend, which is exactly
//! what the serving path later loads.

mod commands;
mod fred;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ferrocast_store::{open_store, Database, StoreConfig};
use fred::FredClient;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "ferrocast",
    author,
    version,
    about = "Ferrocast - material price forecasting jobs"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch historical observations from FRED into the history store
    ///
    /// Idempotent per series: existing rows are replaced in one
    /// transaction. Requires FRED_API_KEY and DATABASE_URL.
    Ingest {
        /// Override the built-in FRED-code=series-id mappings
        #[arg(long = "series", value_name = "CODE=ID")]
        series: Vec<String>,
    },

    /// Fit and persist forecast models from stored history
    ///
    /// Writes a (model, manifest) pair per series through the storage
    /// backend selected by ARTIFACT_STORAGE_MODE.
    Train {
        /// Train a single series instead of all of them
        #[arg(long)]
        series: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let level = args.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let db = Database::open(&database_url).context("opening history database")?;

    match args.command {
        Command::Ingest { series } => {
            let api_key = std::env::var("FRED_API_KEY").context("FRED_API_KEY not set")?;
            let client = FredClient::new(api_key);
            let mappings = commands::ingest::resolve_mappings(&series)?;
            commands::ingest::run(&db, &client, &mappings).await
        }
        Command::Train { series } => {
            let store_config = StoreConfig::from_env().context("artifact store configuration")?;
            let store = open_store(&store_config).await.context("opening artifact store")?;
            commands::train::run(&db, store.as_ref(), series).await
        }
    }
}
