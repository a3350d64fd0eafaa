//! Command implementations for the HFR wave viewer CLI.
//!
//! Provides subcommands to serve the dashboard, export one window as CSV,
//! and seed a SQLite store from CSV files. Every option can also be set
//! through an `HFR_*` environment variable.

use clap::{Args, Subcommand};
use hfr_db::{Database, WaveFilter};
use hfr_wave::config::{
    DEFAULT_WINDOW_DAYS, FALLBACK_SITE_ID, QUALITY_FLAG, REFRESH_INTERVAL_SECS, WAVE_MODE,
};
use hfr_wave::WaveConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod export;
pub mod seed;
pub mod server;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard over HTTP (default)
    Serve(ServeArgs),

    /// Fetch one window and write it as CSV
    Export(export::ExportArgs),

    /// Load sites, file metadata and wave rows from CSV into a store
    Seed(seed::SeedArgs),
}

/// Where the store lives and how rows are filtered.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// SQLite database file
    #[arg(long, env = "HFR_DB_PATH", default_value = "hfr-waves.sqlite")]
    pub db_path: PathBuf,

    /// Site queried when none is selected
    #[arg(long, env = "HFR_FALLBACK_SITE", default_value_t = FALLBACK_SITE_ID)]
    pub fallback_site: i64,

    /// Required mwht_flag value
    #[arg(long, env = "HFR_QUALITY_FLAG", default_value_t = QUALITY_FLAG)]
    pub quality_flag: i64,

    /// Required TableWaveMode value
    #[arg(long, env = "HFR_WAVE_MODE", default_value_t = WAVE_MODE)]
    pub wave_mode: i64,

    /// Length of the default trailing window in days
    #[arg(long, env = "HFR_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window_days: i64,
}

impl StoreArgs {
    pub fn wave_config(&self) -> WaveConfig {
        WaveConfig {
            quality_flag: self.quality_flag,
            wave_mode: self.wave_mode,
            fallback_site_id: self.fallback_site,
            window_days: self.window_days,
            ..WaveConfig::default()
        }
    }

    pub fn open(&self) -> anyhow::Result<Database> {
        let db = Database::open(&self.db_path)?;
        Ok(db.with_filter(WaveFilter::from(&self.wave_config())))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Address to listen on
    #[arg(long, env = "HFR_BIND", default_value = "127.0.0.1:8050")]
    pub bind: SocketAddr,

    /// Seconds between dashboard auto-refreshes
    #[arg(long, env = "HFR_REFRESH_SECS", default_value_t = REFRESH_INTERVAL_SECS)]
    pub refresh_secs: u64,

    /// Seconds a session may sit idle before it is dropped
    #[arg(long, env = "HFR_SESSION_TTL_SECS", default_value_t = 30 * 60)]
    pub session_ttl_secs: u64,
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve(args) => server::run_server(args).await,
        Command::Export(args) => export::run_export(args).await,
        Command::Seed(args) => seed::run_seed(&args),
    }
}
