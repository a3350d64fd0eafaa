//! One-shot CSV export of a query window.

use crate::StoreArgs;
use anyhow::Context;
use chrono::Local;
use clap::Args;
use hfr_chart::export::export_csv;
use hfr_data::clean;
use hfr_db::{Database, ObservationSource};
use hfr_wave::{Dataset, WaveConfig, WindowRequest};
use log::info;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Site id (defaults to the fallback site)
    #[arg(short, long)]
    pub site: Option<i64>,

    /// Start date or datetime, inclusive
    #[arg(long)]
    pub start: Option<String>,

    /// End date or datetime, inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Fetch, clean and write one window.
pub async fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    let db = args.store.open()?;
    let config = args.store.wave_config();
    let request = WindowRequest {
        site_id: args.site,
        start: args.start.clone(),
        end: args.end.clone(),
    };

    let csv = tokio::task::spawn_blocking({
        let db = db.clone();
        move || export_window(&db, &config, &request)
    })
    .await??;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("writing export to {}", path.display()))?;
            info!("export written to {}", path.display());
        }
        None => print!("{}", csv),
    }
    db.close()?;
    Ok(())
}

/// CSV for `request`, resolved against the current time.
pub fn export_window(
    db: &Database,
    config: &WaveConfig,
    request: &WindowRequest,
) -> anyhow::Result<String> {
    let window = request.resolve(Local::now().naive_local(), config)?;
    let site = db
        .site_name(window.site_id)?
        .unwrap_or_else(|| format!("site {}", window.site_id));
    info!(
        "exporting {} from {} to {}",
        site, window.start, window.end
    );

    let rows = db.fetch_observations(&window)?;
    let observations = clean(rows).context("cleaning fetched rows")?;
    let dataset = Dataset::new(0, window, observations);
    info!("{} observations exported", dataset.len());
    Ok(export_csv(&dataset)?)
}
