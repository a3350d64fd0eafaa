//! Load CSV fixtures into a SQLite wave store.

use crate::StoreArgs;
use anyhow::Context;
use clap::Args;
use hfr_db::{Database, ObservationSource};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Sites CSV (`id,site`)
    #[arg(long, default_value = "fixtures/sites.csv")]
    pub sites: PathBuf,

    /// Wave file metadata CSV (`id,filename,TableWaveMode`)
    #[arg(long, default_value = "fixtures/wave_files.csv")]
    pub files: PathBuf,

    /// Wave readings CSV (`site_id,file_id,datetime,MWHT,MWPD,WAVB,WNDB,mwht_flag`)
    #[arg(long, default_value = "fixtures/wave_data.csv")]
    pub waves: PathBuf,
}

pub fn run_seed(args: &SeedArgs) -> anyhow::Result<()> {
    let db = args.store.open()?;
    seed(&db, &args.sites, &args.files, &args.waves)?;
    db.close()?;
    Ok(())
}

/// Load the three CSV files into `db` and log what each site now holds.
pub fn seed(db: &Database, sites: &Path, files: &Path, waves: &Path) -> anyhow::Result<usize> {
    let n = db.load_sites(&read(sites)?)?;
    info!("{} sites loaded from {}", n, sites.display());
    let n = db.load_files_metadata(&read(files)?)?;
    info!("{} wave files loaded from {}", n, files.display());
    let loaded = db.load_wave_data(&read(waves)?)?;
    info!("{} wave rows loaded from {}", loaded, waves.display());

    for site in db.query_sites()? {
        if let Some(span) = db.query_wave_span(site.id)? {
            info!(
                "{} ({}): {} rows from {} to {}",
                site.name, span.site_id, span.rows, span.first, span.last
            );
        }
    }
    info!("store now holds {} wave rows", db.count_wave_rows()?);
    Ok(loaded)
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
