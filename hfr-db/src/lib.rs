//! SQLite data access layer for HF radar wave observations.
//!
//! The store holds three tables mirroring the radar wave database:
//!
//! - `hfrSites` - site id and display name
//! - `hfrWaveFilesMetadata` - one row per ingested wave file, with its `TableWaveMode`
//! - `hfrWaveData` - one row per wave reading (`MWHT`, `MWPD`, `WAVB`, `WNDB`)
//!
//! See [`schema::create_schema`] for the full SQL.
//!
//! # Usage
//!
//! ```rust
//! use hfr_db::{Database, ObservationSource};
//! use hfr_wave::QueryWindow;
//! use chrono::NaiveDate;
//!
//! let db = Database::new().unwrap();
//! db.load_sites("id,site\n28,SEAB\n").unwrap();
//! db.load_files_metadata("id,filename,TableWaveMode\n1,WVLM_SEAB.wls,2\n").unwrap();
//! db.load_wave_data(
//!     "site_id,file_id,datetime,MWHT,MWPD,WAVB,WNDB,mwht_flag\n\
//!      28,1,2018-06-02 10:00:00,1.5,8.0,120,200,1\n",
//! )
//! .unwrap();
//!
//! let day = NaiveDate::from_ymd_opt(2018, 6, 2).unwrap();
//! let window = QueryWindow::new(
//!     28,
//!     day.and_hms_opt(0, 0, 0).unwrap(),
//!     day.and_hms_opt(23, 59, 59).unwrap(),
//! );
//! let rows = db.fetch_observations(&window).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```
//!
//! Every filter value is passed to SQLite as a bound parameter.

pub mod error;
pub mod models;
pub mod schema;
mod loader;
mod queries;

pub use error::DataAccessError;

use hfr_wave::config::{QUALITY_FLAG, WAVE_MODE};
use hfr_wave::{QueryWindow, Site, WaveConfig, WaveRow};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Read interface the dashboard pipeline fetches through.
///
/// [`Database`] is the production implementation; tests substitute their
/// own to control timing and failures.
pub trait ObservationSource: Send + Sync {
    /// Quality-controlled rows for the window's site, inclusive of both bounds.
    fn fetch_observations(&self, window: &QueryWindow) -> Result<Vec<WaveRow>, DataAccessError>;

    /// Sites that have wave data, for the selector.
    fn query_sites(&self) -> Result<Vec<Site>, DataAccessError>;
}

/// Fixed row filters applied to every wave query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveFilter {
    /// Required `hfrWaveData.mwht_flag`.
    pub quality_flag: i64,
    /// Required `hfrWaveFilesMetadata.TableWaveMode`.
    pub wave_mode: i64,
}

impl Default for WaveFilter {
    fn default() -> Self {
        WaveFilter {
            quality_flag: QUALITY_FLAG,
            wave_mode: WAVE_MODE,
        }
    }
}

impl From<&WaveConfig> for WaveFilter {
    fn from(config: &WaveConfig) -> Self {
        WaveFilter {
            quality_flag: config.quality_flag,
            wave_mode: config.wave_mode,
        }
    }
}

/// Handle on the wave store.
///
/// Cheaply cloneable; clones share one connection behind a mutex, so the
/// handle can be passed to blocking tasks from any thread.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    filter: WaveFilter,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> Result<Self, DataAccessError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    /// Open (or create) a database file and apply the schema if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataAccessError> {
        let conn = Connection::open(path.as_ref())?;
        log::info!("opened wave store at {}", path.as_ref().display());
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DataAccessError> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            filter: WaveFilter::default(),
        })
    }

    /// Replace the row filters used by wave queries.
    pub fn with_filter(mut self, filter: WaveFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> WaveFilter {
        self.filter
    }

    /// Close the connection.
    ///
    /// If other clones are still alive the connection stays open until the
    /// last of them is dropped.
    pub fn close(self) -> Result<(), DataAccessError> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner().map_err(|_| DataAccessError::Poisoned)?;
                conn.close().map_err(|(_, e)| DataAccessError::Connectivity(e))?;
                log::info!("wave store closed");
            }
            Err(shared) => {
                log::debug!(
                    "wave store still held by {} handles; closing on last drop",
                    Arc::strong_count(&shared) - 1
                );
            }
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DataAccessError> {
        self.conn.lock().map_err(|_| DataAccessError::Poisoned)
    }
}

impl ObservationSource for Database {
    fn fetch_observations(&self, window: &QueryWindow) -> Result<Vec<WaveRow>, DataAccessError> {
        self.query_wave_rows(window)
    }

    fn query_sites(&self) -> Result<Vec<Site>, DataAccessError> {
        self.query_site_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        // Both should reference the same underlying connection
        db.load_sites("id,site\n28,SEAB\n").unwrap();
        db.load_files_metadata("id,filename,TableWaveMode\n1,a.wls,2\n").unwrap();
        db.load_wave_data(
            "site_id,file_id,datetime,MWHT,MWPD,WAVB,WNDB,mwht_flag\n28,1,2018-06-02 10:00:00,1.5,8.0,120,200,1\n",
        )
        .unwrap();
        let sites = db2.query_sites().unwrap();
        assert_eq!(sites.len(), 1, "Clone should see same data via shared Arc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        let sites = db.query_sites().unwrap();
        assert!(sites.is_empty(), "New database should have no sites");
    }

    #[test]
    fn database_file_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waves.sqlite");

        let db = Database::open(&path).unwrap();
        db.load_sites("id,site\n28,SEAB\n").unwrap();
        db.close().unwrap();

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.site_name(28).unwrap().as_deref(), Some("SEAB"));
        reopened.close().unwrap();
    }

    #[test]
    fn close_with_live_clone_is_ok() {
        let db = Database::new().unwrap();
        let other = db.clone();
        assert!(db.close().is_ok());
        // The surviving clone still works.
        assert!(other.query_site_list().unwrap().is_empty());
    }

    #[test]
    fn filter_comes_from_config() {
        let config = WaveConfig {
            quality_flag: 3,
            wave_mode: 4,
            ..WaveConfig::default()
        };
        let db = Database::new().unwrap().with_filter(WaveFilter::from(&config));
        assert_eq!(db.filter(), WaveFilter { quality_flag: 3, wave_mode: 4 });
    }
}
