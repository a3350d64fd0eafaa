//! SQL schema definitions for the wave store.
//!
//! The schema is applied as a single batch when the database is opened.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `hfrSites` - site id and display name
/// - `hfrWaveFilesMetadata` - ingested wave files and their `TableWaveMode`
/// - `hfrWaveData` - wave readings; `MWHT` in meters (999.0 = no reading),
///   `MWPD` in seconds, `WAVB`/`WNDB` bearings in degrees, `datetime` as
///   "YYYY-MM-DD HH:MM:SS" so text comparison orders chronologically
///
/// Readings are nullable: the store keeps whatever the radar files held and
/// the transform step decides what is usable.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS hfrSites (
        id INTEGER PRIMARY KEY,
        site TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hfrWaveFilesMetadata (
        id INTEGER PRIMARY KEY,
        filename TEXT NOT NULL DEFAULT '',
        TableWaveMode INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hfrWaveData (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        site_id INTEGER NOT NULL,
        file_id INTEGER NOT NULL,
        datetime TEXT,
        MWHT REAL,
        MWPD REAL,
        WAVB REAL,
        WNDB REAL,
        mwht_flag INTEGER NOT NULL DEFAULT 1
    );
    CREATE INDEX IF NOT EXISTS idx_wave_site_time ON hfrWaveData(site_id, datetime);
    CREATE INDEX IF NOT EXISTS idx_wave_file ON hfrWaveData(file_id);
    "#
}
