//! CSV data loading functions for populating the wave store.
//!
//! Each loader parses CSV data from a string slice and inserts rows into
//! the corresponding table. Used by the `seed` command and by tests.
//!
//! # CSV Formats (all with headers)
//!
//! - **Sites**: `id,site`
//! - **Wave files**: `id,filename,TableWaveMode`
//! - **Wave data**: `site_id,file_id,datetime,MWHT,MWPD,WAVB,WNDB,mwht_flag`
//!
//! Blank measurement fields are stored as NULL. A blank `mwht_flag` means
//! the row passed quality control.

use crate::{DataAccessError, Database};
use hfr_utils::dates;
use hfr_wave::config::QUALITY_FLAG;
use rusqlite::params;

impl Database {
    /// Load site metadata from CSV string in a single transaction.
    ///
    /// # Example CSV
    /// ```text
    /// id,site
    /// 28,SEAB
    /// ```
    pub fn load_sites(&self, csv_data: &str) -> Result<usize, DataAccessError> {
        let mut conn = self.lock()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let tx = conn.transaction()?;
        let mut count = 0usize;
        for result in rdr.records() {
            let r = result?;
            let id = required_i64("id", r.get(0).unwrap_or(""))?;
            let site = r.get(1).unwrap_or("").trim();

            tx.execute(
                "INSERT OR REPLACE INTO hfrSites (id, site) VALUES (?1, ?2)",
                params![id, site],
            )?;
            count += 1;
        }
        tx.commit()?;
        log::info!("loader: loaded {} sites", count);
        Ok(count)
    }

    /// Load wave file metadata from CSV string in a single transaction.
    ///
    /// # Example CSV
    /// ```text
    /// id,filename,TableWaveMode
    /// 1,WVLM_SEAB_2018_06_02.wls,2
    /// ```
    pub fn load_files_metadata(&self, csv_data: &str) -> Result<usize, DataAccessError> {
        let mut conn = self.lock()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let tx = conn.transaction()?;
        let mut count = 0usize;
        for result in rdr.records() {
            let r = result?;
            let id = required_i64("id", r.get(0).unwrap_or(""))?;
            let filename = r.get(1).unwrap_or("").trim();
            let mode = required_i64("TableWaveMode", r.get(2).unwrap_or(""))?;

            tx.execute(
                "INSERT OR REPLACE INTO hfrWaveFilesMetadata (id, filename, TableWaveMode)
                 VALUES (?1, ?2, ?3)",
                params![id, filename, mode],
            )?;
            count += 1;
        }
        tx.commit()?;
        log::info!("loader: loaded {} wave file records", count);
        Ok(count)
    }

    /// Load wave readings from CSV string in a single transaction.
    ///
    /// Timestamps are normalised to "YYYY-MM-DD HH:MM:SS" so range queries
    /// compare correctly.
    ///
    /// # Example CSV
    /// ```text
    /// site_id,file_id,datetime,MWHT,MWPD,WAVB,WNDB,mwht_flag
    /// 28,1,2018-06-02 10:00:00,1.52,8.1,135,210,1
    /// 28,1,2018-06-02 10:30:00,999,8.3,140,215,1
    /// ```
    pub fn load_wave_data(&self, csv_data: &str) -> Result<usize, DataAccessError> {
        let mut conn = self.lock()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let tx = conn.transaction()?;
        let mut count = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO hfrWaveData
                 (site_id, file_id, datetime, MWHT, MWPD, WAVB, WNDB, mwht_flag)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let site_id = required_i64("site_id", r.get(0).unwrap_or(""))?;
                let file_id = required_i64("file_id", r.get(1).unwrap_or(""))?;
                let datetime = normalise_datetime(r.get(2).unwrap_or(""))?;
                let height = optional_f64("MWHT", r.get(3).unwrap_or(""))?;
                let period = optional_f64("MWPD", r.get(4).unwrap_or(""))?;
                let wave_bearing = optional_f64("WAVB", r.get(5).unwrap_or(""))?;
                let wind_bearing = optional_f64("WNDB", r.get(6).unwrap_or(""))?;
                let flag = match r.get(7).map(str::trim) {
                    None | Some("") => QUALITY_FLAG,
                    Some(raw) => required_i64("mwht_flag", raw)?,
                };

                stmt.execute(params![
                    site_id,
                    file_id,
                    datetime,
                    height,
                    period,
                    wave_bearing,
                    wind_bearing,
                    flag
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("loader: loaded {} wave readings", count);
        Ok(count)
    }
}

fn required_i64(column: &'static str, raw: &str) -> Result<i64, DataAccessError> {
    raw.trim().parse().map_err(|_| DataAccessError::Parse {
        column,
        value: raw.to_string(),
    })
}

fn optional_f64(column: &'static str, raw: &str) -> Result<Option<f64>, DataAccessError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| DataAccessError::Parse {
        column,
        value: raw.to_string(),
    })
}

fn normalise_datetime(raw: &str) -> Result<Option<String>, DataAccessError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let parsed = dates::parse_datetime(raw).map_err(|_| DataAccessError::Parse {
        column: "datetime",
        value: raw.to_string(),
    })?;
    Ok(Some(dates::format_datetime(&parsed)))
}
