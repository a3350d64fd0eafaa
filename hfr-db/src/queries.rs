//! Typed query methods for retrieving wave data from the store.
//!
//! Every value that comes from a request (site, time bounds) or from
//! configuration (quality flag, wave mode) is bound as a parameter.

use crate::models::WaveSpan;
use crate::{DataAccessError, Database};
use hfr_utils::dates;
use hfr_wave::{QueryWindow, Site, WaveRow};
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Wave readings for one site within an inclusive time range.
    ///
    /// Joins `hfrWaveData` to `hfrWaveFilesMetadata` so only rows from files
    /// in the configured wave mode are returned, and left-joins `hfrSites`
    /// for the display name. A window whose start is after its end simply
    /// matches nothing.
    pub(crate) fn query_wave_rows(
        &self,
        window: &QueryWindow,
    ) -> Result<Vec<WaveRow>, DataAccessError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT wd.MWHT, wd.MWPD, wd.WAVB, wd.WNDB, wd.datetime, wd.site_id, s.site
             FROM hfrWaveData AS wd
             INNER JOIN hfrWaveFilesMetadata AS md ON wd.file_id = md.id
             LEFT JOIN hfrSites AS s ON wd.site_id = s.id
             WHERE wd.mwht_flag = ?1
               AND md.TableWaveMode = ?2
               AND wd.site_id = ?3
               AND wd.datetime BETWEEN ?4 AND ?5
             ORDER BY wd.datetime",
        )?;
        let start = dates::format_datetime(&window.start);
        let end = dates::format_datetime(&window.end);
        let rows = stmt
            .query_map(
                params![
                    self.filter.quality_flag,
                    self.filter.wave_mode,
                    window.site_id,
                    start,
                    end
                ],
                |row| {
                    Ok(WaveRow {
                        height_m: row.get(0)?,
                        period_s: row.get(1)?,
                        wave_bearing: row.get(2)?,
                        wind_bearing: row.get(3)?,
                        datetime: row.get(4)?,
                        site_id: row.get(5)?,
                        site_name: row.get(6)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: site {} from {} to {} returned {} rows",
            window.site_id,
            start,
            end,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct sites that have wave readings, ordered by name.
    pub(crate) fn query_site_list(&self) -> Result<Vec<Site>, DataAccessError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT s.id, s.site
             FROM hfrWaveData AS wd
             INNER JOIN hfrSites AS s ON wd.site_id = s.id
             ORDER BY s.site",
        )?;
        let sites = stmt
            .query_map([], |row| {
                Ok(Site {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: {} sites with wave data", sites.len());
        Ok(sites)
    }

    /// Display name of a site, if it is known.
    pub fn site_name(&self, site_id: i64) -> Result<Option<String>, DataAccessError> {
        let conn = self.lock()?;
        let name = conn
            .query_row(
                "SELECT site FROM hfrSites WHERE id = ?1",
                params![site_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }

    /// First/last reading times and row count for a site, ignoring filters.
    pub fn query_wave_span(&self, site_id: i64) -> Result<Option<WaveSpan>, DataAccessError> {
        let conn = self.lock()?;
        let span = conn.query_row(
            "SELECT MIN(datetime), MAX(datetime), COUNT(*)
             FROM hfrWaveData
             WHERE site_id = ?1 AND datetime IS NOT NULL",
            params![site_id],
            |row| {
                let first: Option<String> = row.get(0)?;
                let last: Option<String> = row.get(1)?;
                let rows: i64 = row.get(2)?;
                Ok(first.zip(last).map(|(first, last)| WaveSpan {
                    site_id,
                    first,
                    last,
                    rows,
                }))
            },
        )?;
        Ok(span)
    }

    /// Total number of wave readings in the store.
    pub fn count_wave_rows(&self) -> Result<i64, DataAccessError> {
        let conn = self.lock()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM hfrWaveData", [], |row| row.get(0))?)
    }
}
