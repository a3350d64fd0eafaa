//! The site and time range of one fetch, and how user input resolves to it.

use crate::config::{latest_date, WaveConfig};
use chrono::{NaiveDate, NaiveDateTime};
use hfr_utils::dates;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Site + inclusive time range defining one data fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWindow {
    pub site_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryWindow {
    pub fn new(site_id: i64, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        QueryWindow { site_id, start, end }
    }

    /// `days`-long window for `site_id` ending at `now`.
    pub fn trailing(site_id: i64, now: NaiveDateTime, days: i64) -> Self {
        let (start, end) = dates::trailing_days(now, days);
        QueryWindow { site_id, start, end }
    }

    /// Window used when nothing has been selected.
    pub fn default_at(now: NaiveDateTime, config: &WaveConfig) -> Self {
        Self::trailing(config.fallback_site_id, now, config.window_days)
    }

    /// True when no timestamp can satisfy the range.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("invalid {field} date {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} date {value:?} is outside {earliest} to {latest}")]
    OutOfRange {
        field: &'static str,
        value: String,
        earliest: NaiveDate,
        latest: NaiveDate,
    },
}

/// Window parameters as submitted by a user; any of them may be missing.
///
/// Missing values fall back to the defaults: the fallback site, an end of
/// "now", and a start `window_days` before the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    #[serde(default)]
    pub site_id: Option<i64>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl WindowRequest {
    pub fn new(site_id: Option<i64>, start: Option<&str>, end: Option<&str>) -> Self {
        WindowRequest {
            site_id,
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    /// Resolve against the current time.
    pub fn resolve(
        &self,
        now: NaiveDateTime,
        config: &WaveConfig,
    ) -> Result<QueryWindow, WindowError> {
        let site_id = self.site_id.unwrap_or(config.fallback_site_id);
        let end = match non_blank(&self.end) {
            Some(value) => {
                let end = dates::parse_end_bound(value).map_err(|_| WindowError::InvalidDate {
                    field: "end",
                    value: value.to_string(),
                })?;
                check_range("end", value, end, config)?
            }
            None => now,
        };
        let start = match non_blank(&self.start) {
            Some(value) => {
                let start = dates::parse_start_bound(value).map_err(|_| WindowError::InvalidDate {
                    field: "start",
                    value: value.to_string(),
                })?;
                check_range("start", value, start, config)?
            }
            None => dates::trailing_days(end, config.window_days).0,
        };
        if start > end {
            log::debug!(
                "window for site {} is inverted ({} > {}); it will match nothing",
                site_id,
                start,
                end
            );
        }
        Ok(QueryWindow { site_id, start, end })
    }
}

/// Explicit bounds must fall between the earliest stored day and
/// [`latest_date`].
fn check_range(
    field: &'static str,
    value: &str,
    bound: NaiveDateTime,
    config: &WaveConfig,
) -> Result<NaiveDateTime, WindowError> {
    let earliest = config.earliest_date;
    let latest = latest_date();
    if bound.date() < earliest || bound.date() > latest {
        return Err(WindowError::OutOfRange {
            field,
            value: value.to_string(),
            earliest,
            latest,
        });
    }
    Ok(bound)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_request_uses_fallback_site_and_trailing_week() {
        let now = at(2018, 9, 15, 10);
        let window = WindowRequest::default()
            .resolve(now, &WaveConfig::default())
            .unwrap();
        assert_eq!(window.site_id, 28);
        assert_eq!(window.end, now);
        assert_eq!(window.start, at(2018, 9, 8, 10));
        assert_eq!(window, QueryWindow::default_at(now, &WaveConfig::default()));
    }

    #[test]
    fn test_explicit_dates_cover_whole_days() {
        let request = WindowRequest::new(Some(31), Some("2018-01-01"), Some("2018-01-08"));
        let window = request
            .resolve(at(2020, 1, 1, 0), &WaveConfig::default())
            .unwrap();
        assert_eq!(window.site_id, 31);
        assert_eq!(window.start, at(2018, 1, 1, 0));
        assert_eq!(
            window.end,
            NaiveDate::from_ymd_opt(2018, 1, 8)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap()
        );
    }

    #[test]
    fn test_missing_start_trails_explicit_end() {
        let request = WindowRequest::new(None, None, Some("2018-01-08 12:00:00"));
        let window = request
            .resolve(at(2020, 1, 1, 0), &WaveConfig::default())
            .unwrap();
        assert_eq!(window.start, at(2018, 1, 1, 12));
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let now = at(2018, 9, 15, 10);
        let request = WindowRequest::new(None, Some(" "), Some(""));
        let window = request.resolve(now, &WaveConfig::default()).unwrap();
        assert_eq!(window.end, now);
    }

    #[test]
    fn test_inverted_window_is_not_an_error() {
        let request = WindowRequest::new(Some(28), Some("2018-02-01"), Some("2018-01-01"));
        let window = request
            .resolve(at(2020, 1, 1, 0), &WaveConfig::default())
            .unwrap();
        assert!(window.is_inverted());
    }

    #[test]
    fn test_bounds_outside_supported_range_are_rejected() {
        let now = at(2020, 1, 1, 0);
        let config = WaveConfig::default();

        let ancient = WindowRequest::new(None, None, Some("-262143-01-01"));
        assert!(matches!(
            ancient.resolve(now, &config),
            Err(WindowError::OutOfRange { field: "end", .. })
        ));

        let early = WindowRequest::new(None, Some("2017-05-31"), Some("2017-06-10"));
        assert!(matches!(
            early.resolve(now, &config),
            Err(WindowError::OutOfRange { field: "start", .. })
        ));

        let first_day = WindowRequest::new(None, Some("2017-06-01"), None);
        assert!(first_day.resolve(now, &config).is_ok());
    }

    #[test]
    fn test_huge_window_days_do_not_overflow() {
        let config = WaveConfig {
            window_days: i64::MAX,
            ..WaveConfig::default()
        };
        let now = at(2020, 1, 1, 0);
        let window = WindowRequest::default().resolve(now, &config).unwrap();
        assert_eq!(window.end, now);
        assert_eq!(window.start, NaiveDateTime::MIN);
        assert_eq!(QueryWindow::default_at(now, &config), window);
    }

    #[test]
    fn test_invalid_date_names_field() {
        let request = WindowRequest::new(None, Some("last tuesday"), None);
        let err = request
            .resolve(at(2020, 1, 1, 0), &WaveConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            WindowError::InvalidDate {
                field: "start",
                value: "last tuesday".to_string()
            }
        );
    }
}
