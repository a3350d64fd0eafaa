//! Raw store rows to cleaned observations.

use crate::units;
use chrono::NaiveDateTime;
use hfr_utils::dates;
use hfr_wave::{Observation, WaveRow};
use thiserror::Error;

/// A row that cannot become an observation. `row` is its position in the
/// fetched batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("row {row}: missing {field}")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: unparseable timestamp {value:?}")]
    BadTimestamp { row: usize, value: String },
}

/// Clean a fetched batch.
///
/// Rows whose height is the 999.0 sentinel are dropped. Heights are
/// converted to feet and rounded to two decimals. The result is ordered by
/// timestamp regardless of the order rows arrived in. Any other missing or
/// malformed field fails the whole batch.
pub fn clean(rows: Vec<WaveRow>) -> Result<Vec<Observation>, ValidationError> {
    let total = rows.len();
    let mut observations = Vec::with_capacity(total);

    for (row, raw) in rows.into_iter().enumerate() {
        let height_m = require(raw.height_m, row, "height")?;
        if units::is_sentinel(height_m) {
            continue;
        }
        observations.push(Observation {
            timestamp: parse_timestamp(raw.datetime, row)?,
            height_ft: units::display_height(height_m),
            period_s: require(raw.period_s, row, "period")?,
            wave_bearing: require(raw.wave_bearing, row, "wave bearing")?,
            wind_bearing: require(raw.wind_bearing, row, "wind bearing")?,
            site_id: raw.site_id,
        });
    }

    // Stable, so readings sharing a timestamp keep their store order.
    observations.sort_by(Observation::cmp_time);

    let dropped = total - observations.len();
    if dropped > 0 {
        log::debug!("clean: dropped {} of {} rows with no height reading", dropped, total);
    }
    Ok(observations)
}

fn require(value: Option<f64>, row: usize, field: &'static str) -> Result<f64, ValidationError> {
    value.ok_or(ValidationError::MissingField { row, field })
}

fn parse_timestamp(value: Option<String>, row: usize) -> Result<NaiveDateTime, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField {
        row,
        field: "datetime",
    })?;
    dates::parse_datetime(&value).map_err(|_| ValidationError::BadTimestamp { row, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(height: Option<f64>, period: Option<f64>, datetime: &str) -> WaveRow {
        WaveRow {
            height_m: height,
            period_s: period,
            wave_bearing: Some(135.0),
            wind_bearing: Some(210.0),
            datetime: Some(datetime.to_string()),
            site_id: 28,
            site_name: Some("SEAB".to_string()),
        }
    }

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 6, 2)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_sentinel_row_dropped_and_height_converted() {
        let rows = vec![
            raw(Some(999.0), Some(8.1), "2018-06-02 01:00:00"),
            raw(Some(2.0), Some(6.4), "2018-06-02 02:00:00"),
        ];
        let cleaned = clean(rows).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].timestamp, ts(2));
        assert_eq!(cleaned[0].height_ft, 6.56);
        assert_eq!(cleaned[0].period_s, 6.4);
        assert_eq!(cleaned[0].site_id, 28);
    }

    #[test]
    fn test_every_retained_height_is_rounded_feet() {
        let heights = [0.0, 0.31, 1.0, 1.234, 2.5, 4.07, 7.777];
        let rows: Vec<_> = heights
            .iter()
            .enumerate()
            .map(|(i, h)| raw(Some(*h), Some(7.0), &format!("2018-06-02 {:02}:00:00", i)))
            .collect();
        let cleaned = clean(rows).unwrap();
        assert_eq!(cleaned.len(), heights.len());
        for (obs, h) in cleaned.iter().zip(heights.iter()) {
            assert_eq!(obs.height_ft, ((h * 3.2808) * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn test_all_sentinels_give_empty_output() {
        let rows = vec![
            raw(Some(999.0), Some(8.1), "2018-06-02 01:00:00"),
            raw(Some(999.0), None, "2018-06-02 02:00:00"),
        ];
        assert!(clean(rows).unwrap().is_empty());
    }

    #[test]
    fn test_output_sorted_by_timestamp() {
        let rows = vec![
            raw(Some(1.0), Some(7.0), "2018-06-02 05:00:00"),
            raw(Some(1.0), Some(7.0), "2018-06-02 03:00:00"),
            raw(Some(1.0), Some(7.0), "2018-06-02 04:00:00"),
        ];
        let cleaned = clean(rows).unwrap();
        let hours: Vec<_> = cleaned.iter().map(|o| o.timestamp).collect();
        assert_eq!(hours, vec![ts(3), ts(4), ts(5)]);
    }

    #[test]
    fn test_missing_period_fails_batch() {
        let rows = vec![
            raw(Some(1.0), Some(7.0), "2018-06-02 05:00:00"),
            raw(Some(1.0), None, "2018-06-02 06:00:00"),
        ];
        assert_eq!(
            clean(rows).unwrap_err(),
            ValidationError::MissingField { row: 1, field: "period" }
        );
    }

    #[test]
    fn test_missing_height_fails_batch() {
        let rows = vec![raw(None, Some(7.0), "2018-06-02 05:00:00")];
        assert_eq!(
            clean(rows).unwrap_err(),
            ValidationError::MissingField { row: 0, field: "height" }
        );
    }

    #[test]
    fn test_missing_and_bad_timestamps() {
        let mut no_time = raw(Some(1.0), Some(7.0), "");
        no_time.datetime = None;
        assert_eq!(
            clean(vec![no_time]).unwrap_err(),
            ValidationError::MissingField { row: 0, field: "datetime" }
        );

        let bad = raw(Some(1.0), Some(7.0), "sometime");
        assert_eq!(
            clean(vec![bad]).unwrap_err(),
            ValidationError::BadTimestamp { row: 0, value: "sometime".to_string() }
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(clean(Vec::new()).unwrap().is_empty());
    }
}
