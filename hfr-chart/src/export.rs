//! CSV export of the current dataset.
//!
//! Payload format: UTF-8, comma separated, one header row, no index column.
//! Columns, in order:
//!
//! | column         | content                                   |
//! |----------------|-------------------------------------------|
//! | `datetime`     | "YYYY-MM-DD HH:MM:SS"                     |
//! | `height_ft`    | wave height in feet, two decimals         |
//! | `period_s`     | wave period in seconds                    |
//! | `wave_bearing` | bearing the waves come from, degrees      |
//! | `wind_bearing` | bearing the wind comes from, degrees      |
//! | `site_id`      | radar site id                             |

use hfr_utils::dates;
use hfr_wave::{Dataset, Observation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name offered to the browser.
pub const EXPORT_FILENAME: &str = "rawdata.csv";

/// Prefix of the inline download link.
pub const CSV_DATA_URI_PREFIX: &str = "data:text/csv;charset=utf-8,";

/// Header row of the payload.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "datetime",
    "height_ft",
    "period_s",
    "wave_bearing",
    "wind_bearing",
    "site_id",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid timestamp {0:?} in export")]
    Timestamp(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct ExportRow {
    datetime: String,
    height_ft: f64,
    period_s: f64,
    wave_bearing: f64,
    wind_bearing: f64,
    site_id: i64,
}

impl From<&Observation> for ExportRow {
    fn from(o: &Observation) -> Self {
        ExportRow {
            datetime: dates::format_datetime(&o.timestamp),
            height_ft: o.height_ft,
            period_s: o.period_s,
            wave_bearing: o.wave_bearing,
            wind_bearing: o.wind_bearing,
            site_id: o.site_id,
        }
    }
}

/// Serialise the dataset. An empty dataset still gets the header row.
pub fn export_csv(dataset: &Dataset) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(EXPORT_COLUMNS)?;
    for observation in &dataset.observations {
        wtr.serialize(ExportRow::from(observation))?;
    }
    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// `data:` URI carrying the percent-encoded CSV, for the download link.
pub fn export_href(dataset: &Dataset) -> Result<String, ExportError> {
    let payload = export_csv(dataset)?;
    Ok(format!(
        "{}{}",
        CSV_DATA_URI_PREFIX,
        urlencoding::encode(&payload)
    ))
}

/// Read a payload produced by [`export_csv`] back into observations.
pub fn parse_csv(payload: &str) -> Result<Vec<Observation>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(payload.as_bytes());
    let mut observations = Vec::new();
    for result in rdr.deserialize::<ExportRow>() {
        let row = result?;
        let timestamp =
            dates::parse_datetime(&row.datetime).map_err(|_| ExportError::Timestamp(row.datetime.clone()))?;
        observations.push(Observation {
            timestamp,
            height_ft: row.height_ft,
            period_s: row.period_s,
            wave_bearing: row.wave_bearing,
            wind_bearing: row.wind_bearing,
            site_id: row.site_id,
        });
    }
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hfr_wave::QueryWindow;

    fn dataset() -> Dataset {
        let day = NaiveDate::from_ymd_opt(2018, 6, 2).unwrap();
        let obs = |h: u32, m: u32, height: f64, period: f64, wave: f64, wind: f64| Observation {
            timestamp: day.and_hms_opt(h, m, 0).unwrap(),
            height_ft: height,
            period_s: period,
            wave_bearing: wave,
            wind_bearing: wind,
            site_id: 28,
        };
        Dataset::new(
            3,
            QueryWindow::new(
                28,
                day.and_hms_opt(0, 0, 0).unwrap(),
                day.and_hms_opt(23, 59, 59).unwrap(),
            ),
            vec![
                obs(1, 0, 6.56, 6.4, 135.0, 210.0),
                obs(1, 30, 3.28, 8.1, 140.5, 215.0),
                obs(2, 0, 0.0, 12.0, 0.0, 359.9),
            ],
        )
    }

    #[test]
    fn header_row_and_no_index() {
        let csv = export_csv(&dataset()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("datetime,height_ft,period_s,wave_bearing,wind_bearing,site_id")
        );
        assert_eq!(lines.next(), Some("2018-06-02 01:00:00,6.56,6.4,135.0,210.0,28"));
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn empty_dataset_still_has_header() {
        let csv = export_csv(&Dataset::default()).unwrap();
        assert_eq!(
            csv.trim_end(),
            "datetime,height_ft,period_s,wave_bearing,wind_bearing,site_id"
        );
    }

    #[test]
    fn payload_round_trips() {
        let ds = dataset();
        let parsed = parse_csv(&export_csv(&ds).unwrap()).unwrap();
        assert_eq!(parsed, ds.observations);
    }

    #[test]
    fn href_is_percent_encoded_data_uri() {
        let href = export_href(&dataset()).unwrap();
        assert!(href.starts_with("data:text/csv;charset=utf-8,"));
        let encoded = &href[CSV_DATA_URI_PREFIX.len()..];
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(decoded, export_csv(&dataset()).unwrap());
    }

    #[test]
    fn parse_rejects_bad_timestamp() {
        let payload = "datetime,height_ft,period_s,wave_bearing,wind_bearing,site_id\nnoon,1,2,3,4,28\n";
        assert!(matches!(parse_csv(payload), Err(ExportError::Timestamp(_))));
    }
}
