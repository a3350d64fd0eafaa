//! Shared utility functions for HFR wave crates.

/// Date and timestamp utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

    /// Format used for stored and exported timestamps: "YYYY-MM-DD HH:MM:SS"
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Format used for calendar dates: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Timestamp layouts accepted from the browser and the CLI, tried in order.
    ///
    /// Plotly hover events drop the seconds when they are zero, and HTML
    /// date pickers send ISO strings with a `T` separator.
    const DATETIME_INPUTS: [&str; 6] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Format a NaiveDateTime as "YYYY-MM-DD HH:MM:SS"
    pub fn format_datetime(datetime: &NaiveDateTime) -> String {
        datetime.format(DATETIME_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Parse a timestamp in any of the accepted layouts.
    ///
    /// A bare date parses as midnight of that day.
    pub fn parse_datetime(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        for layout in DATETIME_INPUTS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(s, layout) {
                return Ok(parsed);
            }
        }
        let date = parse_date(s)
            .map_err(|_| anyhow::anyhow!("unrecognised timestamp: {:?}", s))?;
        Ok(date.and_time(NaiveTime::MIN))
    }

    /// Parse the lower bound of a range. Bare dates start at 00:00:00.
    pub fn parse_start_bound(s: &str) -> anyhow::Result<NaiveDateTime> {
        parse_datetime(s)
    }

    /// Parse the upper bound of a range. Bare dates end at 23:59:59 so the
    /// whole day is included.
    pub fn parse_end_bound(s: &str) -> anyhow::Result<NaiveDateTime> {
        if let Ok(date) = parse_date(s) {
            return Ok(end_of_day(&date));
        }
        parse_datetime(s)
    }

    /// Last whole second of the given day.
    pub fn end_of_day(date: &NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
    }

    /// The `days`-long window that ends at `now`, as `(start, end)`.
    ///
    /// The start saturates at the earliest representable timestamp.
    pub fn trailing_days(now: NaiveDateTime, days: i64) -> (NaiveDateTime, NaiveDateTime) {
        let start = TimeDelta::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN);
        (start, now)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap()
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_datetime_layouts() {
            let expected = at(2018, 3, 4, 12, 30, 0);
            assert_eq!(parse_datetime("2018-03-04 12:30:00").unwrap(), expected);
            assert_eq!(parse_datetime("2018-03-04T12:30:00").unwrap(), expected);
            assert_eq!(parse_datetime("2018-03-04 12:30").unwrap(), expected);
            assert_eq!(parse_datetime("2018-03-04T12:30:00.000").unwrap(), expected);
            assert_eq!(
                parse_datetime("2018-03-04").unwrap(),
                at(2018, 3, 4, 0, 0, 0)
            );
        }

        #[test]
        fn test_parse_datetime_rejects_garbage() {
            assert!(parse_datetime("yesterday").is_err());
            assert!(parse_datetime("").is_err());
        }

        #[test]
        fn test_bounds_cover_whole_days() {
            assert_eq!(
                parse_start_bound("2018-01-01").unwrap(),
                at(2018, 1, 1, 0, 0, 0)
            );
            assert_eq!(
                parse_end_bound("2018-01-08").unwrap(),
                at(2018, 1, 8, 23, 59, 59)
            );
            // Explicit times are kept as given.
            assert_eq!(
                parse_end_bound("2018-01-08 06:00:00").unwrap(),
                at(2018, 1, 8, 6, 0, 0)
            );
        }

        #[test]
        fn test_trailing_days() {
            let now = at(2020, 5, 10, 8, 0, 0);
            let (start, end) = trailing_days(now, 7);
            assert_eq!(end, now);
            assert_eq!(start, at(2020, 5, 3, 8, 0, 0));
        }

        #[test]
        fn test_trailing_days_saturates() {
            let ancient = parse_end_bound("-262143-01-01").unwrap();
            let (start, end) = trailing_days(ancient, 7);
            assert_eq!(start, NaiveDateTime::MIN);
            assert_eq!(end, ancient);

            let now = at(2020, 5, 10, 8, 0, 0);
            assert_eq!(trailing_days(now, i64::MAX).0, NaiveDateTime::MIN);
        }

        #[test]
        fn test_format_datetime() {
            assert_eq!(
                format_datetime(&at(2019, 12, 31, 23, 0, 5)),
                "2019-12-31 23:00:05"
            );
        }
    }
}
