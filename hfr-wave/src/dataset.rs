use crate::observation::Observation;
use crate::query_window::QueryWindow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The cleaned result of one fetch.
///
/// A dataset is never edited: each accepted fetch replaces it wholesale.
/// `seq` is the request number that produced it (0 before the first fetch).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub seq: u64,
    pub window: Option<QueryWindow>,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(seq: u64, window: QueryWindow, observations: Vec<Observation>) -> Self {
        Dataset {
            seq,
            window: Some(window),
            observations,
        }
    }

    /// Placeholder for a window whose fetch failed.
    pub fn empty_for(seq: u64, window: QueryWindow) -> Self {
        Self::new(seq, window, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All observations taken at `timestamp`.
    pub fn matching(&self, timestamp: NaiveDateTime) -> Vec<&Observation> {
        self.observations
            .iter()
            .filter(|o| o.timestamp == timestamp)
            .collect()
    }

    /// The observation at `timestamp`, if exactly one exists.
    pub fn single_at(&self, timestamp: NaiveDateTime) -> Option<&Observation> {
        let mut hits = self.observations.iter().filter(|o| o.timestamp == timestamp);
        match (hits.next(), hits.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

/// Timestamp picked by hovering over the time series, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub timestamp: Option<NaiveDateTime>,
}

impl Selection {
    pub fn none() -> Self {
        Selection { timestamp: None }
    }

    pub fn at(timestamp: NaiveDateTime) -> Self {
        Selection {
            timestamp: Some(timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 7, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn obs(hour: u32, site_id: i64) -> Observation {
        Observation {
            timestamp: ts(hour),
            height_ft: 1.0,
            period_s: 6.0,
            wave_bearing: 90.0,
            wind_bearing: 180.0,
            site_id,
        }
    }

    fn window() -> QueryWindow {
        QueryWindow::new(28, ts(0), ts(23))
    }

    #[test]
    fn test_default_dataset_is_empty() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.seq, 0);
        assert!(ds.window.is_none());
    }

    #[test]
    fn test_single_at_requires_exactly_one_match() {
        let ds = Dataset::new(1, window(), vec![obs(1, 28), obs(2, 28), obs(2, 28)]);
        assert!(ds.single_at(ts(1)).is_some());
        // Two rows share hour 2.
        assert!(ds.single_at(ts(2)).is_none());
        assert_eq!(ds.matching(ts(2)).len(), 2);
        // No row at hour 3.
        assert!(ds.single_at(ts(3)).is_none());
    }

    #[test]
    fn test_empty_for_keeps_window() {
        let ds = Dataset::empty_for(4, window());
        assert_eq!(ds.seq, 4);
        assert_eq!(ds.window, Some(window()));
        assert_eq!(ds.len(), 0);
    }

    #[test]
    fn test_selection_constructors() {
        assert_eq!(Selection::none(), Selection::default());
        assert_eq!(Selection::at(ts(5)).timestamp, Some(ts(5)));
    }
}
