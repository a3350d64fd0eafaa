use crate::direction::Direction;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row as read from `hfrWaveData` joined with its site.
///
/// Measurement columns are nullable in the store, so every reading is
/// optional here; turning a row into an [`Observation`] is where missing
/// values are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveRow {
    /// `MWHT`, mean wave height in meters (999.0 means no reading).
    pub height_m: Option<f64>,
    /// `MWPD`, mean wave period in seconds.
    pub period_s: Option<f64>,
    /// `WAVB`, bearing the waves come from, degrees.
    pub wave_bearing: Option<f64>,
    /// `WNDB`, bearing the wind comes from, degrees.
    pub wind_bearing: Option<f64>,
    /// `datetime` as stored, "YYYY-MM-DD HH:MM:SS".
    pub datetime: Option<String>,
    pub site_id: i64,
    /// `hfrSites.site`, absent when the site has no metadata row.
    pub site_name: Option<String>,
}

/// A single cleaned wave observation.
///
/// Height is already converted to feet and rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub height_ft: f64,
    pub period_s: f64,
    pub wave_bearing: f64,
    pub wind_bearing: f64,
    pub site_id: i64,
}

impl Observation {
    /// The bearing a polar chart of the given kind displays.
    pub fn bearing(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Wave => self.wave_bearing,
            Direction::Wind => self.wind_bearing,
        }
    }

    /// Order two observations by timestamp only.
    pub fn cmp_time(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}
