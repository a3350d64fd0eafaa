//! Data processing for wave observations.
//!
//! This crate turns raw store rows into the cleaned observations the
//! charts are drawn from.

pub mod transform;

pub use transform::{clean, ValidationError};

/// Unit conversion and rounding for wave heights
pub mod units {
    /// Height reading that means "no data".
    pub const SENTINEL_HEIGHT: f64 = 999.0;

    /// Feet per meter.
    pub const METERS_TO_FEET: f64 = 3.2808;

    /// Decimal places kept on converted heights.
    pub const HEIGHT_DECIMALS: i32 = 2;

    /// Check if a height reading is the missing-data marker
    pub fn is_sentinel(height_m: f64) -> bool {
        height_m == SENTINEL_HEIGHT
    }

    /// Convert meters to feet
    pub fn meters_to_feet(meters: f64) -> f64 {
        meters * METERS_TO_FEET
    }

    /// Round to a number of decimal places, halves away from zero
    pub fn round_to(value: f64, places: i32) -> f64 {
        let scale = 10f64.powi(places);
        (value * scale).round() / scale
    }

    /// Height in feet as displayed: converted, then rounded
    pub fn display_height(meters: f64) -> f64 {
        round_to(meters_to_feet(meters), HEIGHT_DECIMALS)
    }

}
