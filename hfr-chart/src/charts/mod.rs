//! Plotly figure specs built from a dataset.
//!
//! Figures serialise to the `{data, layout}` shape `Plotly.react` takes, so
//! the page script passes them through untouched.

mod polar;
mod time_series;

pub use polar::{
    PolarChart, PolarLayout, PolarTrace, POLAR_RADIUS, RING_COLORS, RING_PERCENTS, WEDGE_WIDTH_DEG,
};
pub use time_series::{TimeSeriesChart, TimeSeriesLayout, Trace};

use serde::Serialize;

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

/// Text wrapper Plotly uses for titles.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: &str) -> Self {
        Title {
            text: text.to_string(),
        }
    }
}
