//! Query result models that are specific to the store.
//!
//! Rows consumed by the dashboard pipeline ([`hfr_wave::WaveRow`],
//! [`hfr_wave::Site`]) live in `hfr-wave`; this module only holds
//! summaries used for diagnostics and the seed command.

use serde::Serialize;

/// First and last reading times for one site, plus the row count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaveSpan {
    pub site_id: i64,
    /// Earliest `datetime` ("YYYY-MM-DD HH:MM:SS").
    pub first: String,
    /// Latest `datetime` ("YYYY-MM-DD HH:MM:SS").
    pub last: String,
    pub rows: i64,
}
