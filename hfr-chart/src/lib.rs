//! Charts and session state for the HFR wave viewer.
//!
//! This crate provides:
//! - `charts`: Plotly figure specs for the time series and polar panels
//! - `export`: CSV payload and download link for the current dataset
//! - `controller`: per-session fetch state machine publishing datasets
//! - `view`: panels that re-render when the published values change
//! - `session`: registry of live sessions
//! - `assets`: the dashboard page and script served to browsers

pub mod assets;
pub mod charts;
pub mod controller;
pub mod export;
pub mod session;
pub mod view;
