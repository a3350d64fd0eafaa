//! Core types for HF radar wave data.
//!
//! - [`observation`]: raw store rows and cleaned observations
//! - [`dataset`]: the ordered, immutable result of one fetch
//! - [`query_window`]: site + time range of a fetch, and how user input resolves to one
//! - [`site`]: selectable sites
//! - [`direction`]: which bearing a polar chart shows
//! - [`config`]: named store constants and pipeline defaults

pub mod config;
pub mod dataset;
pub mod direction;
pub mod observation;
pub mod query_window;
pub mod site;

pub use config::WaveConfig;
pub use dataset::{Dataset, Selection};
pub use direction::Direction;
pub use observation::{Observation, WaveRow};
pub use query_window::{QueryWindow, WindowError, WindowRequest};
pub use site::{Site, SiteOption};
