//! Rendered dashboard panels for one session.
//!
//! [`ViewState`] watches a controller's two channels and re-renders only
//! what a change affects: a new dataset redraws everything, a new hover
//! selection redraws the two polar charts.

use crate::charts::{PolarChart, TimeSeriesChart};
use crate::controller::{Controller, Phase, Status};
use crate::export::{self, ExportError, EXPORT_FILENAME};
use hfr_wave::{Dataset, Direction, QueryWindow, Selection};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Panels derived from the dataset alone.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetPanels {
    pub time_series: TimeSeriesChart,
    pub export_href: String,
}

impl DatasetPanels {
    pub fn render(dataset: &Dataset) -> Result<Self, ExportError> {
        Ok(DatasetPanels {
            time_series: TimeSeriesChart::build(dataset),
            export_href: export::export_href(dataset)?,
        })
    }
}

/// The two compass panels. `None` draws an empty chart.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PolarPanels {
    pub wave: Option<PolarChart>,
    pub wind: Option<PolarChart>,
}

impl PolarPanels {
    pub fn render(dataset: &Dataset, selection: Selection) -> Self {
        PolarPanels {
            wave: PolarChart::build(dataset, selection, Direction::Wave),
            wind: PolarChart::build(dataset, selection, Direction::Wind),
        }
    }
}

/// How often each panel group has been rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounts {
    pub dataset: u64,
    pub polar: u64,
}

/// Everything the page needs to draw the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub seq: u64,
    pub phase: Phase,
    pub window: QueryWindow,
    pub error: Option<String>,
    pub rows: usize,
    pub time_series: TimeSeriesChart,
    pub wave_polar: Option<PolarChart>,
    pub wind_polar: Option<PolarChart>,
    pub export_href: String,
    pub export_filename: &'static str,
}

pub struct ViewState {
    dataset_rx: watch::Receiver<Arc<Dataset>>,
    selection_rx: watch::Receiver<Selection>,
    dataset: Arc<Dataset>,
    selection: Selection,
    panels: DatasetPanels,
    polars: PolarPanels,
    counts: RenderCounts,
}

impl ViewState {
    pub fn new(controller: &Controller) -> Result<Self, ExportError> {
        let mut dataset_rx = controller.subscribe_dataset();
        let mut selection_rx = controller.subscribe_selection();
        let dataset = dataset_rx.borrow_and_update().clone();
        let selection = *selection_rx.borrow_and_update();
        Ok(ViewState {
            panels: DatasetPanels::render(&dataset)?,
            polars: PolarPanels::render(&dataset, selection),
            dataset_rx,
            selection_rx,
            dataset,
            selection,
            counts: RenderCounts { dataset: 1, polar: 1 },
        })
    }

    /// Pick up anything published since the last call.
    pub fn sync(&mut self) -> Result<(), ExportError> {
        // A closed channel means the controller is gone; keep what we have.
        let dataset_changed = self.dataset_rx.has_changed().unwrap_or(false);
        let selection_changed = self.selection_rx.has_changed().unwrap_or(false);

        if dataset_changed {
            self.dataset = self.dataset_rx.borrow_and_update().clone();
            self.panels = DatasetPanels::render(&self.dataset)?;
            self.counts.dataset += 1;
        }
        if selection_changed {
            self.selection = *self.selection_rx.borrow_and_update();
        }
        if dataset_changed || selection_changed {
            self.polars = PolarPanels::render(&self.dataset, self.selection);
            self.counts.polar += 1;
        }
        Ok(())
    }

    pub fn dashboard(&mut self, status: Status) -> Result<DashboardView, ExportError> {
        self.sync()?;
        Ok(DashboardView {
            seq: self.dataset.seq,
            phase: status.phase,
            window: self
                .dataset
                .window
                .clone()
                .unwrap_or(status.window),
            error: status.error,
            rows: self.dataset.len(),
            time_series: self.panels.time_series.clone(),
            wave_polar: self.polars.wave.clone(),
            wind_polar: self.polars.wind.clone(),
            export_href: self.panels.export_href.clone(),
            export_filename: EXPORT_FILENAME,
        })
    }

    pub fn polar_view(&mut self) -> Result<PolarPanels, ExportError> {
        self.sync()?;
        Ok(self.polars.clone())
    }

    pub fn counts(&self) -> RenderCounts {
        self.counts
    }
}
