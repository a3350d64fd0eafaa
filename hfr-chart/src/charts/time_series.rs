use super::{Margin, Title};
use hfr_utils::dates;
use hfr_wave::Dataset;
use serde::Serialize;

/// Gap between the two stacked panels, as a fraction of the plot height.
const VERTICAL_SPACING: f64 = 0.05;

/// One marker series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: &'static str,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub xaxis: &'static str,
    pub yaxis: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
    pub xanchor: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub domain: [f64; 2],
    pub anchor: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeSeriesLayout {
    pub margin: Margin,
    pub legend: Legend,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub yaxis2: Axis,
    pub hovermode: &'static str,
}

/// Wave height (top) and period (bottom) against time, sharing the x axis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeSeriesChart {
    pub data: Vec<Trace>,
    pub layout: TimeSeriesLayout,
}

impl TimeSeriesChart {
    pub fn build(dataset: &Dataset) -> Self {
        let x: Vec<String> = dataset
            .observations
            .iter()
            .map(|o| dates::format_datetime(&o.timestamp))
            .collect();
        let heights = dataset.observations.iter().map(|o| o.height_ft).collect();
        let periods = dataset.observations.iter().map(|o| o.period_s).collect();

        let height = Trace {
            x: x.clone(),
            y: heights,
            name: "Height (feet)",
            mode: "markers",
            kind: "scatter",
            xaxis: "x",
            yaxis: "y",
        };
        let period = Trace {
            x,
            y: periods,
            name: "Period (seconds)",
            mode: "markers",
            kind: "scatter",
            xaxis: "x",
            yaxis: "y2",
        };

        let split = (1.0 - VERTICAL_SPACING) / 2.0;
        TimeSeriesChart {
            data: vec![height, period],
            layout: TimeSeriesLayout {
                margin: Margin { l: 42, r: 10, b: 20, t: 10 },
                legend: Legend { x: 0.0, y: 1.0, xanchor: "left" },
                xaxis: Axis {
                    title: None,
                    domain: [0.0, 1.0],
                    anchor: "y2",
                },
                yaxis: Axis {
                    title: Some(Title::new("Wave Height (ft)")),
                    domain: [1.0 - split, 1.0],
                    anchor: "x",
                },
                yaxis2: Axis {
                    title: Some(Title::new("Wave Period (s)")),
                    domain: [0.0, split],
                    anchor: "x",
                },
                hovermode: "closest",
            },
        }
    }

    /// Number of points per series.
    pub fn points(&self) -> usize {
        self.data.first().map(|t| t.x.len()).unwrap_or(0)
    }
}
