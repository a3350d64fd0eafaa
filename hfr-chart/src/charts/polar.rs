use super::{Margin, Title};
use hfr_wave::{Dataset, Direction, Selection};
use serde::Serialize;

/// Outer ring radius; also the top of the radial axis.
pub const POLAR_RADIUS: f64 = 10.0;

/// Ring radii as a percentage of [`POLAR_RADIUS`], outermost first.
pub const RING_PERCENTS: [f64; 3] = [100.0, 65.0, 30.0];

/// Fill colour of each ring, outermost first.
pub const RING_COLORS: [&str; 3] = ["rgb(242, 196, 247)", "#F6D7F9", "#FAEBFC"];

/// Angular width of the wedge in degrees.
pub const WEDGE_WIDTH_DEG: f64 = 30.0;

/// Points per ring. All sit on the same bearing, which draws a wedge.
const RING_POINTS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub color: &'static str,
}

/// One ring of the compass wedge.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolarTrace {
    pub r: Vec<f64>,
    pub theta: Vec<f64>,
    /// Angular width of each bar; Plotly otherwise derives it from theta spacing.
    pub width: f64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub marker: Marker,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadialAxis {
    pub range: [f64; 2],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AngularAxis {
    pub showline: bool,
    pub tickcolor: &'static str,
    /// North at the top.
    pub rotation: f64,
    pub direction: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolarAxes {
    pub radialaxis: RadialAxis,
    pub angularaxis: AngularAxis,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolarLayout {
    pub title: Title,
    pub autosize: bool,
    pub width: u32,
    pub height: u32,
    pub plot_bgcolor: &'static str,
    pub margin: Margin,
    pub showlegend: bool,
    pub polar: PolarAxes,
}

/// Compass wedge pointing at the bearing of the selected observation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PolarChart {
    pub data: Vec<PolarTrace>,
    pub layout: PolarLayout,
}

impl PolarChart {
    /// Build the chart for the selected timestamp.
    ///
    /// Returns `None` (an empty panel) unless the selection is set and
    /// exactly one observation carries that timestamp.
    pub fn build(dataset: &Dataset, selection: Selection, direction: Direction) -> Option<Self> {
        let timestamp = selection.timestamp?;
        let observation = dataset.single_at(timestamp)?;
        Some(Self::for_bearing(observation.bearing(direction), direction))
    }

    /// Three concentric rings drawn at `bearing`.
    pub fn for_bearing(bearing: f64, direction: Direction) -> Self {
        let data = RING_PERCENTS
            .iter()
            .zip(RING_COLORS)
            .map(|(percent, color)| PolarTrace {
                r: vec![POLAR_RADIUS * percent / 100.0; RING_POINTS],
                theta: vec![bearing; RING_POINTS],
                width: WEDGE_WIDTH_DEG,
                kind: "barpolar",
                marker: Marker { color },
            })
            .collect();

        PolarChart {
            data,
            layout: PolarLayout {
                title: Title::new(direction.title()),
                autosize: true,
                width: 200,
                height: 200,
                plot_bgcolor: "#F2F2F2",
                margin: Margin { l: 40, r: 30, b: 30, t: 50 },
                showlegend: false,
                polar: PolarAxes {
                    radialaxis: RadialAxis {
                        range: [0.0, POLAR_RADIUS],
                    },
                    angularaxis: AngularAxis {
                        showline: false,
                        tickcolor: "white",
                        rotation: 90.0,
                        direction: "clockwise",
                    },
                },
            },
        }
    }

    /// Bearing the wedge points at.
    pub fn bearing(&self) -> Option<f64> {
        self.data.first().and_then(|t| t.theta.first().copied())
    }
}
