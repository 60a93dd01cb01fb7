//! Pure mapping from the current prediction (or its absence) to chart-ready data.
//!
//! Every function here is deterministic: identical input serializes to
//! byte-identical JSON. Only ordered containers are used.

use serde::Serialize;

use crate::models::PredictionResult;

pub mod geography;
pub mod mortality;
pub mod summary;
pub mod transmission;

pub use geography::geographic_view;
pub use mortality::mortality_view;
pub use summary::{prediction_summary, PredictionSummary};
pub use transmission::transmission_view;

/// Fixed colors shared by every view.
pub mod palette {
    pub const NORMAL: &str = "rgba(0, 114, 178, 0.8)";
    pub const ELEVATED: &str = "rgba(230, 159, 0, 0.8)";
    pub const REFERENCE: &str = "rgba(148, 103, 189, 1)";
    pub const THRESHOLD: &str = "rgba(86, 180, 233, 0.8)";

    pub const NORMAL_FILL: &str = "rgba(0, 114, 178, 0.2)";
    pub const ELEVATED_FILL: &str = "rgba(230, 159, 0, 0.2)";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// A dataset color: one color for all points, or one per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Uniform(&'static str),
    PerBar(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: ColorSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_thickness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_style: Option<&'static str>,
}

impl Dataset {
    pub fn bar(label: impl Into<String>, data: Vec<f64>, color: ColorSpec) -> Self {
        Dataset {
            label: label.into(),
            data,
            background_color: color,
            border_color: None,
            border_radius: None,
            bar_thickness: None,
            category_percentage: None,
            bar_percentage: None,
            fill: None,
            tension: None,
            point_radius: None,
            point_hover_radius: None,
            point_style: None,
        }
    }

    /// Filled, smoothed line with circular markers.
    pub fn line(label: impl Into<String>, data: Vec<f64>, border: &'static str, fill: &'static str) -> Self {
        Dataset {
            border_color: Some(border),
            fill: Some(true),
            tension: Some(0.4),
            point_radius: Some(6),
            point_hover_radius: Some(8),
            point_style: Some("circle"),
            ..Dataset::bar(label, data, ColorSpec::Uniform(fill))
        }
    }

    pub fn with_bar_shape(mut self, radius: u32, thickness: u32) -> Self {
        self.border_radius = Some(radius);
        self.bar_thickness = Some(thickness);
        self
    }

    pub fn with_bar_spacing(mut self, category: f64, bar: f64) -> Self {
        self.category_percentage = Some(category);
        self.bar_percentage = Some(bar);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub title: String,
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    /// Decimals used for tick labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_precision: Option<u8>,
}

impl AxisOptions {
    pub fn from_zero(title: impl Into<String>) -> Self {
        AxisOptions {
            title: title.into(),
            begin_at_zero: true,
            min: None,
            max: None,
            step_size: None,
            tick_precision: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub title: String,
    pub display_title: bool,
    pub legend_position: LegendPosition,
    pub y_axis: AxisOptions,
    /// Decimals used for tooltip values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_precision: Option<u8>,
}

impl ChartOptions {
    pub fn titled(title: impl Into<String>, y_axis: AxisOptions) -> Self {
        ChartOptions {
            responsive: true,
            title: title.into(),
            display_title: true,
            legend_position: LegendPosition::Top,
            y_axis,
            tooltip_precision: None,
        }
    }
}

/// Everything the renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
    /// Short text shown under the chart, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub transmission: ChartView,
    pub mortality: ChartView,
    pub geography: ChartView,
}

pub fn render_charts(result: Option<&PredictionResult>) -> DashboardCharts {
    DashboardCharts {
        transmission: transmission_view(result),
        mortality: mortality_view(result),
        geography: geographic_view(),
    }
}

/// Title suffix naming the prediction's disease and location.
pub(crate) fn subject(result: &PredictionResult) -> String {
    format!("{} ({})", result.disease, result.location)
}

pub(crate) fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
