use super::{labels, palette, subject, AxisOptions, ChartData, ChartKind, ChartOptions, ChartView, Dataset};
use crate::models::PredictionResult;

/// Illustrative weekly case volumes the mortality fraction is applied to.
pub const PROJECTION_WEIGHTS: [f64; 5] = [1000.0, 2500.0, 5000.0, 4500.0, 3000.0];

/// Mortality above 1% switches the line to the warning palette.
pub const HIGH_MORTALITY_FRACTION: f64 = 0.01;

const REFERENCE_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
const REFERENCE_DEATHS: [f64; 5] = [2.0, 14.0, 18.0, 22.0, 19.0];

pub fn project_deaths(mortality_fraction: f64) -> Vec<f64> {
    PROJECTION_WEIGHTS
        .iter()
        .map(|w| (w * mortality_fraction).round())
        .collect()
}

/// Format a mortality fraction as a percentage, e.g. `0.025` -> `"2.50%"`.
pub fn format_mortality(mortality_fraction: f64) -> String {
    format!("{:.2}%", mortality_fraction * 100.0)
}

fn line_palette(mortality_fraction: f64) -> (&'static str, &'static str) {
    if mortality_fraction > HIGH_MORTALITY_FRACTION {
        (palette::ELEVATED, palette::ELEVATED_FILL)
    } else {
        (palette::NORMAL, palette::NORMAL_FILL)
    }
}

pub fn mortality_view(result: Option<&PredictionResult>) -> ChartView {
    let data = match result.filter(|r| r.is_success()) {
        Some(r) => {
            let fraction = r.mortality_fraction();
            let (border, fill) = line_palette(fraction);
            ChartData {
                labels: (1..=PROJECTION_WEIGHTS.len()).map(|w| format!("Week {}", w)).collect(),
                datasets: vec![Dataset::line(
                    format!("Predicted deaths - {}", r.disease),
                    project_deaths(fraction),
                    border,
                    fill,
                )],
            }
        }
        None => ChartData {
            labels: labels(&REFERENCE_DAYS),
            datasets: vec![Dataset::line(
                "Deaths",
                REFERENCE_DEATHS.to_vec(),
                palette::ELEVATED_FILL,
                palette::NORMAL_FILL,
            )],
        },
    };

    let title = match result {
        Some(r) => format!("Death projection - {}", subject(r)),
        None => "Deaths per day".to_string(),
    };

    let y_axis = AxisOptions {
        min: Some(0.0),
        max: Some(10_000.0),
        step_size: Some(1_000.0),
        begin_at_zero: false,
        ..AxisOptions::from_zero("Estimated deaths (per 100k cases)")
    };

    let caption = result
        .filter(|r| r.is_success())
        .map(|r| format!("Predicted mortality rate: {}", format_mortality(r.mortality_fraction())));

    ChartView {
        kind: ChartKind::Line,
        data,
        options: ChartOptions::titled(title, y_axis),
        caption,
    }
}
