use super::{labels, palette, subject, AxisOptions, ChartData, ChartKind, ChartOptions, ChartView, ColorSpec, Dataset};
use crate::models::PredictionResult;

pub const WORLD_AVERAGE_R0: f64 = 1.5;
pub const EPIDEMIC_THRESHOLD_R0: f64 = 1.0;

const REFERENCE_COUNTRIES: [(&str, f64); 5] = [
    ("USA", 1.2),
    ("France", 1.1),
    ("Spain", 1.4),
    ("Russia", 3.0),
    ("China", 2.4),
];

/// R0 strictly above the epidemic threshold means the outbreak is growing.
pub fn is_elevated(r0: f64) -> bool {
    r0 > EPIDEMIC_THRESHOLD_R0
}

pub fn selected_bar_color(r0: f64) -> &'static str {
    if is_elevated(r0) {
        palette::ELEVATED
    } else {
        palette::NORMAL
    }
}

pub fn risk_caption(r0: f64) -> &'static str {
    if is_elevated(r0) {
        "High spread risk (R0 > 1)"
    } else {
        "Spread under control (R0 ≤ 1)"
    }
}

/// Compare the predicted R0 against the world average and the epidemic threshold.
///
/// Without a successful prediction the per-country reference values are shown.
pub fn transmission_view(result: Option<&PredictionResult>) -> ChartView {
    let data = match result.filter(|r| r.is_success()) {
        Some(r) => predicted_data(r),
        None => reference_data(),
    };

    let title = match result {
        Some(r) => format!("Predicted transmission rate - {}", subject(r)),
        None => "Transmission rate by country".to_string(),
    };

    let mut y_axis = AxisOptions::from_zero("R0 (basic reproduction number)");
    y_axis.tick_precision = Some(1);
    let mut options = ChartOptions::titled(title, y_axis);
    options.tooltip_precision = Some(3);

    let caption = result
        .filter(|r| r.is_success())
        .map(|r| risk_caption(r.transmission_rate()).to_string());

    ChartView {
        kind: ChartKind::Bar,
        data,
        options,
        caption,
    }
}

fn reference_data() -> ChartData {
    let names: Vec<&str> = REFERENCE_COUNTRIES.iter().map(|(name, _)| *name).collect();
    let values = REFERENCE_COUNTRIES.iter().map(|(_, r0)| *r0).collect();

    ChartData {
        labels: labels(&names),
        datasets: vec![Dataset::bar("Transmission rate", values, ColorSpec::Uniform(palette::NORMAL))
            .with_bar_shape(8, 10)
            .with_bar_spacing(0.5, 1.0)],
    }
}

fn predicted_data(result: &PredictionResult) -> ChartData {
    let r0 = result.transmission_rate();
    let colors = vec![selected_bar_color(r0), palette::REFERENCE, palette::THRESHOLD];

    ChartData {
        labels: vec![
            result.location.clone(),
            "World average".to_string(),
            "Epidemic threshold".to_string(),
        ],
        datasets: vec![Dataset::bar(
            "Transmission rate (R0)",
            vec![r0, WORLD_AVERAGE_R0, EPIDEMIC_THRESHOLD_R0],
            ColorSpec::PerBar(colors),
        )
        .with_bar_shape(8, 40)
        .with_bar_spacing(0.5, 1.0)],
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::models::PredictionStatus;

    fn first_bar_color(view: &ChartView) -> &'static str {
        match &view.data.datasets[0].background_color {
            ColorSpec::PerBar(colors) => colors[0],
            ColorSpec::Uniform(c) => *c,
        }
    }

    #[test]
    fn test_reference_when_no_result() {
        let view = transmission_view(None);
        assert_eq!(view.data.labels, vec!["USA", "France", "Spain", "Russia", "China"]);
        assert_eq!(view.data.datasets[0].data, vec![1.2, 1.1, 1.4, 3.0, 2.4]);
        assert_eq!(view.options.title, "Transmission rate by country");
        assert!(view.caption.is_none());
    }

    #[test]
    fn test_three_bars_with_result() {
        let result = fixtures::result(0.025, 1.3);
        let view = transmission_view(Some(&result));

        assert_eq!(view.data.labels, vec!["ParisRegion", "World average", "Epidemic threshold"]);
        assert_eq!(view.data.datasets[0].data, vec![1.3, 1.5, 1.0]);
        assert_eq!(
            view.data.datasets[0].background_color,
            ColorSpec::PerBar(vec![palette::ELEVATED, palette::REFERENCE, palette::THRESHOLD])
        );
        assert_eq!(view.options.title, "Predicted transmission rate - Flu (ParisRegion)");
        assert_eq!(view.caption.as_deref(), Some("High spread risk (R0 > 1)"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let at = fixtures::result(0.01, 1.0);
        let above = fixtures::result(0.01, 1.0001);

        assert_eq!(first_bar_color(&transmission_view(Some(&at))), palette::NORMAL);
        assert_eq!(first_bar_color(&transmission_view(Some(&above))), palette::ELEVATED);
        assert_eq!(risk_caption(1.0), "Spread under control (R0 ≤ 1)");
    }

    #[test]
    fn test_non_success_keeps_reference_data_but_names_subject() {
        let mut result = fixtures::result(0.025, 1.3);
        result.status = PredictionStatus::Other("error".into());
        let view = transmission_view(Some(&result));

        assert_eq!(view.data.labels.len(), 5);
        assert!(view.options.title.contains("Flu (ParisRegion)"));
        assert!(view.caption.is_none());
    }
}
