use once_cell::sync::Lazy;

use super::{labels, palette, AxisOptions, ChartData, ChartKind, ChartOptions, ChartView, ColorSpec, Dataset};

const CONFIRMED_CASES: [(&str, f64); 6] = [
    ("France", 100_000.0),
    ("Spain", 85_000.0),
    ("Italy", 92_000.0),
    ("Germany", 76_000.0),
    ("Brazil", 120_000.0),
    ("India", 150_000.0),
];

static GEOGRAPHIC_VIEW: Lazy<ChartView> = Lazy::new(|| {
    let names: Vec<&str> = CONFIRMED_CASES.iter().map(|(name, _)| *name).collect();
    let cases = CONFIRMED_CASES.iter().map(|(_, n)| *n).collect();

    ChartView {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels(&names),
            datasets: vec![Dataset::bar("Confirmed cases", cases, ColorSpec::Uniform(palette::REFERENCE))
                .with_bar_shape(6, 14)],
        },
        options: ChartOptions::titled(
            "Geographic spread by country",
            AxisOptions::from_zero("Number of cases"),
        ),
        caption: None,
    }
});

/// Static confirmed-case reference bars. Not driven by predictions.
pub fn geographic_view() -> ChartView {
    GEOGRAPHIC_VIEW.clone()
}
