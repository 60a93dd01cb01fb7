use serde::Serialize;

use super::mortality::format_mortality;
use super::transmission::is_elevated;
use crate::models::PredictionResult;

/// Headline panel shown above the charts after a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub heading: String,
    pub mortality: String,
    pub transmission: String,
    pub transmission_elevated: bool,
    pub spatial_spread: String,
    /// The model's spatial spread estimate is flagged as unreliable.
    pub spatial_spread_unreliable: bool,
    pub confidence: String,
    pub horizon: String,
    pub model_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub fn prediction_summary(result: Option<&PredictionResult>) -> Option<PredictionSummary> {
    let r = result.filter(|r| r.is_success())?;

    Some(PredictionSummary {
        heading: format!("Predictions for {} - {}", r.disease, r.location),
        mortality: format_mortality(r.mortality_fraction()),
        transmission: format!("{:.3}", r.transmission_rate()),
        transmission_elevated: is_elevated(r.transmission_rate()),
        spatial_spread: format!("{:.3}", r.spatial_spread()),
        spatial_spread_unreliable: true,
        confidence: r.metadata.confidence.clone(),
        horizon: r.metadata.prediction_horizon.clone(),
        model_version: r.metadata.model_version.clone(),
        warning: r.metadata.warning.clone().filter(|w| !w.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;

    #[test]
    fn test_summary_formats_values() {
        let mut result = fixtures::result(0.025, 1.3);
        result.metadata.warning = Some("Model tuned for COVID-19".into());

        let summary = prediction_summary(Some(&result)).unwrap();
        assert_eq!(summary.heading, "Predictions for Flu - ParisRegion");
        assert_eq!(summary.mortality, "2.50%");
        assert_eq!(summary.transmission, "1.300");
        assert_eq!(summary.spatial_spread, "0.400");
        assert!(summary.transmission_elevated);
        assert_eq!(summary.warning.as_deref(), Some("Model tuned for COVID-19"));
    }

    #[test]
    fn test_no_summary_without_result() {
        assert!(prediction_summary(None).is_none());
    }
}
