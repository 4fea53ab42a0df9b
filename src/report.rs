/// Confidence-gated report text
///
/// Builds the markup shown on the result screen. Below the confidence
/// threshold the label is suppressed entirely in favor of retake guidance.
use crate::api::Prediction;

/// Predictions below this confidence show the retake advisory instead of
/// the label
pub const CONFIDENCE_THRESHOLD: f64 = 0.80;

/// Placeholder shown while the upload is in flight
pub const PROCESSING: &str = "🌱 <b>Analyzing the leaf...</b>";

/// Shown when the result screen receives no image reference
pub const IMAGE_NOT_FOUND: &str = "Image not found!";

/// Render a prediction as report markup.
pub fn prediction_report(prediction: &Prediction) -> String {
    let mut text = String::new();

    if prediction.confidence < CONFIDENCE_THRESHOLD {
        text.push_str("🌿 <b>Not confident about this result!</b><br>");
        text.push_str("The photo may be unclear, or the leaf is not a kind the model knows.<br><br>");
        text.push_str("👉 Try again:<br>");
        text.push_str("- Photograph a single leaf, filling the frame<br>");
        text.push_str("- Make sure the light is good and the shot is sharp<br>");
    } else {
        text.push_str("🌿 <b>Prediction:</b><br>");
        text.push_str(&format!("<b>Disease:</b> {}<br>", prediction.predicted_class));
        text.push_str(&format!(
            "<b>Confidence:</b> {:.2}%<br><br>",
            prediction.confidence * 100.0
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(class: &str, confidence: f64) -> Prediction {
        Prediction {
            predicted_class: class.to_string(),
            confidence,
        }
    }

    #[test]
    fn confident_prediction_shows_label_and_two_decimal_percentage() {
        let report = prediction_report(&prediction("Leaf_Blight", 0.92));
        assert!(report.contains("Leaf_Blight"));
        assert!(report.contains("92.00%"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let report = prediction_report(&prediction("Rust", 0.80));
        assert!(report.contains("Rust"));
        assert!(report.contains("80.00%"));
    }

    #[test]
    fn low_confidence_suppresses_the_label() {
        let report = prediction_report(&prediction("Powdery_Mildew", 0.79));
        assert!(!report.contains("Powdery_Mildew"));
        assert!(report.contains("Try again"));
    }

    #[test]
    fn default_prediction_is_low_confidence() {
        let fallback: Prediction = serde_json::from_str("{}").unwrap();
        let report = prediction_report(&fallback);
        assert!(!report.contains("Unknown"));
        assert!(report.contains("Try again"));
    }

    #[test]
    fn percentage_is_rounded_not_truncated() {
        let report = prediction_report(&prediction("Spot", 0.98765));
        assert!(report.contains("98.77%"));
    }
}
