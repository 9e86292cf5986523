//! Prediction response data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error text shown when predict is pressed without a usable model
pub const MODEL_NOT_LOADED: &str = "Model not loaded. Check the model file path.";

/// Outcome of a predict request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Ok,
    Error,
}

/// Response returned to the page for every predict request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Whether the prediction succeeded
    pub status: PredictionStatus,

    /// Display text: formatted output on success, failure description otherwise
    pub message: String,

    /// Predicted DC power output in watts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watts: Option<f64>,

    /// Response generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl PredictionResponse {
    /// Build a success response from the predicted scalar
    pub fn success(watts: f64) -> Self {
        Self {
            status: PredictionStatus::Ok,
            message: format_output(watts),
            watts: Some(watts),
            timestamp: Utc::now(),
        }
    }

    /// Build an error response carrying the failure text
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: PredictionStatus::Error,
            message: message.into(),
            watts: None,
            timestamp: Utc::now(),
        }
    }
}

/// Format a predicted wattage for display, rounded to two decimal places.
pub fn format_output(watts: f64) -> String {
    format!("Predicted DC Power Output: **{:.2} W**", watts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(
            format_output(123.456),
            "Predicted DC Power Output: **123.46 W**"
        );
        assert_eq!(format_output(0.0), "Predicted DC Power Output: **0.00 W**");
        assert_eq!(
            format_output(9999.999),
            "Predicted DC Power Output: **10000.00 W**"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        assert_eq!(format_output(512.3), format_output(512.3));
    }

    #[test]
    fn test_success_response() {
        let response = PredictionResponse::success(123.456);
        assert_eq!(response.status, PredictionStatus::Ok);
        assert_eq!(response.message, "Predicted DC Power Output: **123.46 W**");
        assert_eq!(response.watts, Some(123.456));
    }

    #[test]
    fn test_error_response() {
        let response = PredictionResponse::error(MODEL_NOT_LOADED);
        assert_eq!(response.status, PredictionStatus::Error);
        assert_eq!(response.message, MODEL_NOT_LOADED);
        assert_eq!(response.watts, None);
    }

    #[test]
    fn test_response_serialization() {
        let response = PredictionResponse::success(840.5);
        let json = serde_json::to_string(&response).unwrap();
        let deserialized: PredictionResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(response.status, deserialized.status);
        assert_eq!(response.message, deserialized.message);
        assert_eq!(response.watts, deserialized.watts);
    }

    #[test]
    fn test_error_response_skips_watts_field() {
        let json = serde_json::to_string(&PredictionResponse::error("boom")).unwrap();
        assert!(!json.contains("watts"));
    }
}
