//! Feature extraction for solar power model inference.
//!
//! This module turns a sensor reading into the input vector the
//! regression model was trained on.

use crate::types::reading::SensorReading;

/// Number of features the model expects
pub const FEATURE_COUNT: usize = 5;

/// Feature extractor that transforms sensor readings into model input features.
///
/// The element order is an implicit contract with the offline training step
/// and must not change: ambient temperature, module temperature, irradiation,
/// hour of day, month.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the feature vector from a reading, in training order.
    pub fn extract(&self, reading: &SensorReading) -> Vec<f32> {
        vec![
            reading.ambient_temp as f32,
            reading.module_temp as f32,
            reading.irradiation as f32,
            reading.hour as f32,
            reading.month as f32,
        ]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching the training dataset columns).
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "AMBIENT_TEMPERATURE",
            "MODULE_TEMPERATURE",
            "IRRADIATION",
            "HOUR",
            "MONTH",
        ]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_and_count() {
        let extractor = FeatureExtractor::new();
        let reading = SensorReading {
            ambient_temp: 25.0,
            module_temp: 40.0,
            irradiation: 800.0,
            hour: 12,
            month: 6,
        };

        let features = extractor.extract(&reading);

        assert_eq!(features.len(), extractor.feature_count());
        assert_eq!(features, vec![25.0, 40.0, 800.0, 12.0, 6.0]);
    }

    #[test]
    fn test_feature_names_match_count() {
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.feature_names().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_boundary_readings_extract_cleanly() {
        let extractor = FeatureExtractor::new();

        let low = SensorReading {
            ambient_temp: -10.0,
            module_temp: 0.0,
            irradiation: 0.0,
            hour: 0,
            month: 1,
        };
        assert_eq!(extractor.extract(&low), vec![-10.0, 0.0, 0.0, 0.0, 1.0]);

        let high = SensorReading {
            ambient_temp: 60.0,
            module_temp: 90.0,
            irradiation: 1500.0,
            hour: 23,
            month: 12,
        };
        assert_eq!(
            extractor.extract(&high),
            vec![60.0, 90.0, 1500.0, 23.0, 12.0]
        );
    }
}
