//! Type definitions for the prediction service

pub mod prediction;
pub mod reading;

pub use prediction::{PredictionResponse, PredictionStatus};
pub use reading::SensorReading;
