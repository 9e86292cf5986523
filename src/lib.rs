//! Solar Power Prediction Service Library
//!
//! A small web app that predicts the DC power output of a solar panel
//! system from environmental and sensor readings, using an offline-trained
//! regression model exported to ONNX.

pub mod config;
pub mod features;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod types;

pub use config::AppConfig;
pub use features::FeatureExtractor;
pub use metrics::PredictionMetrics;
pub use models::inference::{ModelCell, Regressor};
pub use types::{prediction::PredictionResponse, reading::SensorReading};
