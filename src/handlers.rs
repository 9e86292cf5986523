//! HTTP handlers backing the prediction page

use crate::features::FeatureExtractor;
use crate::metrics::PredictionMetrics;
use crate::models::inference::ModelCell;
use crate::types::prediction::{PredictionResponse, MODEL_NOT_LOADED};
use crate::types::reading::SensorReading;
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// Shared application state, assembled by the composition root and
/// injected into every handler
pub struct AppState {
    pub model: Arc<ModelCell>,
    pub extractor: FeatureExtractor,
    pub metrics: Arc<PredictionMetrics>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_error: Option<String>,
}

/// Service health and model availability, polled by the page on load
/// to surface a startup load failure.
#[get("/health")]
pub async fn get_health(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        model_loaded: data.model.is_loaded(),
        model_error: data.model.load_error(),
    })
}

/// Prediction counters and latency summary.
#[get("/stats")]
pub async fn get_stats(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.metrics.snapshot())
}

/// Run one prediction for the submitted readings.
///
/// Fields missing from the body take the form defaults; out-of-range
/// values are clamped the same way the form widgets clamp them.
#[post("/predict")]
pub async fn post_predict(
    data: web::Data<AppState>,
    reading: web::Json<SensorReading>,
) -> impl Responder {
    let model = match data.model.regressor() {
        Some(model) => model,
        None => {
            data.metrics.record_failure();
            return HttpResponse::ServiceUnavailable()
                .json(PredictionResponse::error(MODEL_NOT_LOADED));
        }
    };

    let start = Instant::now();
    let reading = reading.into_inner().clamped();
    let features = data.extractor.extract(&reading);

    match model.predict(&features) {
        Ok(watts) => {
            let latency = start.elapsed();
            data.metrics.record_prediction(latency);
            debug!(
                watts = watts,
                latency_us = latency.as_micros() as u64,
                "Prediction served"
            );
            HttpResponse::Ok().json(PredictionResponse::success(watts))
        }
        Err(e) => {
            data.metrics.record_failure();
            error!(error = %e, "Prediction failed");
            HttpResponse::InternalServerError()
                .json(PredictionResponse::error(format!("Prediction failed: {}", e)))
        }
    }
}
