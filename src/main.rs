//! Solar Power Prediction Service - Main Entry Point
//!
//! Serves the prediction page and runs ONNX inference for submitted readings.

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use solar_power_prediction::{
    config::AppConfig,
    features::FeatureExtractor,
    handlers::{get_health, get_stats, post_predict, AppState},
    metrics::PredictionMetrics,
    models::inference::ModelCell,
};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                format!("solar_power_prediction={}", config.logging.level).parse()?,
            ),
        )
        .init();

    info!("Starting Solar Power Prediction Service");
    info!(
        "Model artifact: {}, static page dir: {}",
        config.model.path, config.server.static_dir
    );

    // The model cell is the process-lifetime singleton handle; trigger the
    // one load attempt here so a bad path is visible at startup.
    let model = Arc::new(ModelCell::new(
        config.model.path.clone(),
        config.model.onnx_threads,
    ));
    match model.regressor() {
        Some(_) => info!("Model loaded and ready"),
        None => error!(
            error = %model.load_error().unwrap_or_default(),
            "Model failed to load; predictions will return an error"
        ),
    }

    let metrics = Arc::new(PredictionMetrics::new());
    let state = web::Data::new(AppState {
        model,
        extractor: FeatureExtractor::new(),
        metrics,
    });

    let static_dir = config.server.static_dir.clone();

    info!(
        "Starting web server on {}:{}",
        config.server.bind_address, config.server.bind_port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(post_predict)
            .service(get_health)
            .service(get_stats)
            .service(
                web::scope("")
                    .wrap(middleware::DefaultHeaders::new().add(("Cache-Control", "no-cache")))
                    .service(Files::new("/", static_dir.as_str()).index_file("index.html")),
            )
    })
    .bind((config.server.bind_address.as_str(), config.server.bind_port))?
    .run()
    .await?;

    Ok(())
}
