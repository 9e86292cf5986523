//! Model handle and inference for solar power prediction

use crate::models::loader::{LoadedModel, ModelLoader};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, error, info};

/// Narrow prediction interface: a fixed-length feature vector in, one scalar out.
pub trait Regressor: Send + Sync {
    /// Predict the target value for a single feature vector.
    fn predict(&self, features: &[f32]) -> Result<f64>;
}

/// Regressor backed by an ONNX Runtime session.
///
/// The session needs exclusive access per run, so it sits behind a mutex
/// held for the duration of one predict call.
pub struct OnnxRegressor {
    inner: Mutex<LoadedModel>,
}

impl OnnxRegressor {
    /// Wrap a loaded ONNX model.
    pub fn new(model: LoadedModel) -> Self {
        Self {
            inner: Mutex::new(model),
        }
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &[f32]) -> Result<f64> {
        use ort::value::Tensor;

        let mut model = self
            .inner
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor =
            Tensor::from_array((shape, features.to_vec())).context("Failed to create input tensor")?;

        let model_name = model.name.clone();
        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let outputs = model
            .session
            .run(ort::inputs![input_name.as_str() => input_tensor])?;

        let value = extract_scalar(&outputs, &output_name, &model_name)?;

        debug!(model = %model_name, value = value, "Inference complete");

        Ok(value)
    }
}

/// Extract the predicted scalar from model output.
///
/// Regressors produce a single-element tensor, shaped [1, 1] or [1].
fn extract_scalar(
    outputs: &ort::session::SessionOutputs,
    output_name: &str,
    model_name: &str,
) -> Result<f64> {
    // First, try the output resolved at load time by name
    if let Some(output) = outputs.get(output_name) {
        if let Ok(tensor) = output.try_extract_tensor::<f32>() {
            let (_, data) = tensor;
            if let Some(&value) = data.first() {
                return Ok(value as f64);
            }
        }
    }

    // Fallback: take the first float tensor among all outputs
    for (name, output) in outputs.iter() {
        if let Ok(tensor) = output.try_extract_tensor::<f32>() {
            let (_, data) = tensor;
            if let Some(&value) = data.first() {
                debug!(model = %model_name, output = %name, "Extracted from tensor (fallback)");
                return Ok(value as f64);
            }
        }
    }

    anyhow::bail!("Model {} produced no scalar output", model_name)
}

/// Cached outcome of the one load attempt
enum ModelState {
    Ready(Arc<dyn Regressor>),
    Failed(String),
}

/// Process-lifetime model handle.
///
/// The load is attempted once, on first access; both outcomes are cached
/// for the rest of the process. A missing or corrupt artifact is a
/// configuration error, so there is no retry path. Concurrent first
/// accesses are safe: the cell guarantees a single initialization.
pub struct ModelCell {
    path: PathBuf,
    onnx_threads: usize,
    state: OnceLock<ModelState>,
}

impl ModelCell {
    /// Create a cell that will load the artifact at `path` on first access.
    pub fn new(path: impl Into<PathBuf>, onnx_threads: usize) -> Self {
        Self {
            path: path.into(),
            onnx_threads,
            state: OnceLock::new(),
        }
    }

    /// Create a cell around an already-loaded regressor.
    pub fn preloaded(regressor: Arc<dyn Regressor>) -> Self {
        let state = OnceLock::new();
        let _ = state.set(ModelState::Ready(regressor));
        Self {
            path: PathBuf::new(),
            onnx_threads: 1,
            state,
        }
    }

    /// Create a cell already in the failed state, carrying the error text.
    pub fn failed(message: impl Into<String>) -> Self {
        let state = OnceLock::new();
        let _ = state.set(ModelState::Failed(message.into()));
        Self {
            path: PathBuf::new(),
            onnx_threads: 1,
            state,
        }
    }

    fn load(&self) -> ModelState {
        let attempt = ModelLoader::with_threads(self.onnx_threads)
            .and_then(|loader| loader.load_model(&self.path, "solar_rf"));

        match attempt {
            Ok(model) => {
                info!(path = %self.path.display(), "Model handle ready");
                ModelState::Ready(Arc::new(OnnxRegressor::new(model)))
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Error loading model");
                ModelState::Failed(format!("{:#}", e))
            }
        }
    }

    /// The loaded regressor, or `None` when the load failed.
    pub fn regressor(&self) -> Option<Arc<dyn Regressor>> {
        match self.state.get_or_init(|| self.load()) {
            ModelState::Ready(regressor) => Some(Arc::clone(regressor)),
            ModelState::Failed(_) => None,
        }
    }

    /// The stored load error, when the load failed.
    pub fn load_error(&self) -> Option<String> {
        match self.state.get_or_init(|| self.load()) {
            ModelState::Failed(message) => Some(message.clone()),
            ModelState::Ready(_) => None,
        }
    }

    /// Whether the model handle is present.
    pub fn is_loaded(&self) -> bool {
        self.regressor().is_some()
    }

    /// Path the cell loads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubRegressor(f64);

    impl Regressor for StubRegressor {
        fn predict(&self, _features: &[f32]) -> Result<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_preloaded_cell_returns_regressor() {
        let cell = ModelCell::preloaded(Arc::new(StubRegressor(123.456)));

        let regressor = cell.regressor().unwrap();
        assert_eq!(regressor.predict(&[0.0; 5]).unwrap(), 123.456);
        assert!(cell.is_loaded());
        assert!(cell.load_error().is_none());
    }

    #[test]
    fn test_missing_artifact_yields_absent_handle() {
        let cell = ModelCell::new("./does-not-exist/solar_rf_model.onnx", 1);

        assert!(cell.regressor().is_none());
        assert!(cell.load_error().is_some());
        assert!(!cell.is_loaded());

        // Memoized: later accesses short-circuit to the same outcome
        assert!(cell.regressor().is_none());
    }

    #[test]
    fn test_failed_cell_keeps_message() {
        let cell = ModelCell::failed("artifact corrupt");

        assert!(cell.regressor().is_none());
        assert_eq!(cell.load_error().as_deref(), Some("artifact corrupt"));
    }

    #[test]
    fn test_stub_prediction_is_idempotent() {
        let stub = StubRegressor(840.0);
        let features = [25.0, 40.0, 800.0, 12.0, 6.0];

        let first = stub.predict(&features).unwrap();
        let second = stub.predict(&features).unwrap();

        assert_eq!(first, second);
    }
}
