use crate::inference::Classifier;
use crate::inference::error::{ModelLoadError, PredictionError};
use ndarray::Array4;
use std::path::Path;
use tract_onnx::prelude::*;

type TractPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// ONNX export of the classifier, run on the pure-Rust tract runtime.
pub struct TractClassifier {
    plan: TractPlan,
}

impl TractClassifier {
    pub fn load(model_path: &Path, input_shape: [usize; 4]) -> Result<Self, ModelLoadError> {
        if !model_path.exists() {
            return Err(ModelLoadError::NotFound(model_path.to_path_buf()));
        }

        let plan = build_plan(model_path, input_shape).map_err(|e| ModelLoadError::Load {
            path: model_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self { plan })
    }
}

fn build_plan(model_path: &Path, input_shape: [usize; 4]) -> TractResult<TractPlan> {
    tract_onnx::onnx()
        .model_for_path(model_path)?
        .with_input_fact(0, f32::fact(input_shape).into())?
        .into_optimized()?
        .into_runnable()
}

impl Classifier for TractClassifier {
    fn name(&self) -> &'static str {
        "tract"
    }

    fn score(&self, input: &Array4<f32>) -> Result<f32, PredictionError> {
        let data = input.as_slice().ok_or_else(|| {
            PredictionError::Preprocess("input tensor is not contiguous".to_string())
        })?;
        let tensor = Tensor::from_shape(input.shape(), data)
            .map_err(|e| PredictionError::Inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into_tvalue()))
            .map_err(|e| PredictionError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| PredictionError::Inference("model produced no outputs".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| PredictionError::Inference(e.to_string()))?;

        // Single sigmoid unit: output shape (1, 1).
        view.iter()
            .next()
            .copied()
            .ok_or_else(|| PredictionError::Inference("model produced an empty output".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_file_is_reported() {
        let result = TractClassifier::load(Path::new("models/does-not-exist.onnx"), [1, 128, 128, 3]);
        assert!(matches!(result, Err(ModelLoadError::NotFound(_))));
    }

    #[test]
    fn unparseable_model_file_is_a_load_error() {
        let path = std::env::temp_dir().join(format!("fs-model-{}.onnx", std::process::id()));
        std::fs::write(&path, b"not a protobuf").unwrap();

        let result = TractClassifier::load(&path, [1, 128, 128, 3]);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ModelLoadError::Load { .. })));
    }
}
