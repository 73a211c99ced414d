use crate::inference::Classifier;
use crate::inference::error::{ModelLoadError, PredictionError};
use ndarray::Array4;
use std::path::Path;
use std::sync::Mutex;
use tch::{CModule, Device, Kind, Tensor};

/// TorchScript export of the classifier, run through libtorch.
pub struct TorchClassifier {
    model: Mutex<CModule>,
    device: Device,
}

impl TorchClassifier {
    pub fn load(model_path: &Path) -> Result<Self, ModelLoadError> {
        if !model_path.exists() {
            return Err(ModelLoadError::NotFound(model_path.to_path_buf()));
        }

        let device = Device::cuda_if_available();
        let model = CModule::load_on_device(model_path, device).map_err(|e| {
            ModelLoadError::Load {
                path: model_path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            model: Mutex::new(model),
            device,
        })
    }
}

impl Classifier for TorchClassifier {
    fn name(&self) -> &'static str {
        "torch"
    }

    fn score(&self, input: &Array4<f32>) -> Result<f32, PredictionError> {
        let data = input.as_slice().ok_or_else(|| {
            PredictionError::Preprocess("input tensor is not contiguous".to_string())
        })?;
        let shape: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
        let tensor = Tensor::from_slice(data)
            .reshape(shape.as_slice())
            .to_device(self.device);

        let model = self
            .model
            .lock()
            .map_err(|_| PredictionError::Inference("model lock poisoned".to_string()))?;
        let output = model
            .forward_ts(&[tensor])
            .map_err(|e| PredictionError::Inference(e.to_string()))?;

        let score = output.to_kind(Kind::Float).view([-1]).double_value(&[0]);
        Ok(score as f32)
    }
}
