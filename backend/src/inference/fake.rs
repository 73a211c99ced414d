use crate::inference::Classifier;
use crate::inference::error::PredictionError;
use ndarray::Array4;

/// Always returns the same score.
pub struct FixedScore(pub f32);

impl Classifier for FixedScore {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn score(&self, _input: &Array4<f32>) -> Result<f32, PredictionError> {
        Ok(self.0)
    }
}

/// Scores an image by its mean normalized intensity, so brighter grains
/// read as positive.
pub struct MeanIntensity;

impl Classifier for MeanIntensity {
    fn name(&self) -> &'static str {
        "mean-intensity"
    }

    fn score(&self, input: &Array4<f32>) -> Result<f32, PredictionError> {
        input
            .mean()
            .ok_or_else(|| PredictionError::Inference("empty input".to_string()))
    }
}

pub struct Unavailable;

impl Classifier for Unavailable {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn score(&self, _input: &Array4<f32>) -> Result<f32, PredictionError> {
        Err(PredictionError::Inference("runtime not initialised".to_string()))
    }
}
