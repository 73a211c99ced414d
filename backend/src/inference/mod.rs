pub mod decision;
pub mod error;
#[cfg(test)]
pub mod fake;
pub mod preprocess;
#[cfg(feature = "torch")]
pub mod torch_model;
pub mod tract_model;

use crate::config::{ModelBackend, ModelConfig};
use decision::{DECISION_THRESHOLD, decide};
use error::{ModelLoadError, PredictionError};
use image::DynamicImage;
use ndarray::Array4;
use preprocess::Preprocessor;
use shared::{Confidence, Label, ModelInfo};
use std::path::Path;
use tract_model::TractClassifier;

/// A pretrained binary classifier: one normalized NHWC tensor in, one
/// probability out.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, input: &Array4<f32>) -> Result<f32, PredictionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub confidence: Confidence,
    pub score: f32,
}

pub struct InferenceAdapter {
    classifier: Box<dyn Classifier>,
    preprocessor: Preprocessor,
}

impl InferenceAdapter {
    pub fn new(classifier: Box<dyn Classifier>, preprocessor: Preprocessor) -> Self {
        Self {
            classifier,
            preprocessor,
        }
    }

    pub fn load(config: &ModelConfig) -> Result<Self, ModelLoadError> {
        let preprocessor = Preprocessor::from_config(config);
        let classifier: Box<dyn Classifier> = match config.backend {
            ModelBackend::Tract => Box::new(TractClassifier::load(
                &config.path,
                preprocessor.input_shape(),
            )?),
            ModelBackend::Torch => load_torch(&config.path)?,
        };
        Ok(Self::new(classifier, preprocessor))
    }

    pub fn backend_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn predict(&self, image_data: &[u8]) -> Result<Prediction, PredictionError> {
        let image = self.preprocessor.decode(image_data)?;
        self.predict_image(&image)
    }

    pub fn predict_image(&self, image: &DynamicImage) -> Result<Prediction, PredictionError> {
        let tensor = self.preprocessor.to_tensor(image)?;
        let score = self.classifier.score(&tensor)?;
        let decision = decide(score)?;
        log::debug!(
            "{} scored {:.4} -> {} ({})",
            self.classifier.name(),
            score,
            decision.label,
            decision.confidence
        );
        Ok(Prediction {
            label: decision.label,
            confidence: decision.confidence,
            score,
        })
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            backend: self.classifier.name().to_string(),
            input_width: self.preprocessor.width(),
            input_height: self.preprocessor.height(),
            channels: self.preprocessor.channels(),
            threshold: DECISION_THRESHOLD,
            classes: shared::classes(),
        }
    }
}

#[cfg(feature = "torch")]
fn load_torch(model_path: &Path) -> Result<Box<dyn Classifier>, ModelLoadError> {
    Ok(Box::new(torch_model::TorchClassifier::load(model_path)?))
}

#[cfg(not(feature = "torch"))]
fn load_torch(_model_path: &Path) -> Result<Box<dyn Classifier>, ModelLoadError> {
    Err(ModelLoadError::BackendUnavailable(ModelBackend::Torch.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use fake::{FixedScore, MeanIntensity, Unavailable};
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn adapter(classifier: impl Classifier + 'static) -> InferenceAdapter {
        InferenceAdapter::new(
            Box::new(classifier),
            Preprocessor::from_config(&ModelConfig::default()),
        )
    }

    fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
        let mut cursor = Cursor::new(Vec::new());
        image.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn predict_runs_the_whole_pipeline() {
        let prediction = adapter(FixedScore(0.95)).predict(&png(300, 200, [90, 60, 30])).unwrap();
        assert_eq!(prediction.label, Label::FalseSmut);
        assert_eq!(prediction.confidence, Confidence(95.0));
        assert_eq!(prediction.score, 0.95);
    }

    #[test]
    fn bright_and_dark_images_land_on_opposite_sides() {
        let adapter = adapter(MeanIntensity);

        let bright = adapter.predict(&png(64, 64, [255, 255, 255])).unwrap();
        assert_eq!(bright.label, Label::FalseSmut);
        assert_eq!(bright.confidence, Confidence(100.0));

        let dark = adapter.predict(&png(64, 64, [0, 0, 0])).unwrap();
        assert_eq!(dark.label, Label::FsAbsent);
        assert_eq!(dark.confidence, Confidence(100.0));
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let adapter = adapter(MeanIntensity);
        let image = png(97, 131, [120, 200, 40]);
        let first = adapter.predict(&image).unwrap();
        let second = adapter.predict(&image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_upload_is_an_error_not_a_panic() {
        let err = adapter(FixedScore(0.9)).predict(b"\x89PNG\r\n\x1a\nbroken").unwrap_err();
        assert!(matches!(err, PredictionError::Decode(_)));
        assert!(err.user_message().starts_with("Error during prediction:"));
    }

    #[test]
    fn classifier_failures_surface_as_inference_errors() {
        let err = adapter(Unavailable).predict(&png(8, 8, [1, 1, 1])).unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
    }

    #[test]
    fn out_of_range_model_output_is_rejected() {
        let err = adapter(FixedScore(1.7)).predict(&png(8, 8, [1, 1, 1])).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidScore(_)));
    }

    #[test]
    fn model_info_describes_input_and_classes() {
        let info = adapter(FixedScore(0.1)).model_info();
        assert_eq!(info.backend, "fixed");
        assert_eq!((info.input_width, info.input_height, info.channels), (128, 128, 3));
        assert_eq!(info.threshold, 0.5);
        assert_eq!(info.classes.len(), 2);
        assert_eq!(info.classes[0].key, Label::FalseSmut);
    }

    #[test]
    fn load_reports_missing_model() {
        let config = ModelConfig {
            path: "models/missing.onnx".into(),
            ..ModelConfig::default()
        };
        assert!(matches!(
            InferenceAdapter::load(&config),
            Err(ModelLoadError::NotFound(_))
        ));
    }

    #[cfg(not(feature = "torch"))]
    #[test]
    fn torch_backend_requires_feature() {
        let config = ModelConfig {
            backend: ModelBackend::Torch,
            ..ModelConfig::default()
        };
        assert!(matches!(
            InferenceAdapter::load(&config),
            Err(ModelLoadError::BackendUnavailable(_))
        ));
    }
}
