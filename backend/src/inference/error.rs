use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use image::ImageFormat;
use shared::ErrorResponse;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("unsupported image format {0:?}")]
    UnsupportedFormat(ImageFormat),
    #[error("cannot identify image file: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to build input tensor: {0}")]
    Preprocess(String),
    #[error("model inference failed: {0}")]
    Inference(String),
    #[error("model returned an out-of-range score {0}")]
    InvalidScore(f32),
}

impl PredictionError {
    /// Message shown to the person who uploaded the image.
    pub fn user_message(&self) -> String {
        format!("Error during prediction: {}", self)
    }

    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PredictionError::UnsupportedFormat(_) | PredictionError::Decode(_)
        )
    }
}

impl ResponseError for PredictionError {
    fn status_code(&self) -> StatusCode {
        if self.is_input_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.user_message(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to load model {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
    #[error("model backend `{0}` is not compiled into this build")]
    BackendUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_wraps_cause() {
        let err = PredictionError::Inference("shape mismatch".into());
        assert_eq!(
            err.user_message(),
            "Error during prediction: model inference failed: shape mismatch"
        );
    }

    #[test]
    fn input_errors_map_to_unprocessable_entity() {
        let err = PredictionError::UnsupportedFormat(ImageFormat::Gif);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = PredictionError::InvalidScore(f32::NAN);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
