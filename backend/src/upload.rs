use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use futures::TryStreamExt;
use sha2::{Digest, Sha256};
use shared::ErrorResponse;

/// Form field the frontend posts the image under.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Please upload an image to predict.")]
    Missing,
    #[error("Image exceeds the upload limit of {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::Missing | UploadError::Multipart(_) => StatusCode::BAD_REQUEST,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Reads the uploaded image out of a multipart body. A non-empty `image`
/// field wins; otherwise the first non-empty field is used. The size limit
/// applies to the whole request, not to each field.
pub async fn read_image(mut payload: Multipart, limits: UploadLimits) -> Result<Vec<u8>, UploadError> {
    let mut received = 0usize;
    let mut fallback: Option<Vec<u8>> = None;

    while let Some(mut field) = payload.try_next().await? {
        let is_image_field = field.name() == Some(IMAGE_FIELD);

        let mut image_data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            received += chunk.len();
            if received > limits.max_bytes {
                return Err(UploadError::TooLarge {
                    limit: limits.max_bytes,
                });
            }
            image_data.extend_from_slice(&chunk);
        }

        if image_data.is_empty() {
            continue;
        }
        if is_image_field {
            return Ok(image_data);
        }
        fallback.get_or_insert(image_data);
    }

    fallback.ok_or(UploadError::Missing)
}

pub fn calculate_image_hash(image_data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image_data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex_sha256() {
        let hash = calculate_image_hash(b"paddy");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, calculate_image_hash(b"paddy"));
        assert_ne!(hash, calculate_image_hash(b"paddy "));
        assert_eq!(
            calculate_image_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(UploadError::Missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UploadError::TooLarge { limit: 1 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
