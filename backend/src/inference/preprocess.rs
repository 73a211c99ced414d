use crate::config::{ImageKind, ModelConfig};
use crate::inference::error::PredictionError;
use image::DynamicImage;
use image::imageops::FilterType;
use ndarray::Array4;

/// Turns uploaded bytes into the `(1, height, width, channels)` tensor the
/// classifier was trained on, with intensities scaled to [0, 1].
#[derive(Debug, Clone)]
pub struct Preprocessor {
    width: u32,
    height: u32,
    channels: u32,
    filter: FilterType,
    allowed_formats: Vec<ImageKind>,
}

impl Preprocessor {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            width: config.input_width,
            height: config.input_height,
            channels: config.channels,
            filter: config.resize_filter.into(),
            allowed_formats: config.allowed_formats.clone(),
        }
    }

    pub fn input_shape(&self) -> [usize; 4] {
        [1, self.height as usize, self.width as usize, self.channels as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub fn decode(&self, image_data: &[u8]) -> Result<DynamicImage, PredictionError> {
        let format = image::guess_format(image_data)?;
        if !self.allowed_formats.iter().any(|kind| kind.matches(format)) {
            return Err(PredictionError::UnsupportedFormat(format));
        }
        let image = image::load_from_memory_with_format(image_data, format)?;
        Ok(image)
    }

    pub fn to_tensor(&self, image: &DynamicImage) -> Result<Array4<f32>, PredictionError> {
        let resized = image.resize_exact(self.width, self.height, self.filter);

        // Pixel buffers are row-major HWC, which is already NHWC once batched.
        let raw = match self.channels {
            1 => resized.to_luma8().into_raw(),
            _ => resized.to_rgb8().into_raw(),
        };
        let data: Vec<f32> = raw.into_iter().map(|v| f32::from(v) / 255.0).collect();

        let [batch, height, width, channels] = self.input_shape();
        Array4::from_shape_vec((batch, height, width, channels), data)
            .map_err(|e| PredictionError::Preprocess(e.to_string()))
    }
}
