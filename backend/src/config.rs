use image::ImageFormat;
use image::imageops::FilterType;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelBackend {
    Tract,
    Torch,
}

impl fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelBackend::Tract => write!(f, "tract"),
            ModelBackend::Torch => write!(f, "torch"),
        }
    }
}

impl FromStr for ModelBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tract" | "onnx" => Ok(ModelBackend::Tract),
            "torch" | "torchscript" => Ok(ModelBackend::Torch),
            other => Err(format!("unknown model backend `{}`", other)),
        }
    }
}

/// Resampling filter used when scaling uploads to the model input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
    Gif,
    Bmp,
}

impl ImageKind {
    pub fn matches(self, format: ImageFormat) -> bool {
        matches!(
            (self, format),
            (ImageKind::Jpeg, ImageFormat::Jpeg)
                | (ImageKind::Png, ImageFormat::Png)
                | (ImageKind::Webp, ImageFormat::WebP)
                | (ImageKind::Gif, ImageFormat::Gif)
                | (ImageKind::Bmp, ImageFormat::Bmp)
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub backend: ModelBackend,
    pub input_width: u32,
    pub input_height: u32,
    pub channels: u32,
    pub resize_filter: ResizeFilter,
    pub allowed_formats: Vec<ImageKind>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/false_smut_model.onnx"),
            backend: ModelBackend::Tract,
            input_width: 128,
            input_height: 128,
            channels: 3,
            resize_filter: ResizeFilter::CatmullRom,
            allowed_formats: vec![ImageKind::Jpeg, ImageKind::Png],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub frontend_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub model: ModelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
            PathBuf::from(format!("{}/../frontend/dist", manifest_dir))
        } else {
            PathBuf::from("/usr/src/app/frontend/dist")
        };

        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            max_upload_bytes: 50 * 1024 * 1024,
            frontend_dir,
            assets_dir: PathBuf::from("assets"),
            model: ModelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the YAML file (`APP_CONFIG` or `config/app.yaml`), then
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "PORT", value: port })?;
        }
        if let Some(limit) = lookup("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = limit.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "MAX_UPLOAD_BYTES",
                value: limit,
            })?;
        }
        if let Some(dir) = lookup("FRONTEND_DIR") {
            self.frontend_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("ASSETS_DIR") {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("MODEL_PATH") {
            self.model.path = PathBuf::from(path);
        }
        if let Some(backend) = lookup("MODEL_BACKEND") {
            self.model.backend = backend.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "MODEL_BACKEND",
                value: backend,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.input_width == 0 || self.model.input_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "model input size must be non-zero, got {}x{}",
                self.model.input_width, self.model.input_height
            )));
        }
        if !matches!(self.model.channels, 1 | 3) {
            return Err(ConfigError::Invalid(format!(
                "model channels must be 1 or 3, got {}",
                self.model.channels
            )));
        }
        if self.model.allowed_formats.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one image format must be allowed".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("APP_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
    default.exists().then_some(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_model_geometry() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8081);
        assert_eq!(config.model.input_width, 128);
        assert_eq!(config.model.input_height, 128);
        assert_eq!(config.model.channels, 3);
        assert_eq!(config.model.resize_filter, ResizeFilter::CatmullRom);
        assert_eq!(config.model.allowed_formats, vec![ImageKind::Jpeg, ImageKind::Png]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn yaml_overrides_only_given_keys() {
        let yaml = r#"
port: 9000
model:
  path: /srv/models/fs.onnx
  backend: torch
  resize_filter: lanczos3
  allowed_formats: [jpeg, png, webp]
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.model.path, PathBuf::from("/srv/models/fs.onnx"));
        assert_eq!(config.model.backend, ModelBackend::Torch);
        assert_eq!(config.model.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(config.model.input_width, 128);
        assert_eq!(config.model.allowed_formats.len(), 3);
    }

    #[test]
    fn unknown_filter_is_a_parse_error() {
        let err = AppConfig::from_yaml_str("model:\n  resize_filter: bilinear-ish\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_win() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup_from(&[
                ("PORT", "8123"),
                ("MODEL_PATH", "weights/model.pt"),
                ("MODEL_BACKEND", "torch"),
            ]))
            .unwrap();
        assert_eq!(config.port, 8123);
        assert_eq!(config.model.path, PathBuf::from("weights/model.pt"));
        assert_eq!(config.model.backend, ModelBackend::Torch);
        assert_eq!(config.bind_address(), "0.0.0.0:8123");
    }

    #[test]
    fn bad_env_value_is_reported() {
        let mut config = AppConfig::default();
        let err = config.apply_env(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        match err {
            ConfigError::InvalidEnv { key, value } => {
                assert_eq!(key, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut config = AppConfig::default();
        config.model.channels = 4;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.model.input_width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.model.allowed_formats.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn image_kind_matches_sniffed_format() {
        assert!(ImageKind::Jpeg.matches(ImageFormat::Jpeg));
        assert!(ImageKind::Webp.matches(ImageFormat::WebP));
        assert!(!ImageKind::Png.matches(ImageFormat::Jpeg));
    }

    #[test]
    fn backend_names_parse() {
        assert_eq!("ONNX".parse::<ModelBackend>().unwrap(), ModelBackend::Tract);
        assert_eq!("torchscript".parse::<ModelBackend>().unwrap(), ModelBackend::Torch);
        assert!("keras".parse::<ModelBackend>().is_err());
    }
}
