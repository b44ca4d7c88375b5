use std::path::PathBuf;
use thiserror::Error;

use crate::cv::ColorSpace;

/// The main error type for amir_dev_studio operations.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A service is already registered for {key}")]
    DuplicateRegistration { key: String },

    #[error("No service was found for {key}")]
    NotFound { key: String },

    #[error("Service {key} is not of type {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Could not convert {from} to {to}")]
    UnsupportedConversion { from: ColorSpace, to: ColorSpace },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Slope is undefined for a vertical line")]
    VerticalLine,

    #[error("Incompatible images: {0}")]
    IncompatibleImages(String),

    #[error("Failed to decode image from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode image to {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to parse YAML config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON config from {path}: {source}")]
    ConfigJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
