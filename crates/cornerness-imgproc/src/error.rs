use cornerness_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filters and the corner detector.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DetectorError {
    /// A configuration value is out of its valid range.
    ///
    /// Raised before any pixel is processed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input image cannot be processed with the given configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the execution strategy.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

/// An error loading a [`HarrisConfig`](crate::features::HarrisConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The config is not valid JSON for the expected fields.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The config parsed but holds out of range values.
    #[error(transparent)]
    Invalid(#[from] DetectorError),
}
