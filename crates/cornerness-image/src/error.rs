/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when one of the image dimensions is zero.
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    ZeroSize(usize, usize),

    /// Error when the number of pixels does not fit in memory.
    #[error("Image of {0}x{1} pixels is too large")]
    SizeOverflow(usize, usize),

    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when two images that must share a size do not.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel coordinate lies outside the image.
    #[error("Pixel ({0}, {1}) is out of bounds for image {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
