#![deny(missing_docs)]
//! Single channel image grids used by every stage of the cornerness pipeline.

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// elementwise operations between images.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
