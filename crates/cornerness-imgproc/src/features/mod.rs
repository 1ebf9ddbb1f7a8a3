//! Corner detection and keypoint extraction.
//!
//! This module provides the stages of the Harris corner detector, which finds
//! locally distinctive points that are useful for:
//!
//! - Image matching and registration
//! - Object tracking
//!
//! # Stages
//!
//! 1. [`spatial_gradient`]: horizontal and vertical central differences.
//! 2. [`structure_tensor`]: gradient products smoothed with a gaussian window.
//! 3. [`harris_response`]: `det - k * trace²` of the smoothed tensor.
//! 4. [`non_max_suppression`]: strict 8-neighborhood maxima above a threshold.
//!
//! [`HarrisDetector`] chains the stages from a validated [`HarrisConfig`].
//!
//! # Examples
//!
//! ```
//! use cornerness_image::Image;
//! use cornerness_imgproc::features::{HarrisConfig, HarrisDetector};
//!
//! let image = Image::from_size_val([8, 8].into(), 0.0f32).unwrap();
//! let detector = HarrisDetector::new(HarrisConfig::default()).unwrap();
//! let output = detector.detect(&image).unwrap();
//! assert!(output.corners.is_empty());
//! ```

mod gradient;
pub use gradient::*;

mod structure_tensor;
pub use structure_tensor::*;

mod responses;
pub use responses::*;

mod nms;
pub use nms::*;

mod harris;
pub use harris::*;

/// Seeding and driving an external point tracker with detected corners.
pub mod tracking;
