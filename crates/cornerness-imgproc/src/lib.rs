#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// utilities to mark detected corners on images.
pub mod draw;

/// error types for the filters and detectors.
pub mod error;

/// feature detection module.
pub mod features;

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// border handling for stencil operations.
pub mod padding;

/// text reports of intermediate detector stages.
pub mod report;

/// diagnostic rasters of response maps.
pub mod visualize;

pub use error::{ConfigError, DetectorError};
