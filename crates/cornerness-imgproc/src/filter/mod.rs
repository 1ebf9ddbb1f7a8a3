//! Filter operations
//!
//! This module provides the kernels and the stencil convolution used by the
//! corner detector.

/// Filter kernels
pub mod kernels;
pub use kernels::{Axis, Kernel};

/// Filter operations
mod ops;
pub use ops::{convolve, convolve_with, FilterOptions};
pub(crate) use ops::check_footprint;
