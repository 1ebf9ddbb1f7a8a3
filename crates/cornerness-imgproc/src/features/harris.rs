use std::path::Path;

use cornerness_image::Image;
use serde::{Deserialize, Serialize};

use super::{
    gradient_products, harris_response, non_max_suppression, smooth_channels, spatial_gradient,
    structure_tensor, CornerPoint, GradientPair, TensorChannels, DEFAULT_HARRIS_K,
    DEFAULT_NMS_THRESHOLD,
};
use crate::draw::annotate_corners;
use crate::error::{ConfigError, DetectorError};
use crate::filter::{check_footprint, kernels::gaussian_kernel_2d, FilterOptions, Kernel};
use crate::padding::BorderMode;
use crate::parallel::ExecutionStrategy;
use crate::visualize::rasterize_response;

/// The default size of the gaussian window.
pub const DEFAULT_WINDOW_SIZE: usize = 3;
/// The default sigma of the gaussian window.
pub const DEFAULT_WINDOW_SIGMA: f32 = 1.0;
/// The default magnification of the response raster.
pub const DEFAULT_RASTER_SCALE: usize = 16;
/// The default offset added to the response before quantization.
pub const DEFAULT_RASTER_OFFSET: f32 = 0.06;
/// The default gain applied to the response before quantization.
pub const DEFAULT_RASTER_GAIN: f32 = 700.0;
/// The default value written at each corner of the annotated image.
pub const DEFAULT_MARKER: f32 = 9.0;

/// Parameters of the harris corner detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarrisConfig {
    /// The size of the gaussian window, odd.
    pub window_size: usize,
    /// The sigma of the gaussian window, positive.
    pub window_sigma: f32,
    /// The harris sensitivity.
    pub k: f32,
    /// The minimum response of a corner, non negative.
    pub threshold: f32,
    /// The magnification of the response raster, at least one.
    pub raster_scale: usize,
    /// Added to the response before quantization.
    pub raster_offset: f32,
    /// Multiplies the offset response before quantization.
    pub raster_gain: f32,
    /// The value written at each corner of the annotated image.
    pub marker: f32,
    /// How samples outside the image are read.
    pub border: BorderMode,
    /// How rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for HarrisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            window_sigma: DEFAULT_WINDOW_SIGMA,
            k: DEFAULT_HARRIS_K,
            threshold: DEFAULT_NMS_THRESHOLD,
            raster_scale: DEFAULT_RASTER_SCALE,
            raster_offset: DEFAULT_RASTER_OFFSET,
            raster_gain: DEFAULT_RASTER_GAIN,
            marker: DEFAULT_MARKER,
            border: BorderMode::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl HarrisConfig {
    /// Check every parameter before any pixel is processed.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.window_size == 0 || self.window_size % 2 == 0 {
            return Err(DetectorError::InvalidParameter(format!(
                "window_size must be odd and positive, got {}",
                self.window_size
            )));
        }
        if !(self.window_sigma.is_finite() && self.window_sigma > 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "window_sigma must be positive, got {}",
                self.window_sigma
            )));
        }
        if !self.k.is_finite() {
            return Err(DetectorError::InvalidParameter(format!(
                "k must be finite, got {}",
                self.k
            )));
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "threshold must be finite and non negative, got {}",
                self.threshold
            )));
        }
        if self.raster_scale < 1 {
            return Err(DetectorError::InvalidParameter(format!(
                "raster_scale must be at least 1, got {}",
                self.raster_scale
            )));
        }
        if !(self.raster_offset.is_finite() && self.raster_gain.is_finite()) {
            return Err(DetectorError::InvalidParameter(format!(
                "raster offset and gain must be finite, got {} and {}",
                self.raster_offset, self.raster_gain
            )));
        }
        self.strategy.validate()?;
        Ok(())
    }

    /// Parse and validate a config from a JSON string.
    ///
    /// Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Set the size and sigma of the gaussian window.
    pub fn with_window(mut self, size: usize, sigma: f32) -> Self {
        self.window_size = size;
        self.window_sigma = sigma;
        self
    }

    /// Set the harris sensitivity.
    pub fn with_k(mut self, k: f32) -> Self {
        self.k = k;
        self
    }

    /// Set the minimum response of a corner.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the scale, offset and gain of the response raster.
    pub fn with_raster(mut self, scale: usize, offset: f32, gain: f32) -> Self {
        self.raster_scale = scale;
        self.raster_offset = offset;
        self.raster_gain = gain;
        self
    }

    /// Set the value written at each corner of the annotated image.
    pub fn with_marker(mut self, marker: f32) -> Self {
        self.marker = marker;
        self
    }

    /// Set the border mode of every stencil pass.
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }

    /// Set the execution strategy of every row-parallel pass.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            border: self.border,
            strategy: self.strategy,
        }
    }
}

/// The corners of an image and a copy of it with each corner marked.
#[derive(Clone, Debug, PartialEq)]
pub struct HarrisOutput {
    /// The corners in row-major order.
    pub corners: Vec<CornerPoint>,
    /// The input image with the marker value at each corner.
    pub annotated: Image<f32>,
}

/// Every intermediate grid of one detection.
#[derive(Clone, Debug, PartialEq)]
pub struct HarrisTrace {
    /// The image derivatives.
    pub gradients: GradientPair,
    /// The raw gradient products.
    pub products: TensorChannels,
    /// The smoothed gradient products.
    pub tensor: TensorChannels,
    /// The cornerness map.
    pub response: Image<f32>,
    /// The detected corners and the annotated image.
    pub output: HarrisOutput,
}

/// Harris corner detector.
///
/// Built from a validated [`HarrisConfig`]; the gaussian window is created
/// once and reused across images.
#[derive(Clone, Debug)]
pub struct HarrisDetector {
    config: HarrisConfig,
    window: Kernel,
}

impl HarrisDetector {
    /// Create a new detector.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the config does not validate.
    pub fn new(config: HarrisConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        let window = gaussian_kernel_2d(config.window_size, config.window_sigma)?;
        Ok(Self { config, window })
    }

    /// The detector config.
    pub fn config(&self) -> &HarrisConfig {
        &self.config
    }

    /// The gaussian window used to smooth the structure tensor.
    pub fn window(&self) -> &Kernel {
        &self.window
    }

    fn check_input(&self, src: &Image<f32>) -> Result<(), DetectorError> {
        check_footprint(src, &self.window)
    }

    /// Compute the cornerness map of an image.
    pub fn response(&self, src: &Image<f32>) -> Result<Image<f32>, DetectorError> {
        self.check_input(src)?;
        let options = self.config.filter_options();
        let grads = spatial_gradient(src, &options)?;
        let tensor = structure_tensor(&grads, &self.window, &options)?;
        harris_response(&tensor, self.config.k, self.config.strategy)
    }

    fn finish(
        &self,
        src: &Image<f32>,
        response: &Image<f32>,
    ) -> Result<HarrisOutput, DetectorError> {
        let corners = non_max_suppression(response, self.config.threshold)?;
        let annotated = annotate_corners(src, &corners, self.config.marker)?;
        log::debug!("detected {} corners, image size {}", corners.len(), src.size());
        Ok(HarrisOutput { corners, annotated })
    }

    /// Detect the corners of an image.
    ///
    /// # Returns
    ///
    /// The corners in row-major order and a copy of `src` with the marker
    /// value at each corner.
    pub fn detect(&self, src: &Image<f32>) -> Result<HarrisOutput, DetectorError> {
        let response = self.response(src)?;
        self.finish(src, &response)
    }

    /// Detect the corners of an image and keep every intermediate grid.
    pub fn trace(&self, src: &Image<f32>) -> Result<HarrisTrace, DetectorError> {
        self.check_input(src)?;
        let options = self.config.filter_options();
        let gradients = spatial_gradient(src, &options)?;
        let products = gradient_products(&gradients, &options)?;
        let tensor = smooth_channels(&products, &self.window, &options)?;
        let response = harris_response(&tensor, self.config.k, self.config.strategy)?;
        let output = self.finish(src, &response)?;
        Ok(HarrisTrace {
            gradients,
            products,
            tensor,
            response,
            output,
        })
    }

    /// Magnify and quantize a cornerness map with the configured raster parameters.
    pub fn rasterize(&self, response: &Image<f32>) -> Result<Image<u8>, DetectorError> {
        rasterize_response(
            response,
            self.config.raster_scale,
            self.config.raster_offset,
            self.config.raster_gain,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() -> Result<(), DetectorError> {
        let config = HarrisConfig::default();
        config.validate()?;
        assert_eq!(config.window_size, 3);
        assert_eq!(config.window_sigma, 1.0);
        assert_eq!(config.k, 0.04);
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.raster_scale, 16);
        assert_eq!(config.marker, 9.0);
        assert_eq!(config.border, BorderMode::Constant);
        assert_eq!(config.strategy, ExecutionStrategy::ParallelRows);
        Ok(())
    }

    #[test]
    fn test_invalid_configs() {
        let base = HarrisConfig::default();
        for config in [
            base.with_window(4, 1.0),
            base.with_window(0, 1.0),
            base.with_window(3, 0.0),
            base.with_window(3, -2.0),
            base.with_k(f32::INFINITY),
            base.with_threshold(-0.5),
            base.with_threshold(f32::NAN),
            base.with_raster(0, 0.06, 700.0),
            base.with_raster(16, f32::NAN, 700.0),
        ] {
            assert!(matches!(
                HarrisDetector::new(config),
                Err(DetectorError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            HarrisDetector::new(base.with_strategy(ExecutionStrategy::Fixed(0))),
            Err(DetectorError::Parallel(_))
        ));
    }

    #[test]
    fn test_from_json_str() -> Result<(), ConfigError> {
        let config = HarrisConfig::from_json_str(
            r#"{"k": 0.06, "border": "reflect101", "strategy": {"fixed": 2}}"#,
        )?;
        assert_eq!(config.k, 0.06);
        assert_eq!(config.border, BorderMode::Reflect101);
        assert_eq!(config.strategy, ExecutionStrategy::Fixed(2));
        assert_eq!(config.threshold, DEFAULT_NMS_THRESHOLD);

        assert!(matches!(
            HarrisConfig::from_json_str(r#"{"window_size": 2}"#),
            Err(ConfigError::Invalid(DetectorError::InvalidParameter(_)))
        ));
        assert!(matches!(
            HarrisConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
        Ok(())
    }

    #[test]
    fn test_image_too_small() -> Result<(), DetectorError> {
        let detector = HarrisDetector::new(HarrisConfig::default().with_window(5, 1.0))?;
        let src = Image::from_size_val([4, 8].into(), 1.0f32)?;
        assert!(matches!(
            detector.detect(&src),
            Err(DetectorError::InvalidInput(_))
        ));
        assert!(matches!(
            detector.trace(&src),
            Err(DetectorError::InvalidInput(_))
        ));
        Ok(())
    }

    #[test]
    fn test_trace_matches_detect() -> Result<(), DetectorError> {
        let mut src = Image::from_size_val([9, 9].into(), 0.0f32)?;
        for r in 3..6 {
            for c in 3..6 {
                src.set_pixel(r, c, 1.0)?;
            }
        }
        let detector = HarrisDetector::new(HarrisConfig::default().with_threshold(0.0))?;
        let trace = detector.trace(&src)?;
        assert_eq!(trace.response, detector.response(&src)?);
        assert_eq!(trace.output, detector.detect(&src)?);
        assert_eq!(trace.products.sxx.get_pixel(4, 2)?, 1.0);
        assert_eq!(trace.gradients.dx.get_pixel(4, 2)?, 1.0);
        Ok(())
    }

    #[test]
    fn test_rasterize_huge_scale() -> Result<(), DetectorError> {
        // a valid scale can still overflow the raster of a given response
        let detector =
            HarrisDetector::new(HarrisConfig::default().with_raster(usize::MAX / 2, 0.06, 700.0))?;
        let response = Image::from_size_val([3, 3].into(), 0.0f32)?;
        assert!(matches!(
            detector.rasterize(&response),
            Err(DetectorError::InvalidParameter(_))
        ));
        Ok(())
    }
}
