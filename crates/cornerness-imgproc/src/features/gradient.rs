use cornerness_image::Image;

use crate::error::DetectorError;
use crate::filter::{
    convolve_with,
    kernels::{derivative_kernel_1d, Axis},
    FilterOptions,
};

/// The horizontal and vertical derivatives of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientPair {
    /// The derivative along the columns, `I(r, c + 1) - I(r, c - 1)`.
    pub dx: Image<f32>,
    /// The derivative along the rows, `I(r + 1, c) - I(r - 1, c)`.
    pub dy: Image<f32>,
}

/// Compute the first order image derivatives with central differences.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `options` - The border mode and execution strategy.
///
/// # Returns
///
/// The derivatives, both with shape (H, W).
pub fn spatial_gradient(
    src: &Image<f32>,
    options: &FilterOptions,
) -> Result<GradientPair, DetectorError> {
    let dx = convolve_with(src, &derivative_kernel_1d(Axis::Horizontal)?, options)?;
    let dy = convolve_with(src, &derivative_kernel_1d(Axis::Vertical)?, options)?;
    Ok(GradientPair { dx, dy })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_gradient_ramp() -> Result<(), DetectorError> {
        #[rustfmt::skip]
        let src = Image::from_rows(&[
            [0.0f32, 1.0, 2.0, 3.0],
            [0.0, 1.0, 2.0, 3.0],
            [0.0, 1.0, 2.0, 3.0],
        ])?;

        let grads = spatial_gradient(&src, &FilterOptions::default())?;

        #[rustfmt::skip]
        assert_eq!(grads.dx.as_slice(), &[
            1.0, 2.0, 2.0, -2.0,
            1.0, 2.0, 2.0, -2.0,
            1.0, 2.0, 2.0, -2.0,
        ]);

        #[rustfmt::skip]
        assert_eq!(grads.dy.as_slice(), &[
            0.0, 1.0, 2.0, 3.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, -1.0, -2.0, -3.0,
        ]);
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_too_small() -> Result<(), DetectorError> {
        let src = Image::from_size_val([4, 2].into(), 1.0f32)?;
        let res = spatial_gradient(&src, &FilterOptions::default());
        assert!(matches!(res, Err(DetectorError::InvalidInput(_))));
        Ok(())
    }
}
