use cornerness_image::Image;

use super::GradientPair;
use crate::error::DetectorError;
use crate::filter::{check_footprint, convolve_with, FilterOptions, Kernel};
use crate::parallel::fill_rows;

/// The second moment channels of the image gradients.
///
/// Holds the raw products or, after smoothing, the structure tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorChannels {
    /// The `dx * dx` channel.
    pub sxx: Image<f32>,
    /// The `dy * dy` channel.
    pub syy: Image<f32>,
    /// The `dx * dy` channel.
    pub sxy: Image<f32>,
}

/// Elementwise `a * b` computed row by row with the given strategy.
fn product(
    a: &Image<f32>,
    b: &Image<f32>,
    options: &FilterOptions,
) -> Result<Image<f32>, DetectorError> {
    let cols = a.cols();
    let (a_data, b_data) = (a.as_slice(), b.as_slice());
    let mut dst = Image::from_size_val(a.size(), 0.0f32)?;
    fill_rows(dst.as_slice_mut(), cols, options.strategy, |r, dst_row| {
        let a_row = &a_data[r * cols..(r + 1) * cols];
        let b_row = &b_data[r * cols..(r + 1) * cols];
        dst_row
            .iter_mut()
            .zip(a_row.iter().zip(b_row))
            .for_each(|(d, (&x, &y))| *d = x * y);
    })?;
    Ok(dst)
}

/// Compute the elementwise gradient products `dx²`, `dy²` and `dx·dy`.
///
/// # Errors
///
/// `InvalidInput` if the derivatives differ in size.
pub fn gradient_products(
    grads: &GradientPair,
    options: &FilterOptions,
) -> Result<TensorChannels, DetectorError> {
    let GradientPair { dx, dy } = grads;
    if dx.size() != dy.size() {
        return Err(DetectorError::InvalidInput(format!(
            "gradient sizes differ: {} vs {}",
            dx.size(),
            dy.size()
        )));
    }

    Ok(TensorChannels {
        sxx: product(dx, dx, options)?,
        syy: product(dy, dy, options)?,
        sxy: product(dx, dy, options)?,
    })
}

/// Smooth each tensor channel on its own with `window`.
pub fn smooth_channels(
    channels: &TensorChannels,
    window: &Kernel,
    options: &FilterOptions,
) -> Result<TensorChannels, DetectorError> {
    Ok(TensorChannels {
        sxx: convolve_with(&channels.sxx, window, options)?,
        syy: convolve_with(&channels.syy, window, options)?,
        sxy: convolve_with(&channels.sxy, window, options)?,
    })
}

/// Compute the structure tensor of an image from its gradients.
///
/// The products `dx²`, `dy²` and `dx·dy` are formed first, then each channel
/// is smoothed on its own with `window`.
///
/// # Arguments
///
/// * `grads` - The image derivatives.
/// * `window` - The smoothing kernel, usually a gaussian.
/// * `options` - The border mode and execution strategy.
///
/// # Errors
///
/// `InvalidInput` if the derivatives differ in size or are smaller than the
/// smoothing window.
pub fn structure_tensor(
    grads: &GradientPair,
    window: &Kernel,
    options: &FilterOptions,
) -> Result<TensorChannels, DetectorError> {
    check_footprint(&grads.dx, window)?;
    let products = gradient_products(grads, options)?;
    smooth_channels(&products, window, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels::gaussian_kernel_2d;
    use approx::assert_relative_eq;

    fn grads_from(dx: &[[f32; 3]], dy: &[[f32; 3]]) -> Result<GradientPair, DetectorError> {
        Ok(GradientPair {
            dx: Image::from_rows(dx)?,
            dy: Image::from_rows(dy)?,
        })
    }

    #[test]
    fn test_products_before_smoothing() -> Result<(), DetectorError> {
        #[rustfmt::skip]
        let grads = grads_from(
            &[[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 0.0]],
            &[[0.0, 0.0, 0.0], [0.0, -3.0, 0.0], [0.0, 0.0, 0.0]],
        )?;
        let window = gaussian_kernel_2d(3, 1.0)?;
        let tensor = structure_tensor(&grads, &window, &FilterOptions::default())?;

        // a single impulse spreads the kernel weights around the center
        let w = window.as_slice();
        for (i, &wi) in w.iter().enumerate() {
            let flipped = w.len() - 1 - i;
            assert_relative_eq!(tensor.sxx.as_slice()[flipped], 4.0 * wi, max_relative = 1e-6);
            assert_relative_eq!(tensor.syy.as_slice()[flipped], 9.0 * wi, max_relative = 1e-6);
            assert_relative_eq!(tensor.sxy.as_slice()[flipped], -6.0 * wi, max_relative = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_gradient_products() -> Result<(), DetectorError> {
        let grads = grads_from(&[[1.0, -2.0, 3.0]; 3], &[[2.0, 2.0, 0.5]; 3])?;
        let products = gradient_products(&grads, &FilterOptions::default())?;
        assert_eq!(products.sxx.row(1), Some(&[1.0f32, 4.0, 9.0][..]));
        assert_eq!(products.syy.row(1), Some(&[4.0f32, 4.0, 0.25][..]));
        assert_eq!(products.sxy.row(1), Some(&[2.0f32, -4.0, 1.5][..]));
        Ok(())
    }

    #[test]
    fn test_structure_tensor_size_mismatch() -> Result<(), DetectorError> {
        let grads = GradientPair {
            dx: Image::from_size_val([3, 3].into(), 1.0f32)?,
            dy: Image::from_size_val([4, 3].into(), 1.0f32)?,
        };
        let window = gaussian_kernel_2d(3, 1.0)?;
        let res = structure_tensor(&grads, &window, &FilterOptions::default());
        assert!(matches!(res, Err(DetectorError::InvalidInput(_))));
        Ok(())
    }

    #[test]
    fn test_structure_tensor_window_too_large() -> Result<(), DetectorError> {
        let grads = grads_from(&[[1.0; 3]; 3], &[[1.0; 3]; 3])?;
        let window = gaussian_kernel_2d(5, 1.0)?;
        let res = structure_tensor(&grads, &window, &FilterOptions::default());
        assert!(matches!(res, Err(DetectorError::InvalidInput(_))));
        Ok(())
    }
}
