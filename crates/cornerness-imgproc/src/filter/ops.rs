use cornerness_image::Image;
use serde::{Deserialize, Serialize};

use super::Kernel;
use crate::error::DetectorError;
use crate::padding::BorderMode;
use crate::parallel::{fill_rows, ExecutionStrategy};

/// Options shared by every stencil pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// How samples outside the image are read.
    pub border: BorderMode,
    /// How rows are scheduled.
    pub strategy: ExecutionStrategy,
}

/// Check that `kernel` fits inside `src` along both axes.
pub(crate) fn check_footprint(src: &Image<f32>, kernel: &Kernel) -> Result<(), DetectorError> {
    if src.rows() < kernel.rows() || src.cols() < kernel.cols() {
        return Err(DetectorError::InvalidInput(format!(
            "image of {}x{} pixels is smaller than the {}x{} kernel footprint",
            src.cols(),
            src.rows(),
            kernel.cols(),
            kernel.rows()
        )));
    }
    Ok(())
}

/// Convolve an image with a 2-D kernel.
///
/// Each output pixel is the weighted sum of the kernel footprint centered on
/// it: tap (`i`, `j`) weights the sample at
/// (`row + i - kh / 2`, `col + j - kw / 2`).
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `kernel` - The kernel to apply.
/// * `border` - How samples outside the image are read.
///
/// # Returns
///
/// A new image with shape (H, W).
///
/// # Errors
///
/// If the image is smaller than the kernel along one of the axes, an
/// `InvalidInput` error is returned.
///
/// # Examples
///
/// ```
/// use cornerness_image::Image;
/// use cornerness_imgproc::filter::{convolve, kernels::{derivative_kernel_1d, Axis}};
/// use cornerness_imgproc::padding::BorderMode;
///
/// let src = Image::from_rows(&[[1.0f32, 2.0, 4.0]]).unwrap();
/// let kernel = derivative_kernel_1d(Axis::Horizontal).unwrap();
/// let dx = convolve(&src, &kernel, BorderMode::Constant).unwrap();
///
/// assert_eq!(dx.as_slice(), &[2.0, 3.0, -2.0]);
/// ```
pub fn convolve(
    src: &Image<f32>,
    kernel: &Kernel,
    border: BorderMode,
) -> Result<Image<f32>, DetectorError> {
    convolve_with(
        src,
        kernel,
        &FilterOptions {
            border,
            ..Default::default()
        },
    )
}

/// Convolve an image with a 2-D kernel using the given filter options.
///
/// See [`convolve`].
pub fn convolve_with(
    src: &Image<f32>,
    kernel: &Kernel,
    options: &FilterOptions,
) -> Result<Image<f32>, DetectorError> {
    check_footprint(src, kernel)?;

    let (rows, cols) = (src.rows(), src.cols());
    let (half_y, half_x) = ((kernel.rows() / 2) as isize, (kernel.cols() / 2) as isize);
    let weights = kernel.as_slice();
    let src_data = src.as_slice();
    let border = options.border;

    let mut dst = Image::from_size_val(src.size(), 0.0f32)?;

    fill_rows(dst.as_slice_mut(), cols, options.strategy, |r, dst_row| {
        for (c, dst_pixel) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (ky, kernel_row) in weights.chunks_exact(kernel.cols()).enumerate() {
                let Some(y) = border.map_index(r as isize + ky as isize - half_y, rows) else {
                    continue;
                };
                let src_row = &src_data[y * cols..(y + 1) * cols];
                for (kx, &k) in kernel_row.iter().enumerate() {
                    if let Some(x) = border.map_index(c as isize + kx as isize - half_x, cols) {
                        acc += src_row[x] * k;
                    }
                }
            }
            *dst_pixel = acc;
        }
    })?;

    Ok(dst)
}
