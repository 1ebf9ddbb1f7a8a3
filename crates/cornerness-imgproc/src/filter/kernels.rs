use cornerness_image::{Image, ImageSize};

use crate::error::DetectorError;

/// The image axis a 1-D kernel is laid along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Along a row, i.e. a 1×k kernel.
    Horizontal,
    /// Along a column, i.e. a k×1 kernel.
    Vertical,
}

/// A filter kernel with odd height and odd width.
///
/// The tap at (`height / 2`, `width / 2`) is the kernel center.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel(Image<f32>);

impl Kernel {
    /// Create a kernel from its weights.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the kernel. Both dimensions must be odd.
    /// * `weights` - The kernel weights in row-major order.
    ///
    /// # Errors
    ///
    /// If one of the dimensions is even or the weights do not match the size,
    /// an `InvalidParameter` error is returned.
    pub fn new(size: ImageSize, weights: Vec<f32>) -> Result<Self, DetectorError> {
        if size.width % 2 == 0 || size.height % 2 == 0 {
            return Err(DetectorError::InvalidParameter(format!(
                "kernel dimensions must be odd, got {}x{}",
                size.width, size.height
            )));
        }
        let image = Image::new(size, weights)
            .map_err(|e| DetectorError::InvalidParameter(format!("invalid kernel: {e}")))?;
        Ok(Self(image))
    }

    /// Create a 1-D kernel laid along `axis`.
    pub fn from_1d(weights: &[f32], axis: Axis) -> Result<Self, DetectorError> {
        let size = match axis {
            Axis::Horizontal => ImageSize {
                width: weights.len(),
                height: 1,
            },
            Axis::Vertical => ImageSize {
                width: 1,
                height: weights.len(),
            },
        };
        Self::new(size, weights.to_vec())
    }

    /// Create the outer product `col · rowᵀ` of two 1-D kernels.
    pub fn outer(col: &[f32], row: &[f32]) -> Result<Self, DetectorError> {
        let weights = col
            .iter()
            .flat_map(|&c| row.iter().map(move |&r| c * r))
            .collect();
        Self::new(
            ImageSize {
                width: row.len(),
                height: col.len(),
            },
            weights,
        )
    }

    /// The size of the kernel footprint.
    pub fn size(&self) -> ImageSize {
        self.0.size()
    }

    /// The number of kernel rows.
    pub fn rows(&self) -> usize {
        self.0.rows()
    }

    /// The number of kernel columns.
    pub fn cols(&self) -> usize {
        self.0.cols()
    }

    /// The kernel weights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        self.0.as_slice()
    }
}

/// The central difference kernel `[-1, 0, 1]`.
pub const DERIVATIVE_KERNEL_1D: [f32; 3] = [-1.0, 0.0, 1.0];

/// Create the 3-tap central difference kernel oriented along `axis`.
///
/// # Examples
///
/// ```
/// use cornerness_imgproc::filter::kernels::{derivative_kernel_1d, Axis};
///
/// let kernel = derivative_kernel_1d(Axis::Vertical).unwrap();
/// assert_eq!((kernel.rows(), kernel.cols()), (3, 1));
/// assert_eq!(kernel.as_slice(), &[-1.0, 0.0, 1.0]);
/// ```
pub fn derivative_kernel_1d(axis: Axis) -> Result<Kernel, DetectorError> {
    Kernel::from_1d(&DERIVATIVE_KERNEL_1D, axis)
}

fn check_gaussian_params(kernel_size: usize, sigma: f32) -> Result<(), DetectorError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(DetectorError::InvalidParameter(format!(
            "gaussian kernel size must be odd and positive, got {kernel_size}"
        )));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(DetectorError::InvalidParameter(format!(
            "gaussian sigma must be positive, got {sigma}"
        )));
    }
    Ok(())
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel, odd.
/// * `sigma` - The sigma of the gaussian kernel, positive.
///
/// # Returns
///
/// A vector of the kernel normalized to sum one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, DetectorError> {
    check_gaussian_params(kernel_size, sigma)?;

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create a square 2-D gaussian kernel as the outer product of two 1-D gaussians.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel along both axes, odd.
/// * `sigma` - The sigma of the gaussian kernel, positive.
pub fn gaussian_kernel_2d(kernel_size: usize, sigma: f32) -> Result<Kernel, DetectorError> {
    let kernel = gaussian_kernel_1d(kernel_size, sigma)?;
    Kernel::outer(&kernel, &kernel)
}
