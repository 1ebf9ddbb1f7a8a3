use crate::{Image, ImageError};

/// Combine two images of the same size pixel by pixel.
///
/// # Arguments
///
/// * `src1` - The first source image.
/// * `src2` - The second source image.
/// * `f` - The function applied to each pair of pixels.
///
/// # Errors
///
/// If the two images do not have the same size, an error is returned.
pub fn zip_with<T, U, V>(
    src1: &Image<T>,
    src2: &Image<U>,
    f: impl Fn(&T, &U) -> V,
) -> Result<Image<V>, ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            src2.width(),
            src2.height(),
        ));
    }

    let data = src1
        .as_slice()
        .iter()
        .zip(src2.as_slice().iter())
        .map(|(a, b)| f(a, b))
        .collect();

    Image::new(src1.size(), data)
}

/// Add two images elementwise.
///
/// Example:
///
/// ```
/// use cornerness_image::{Image, ImageSize};
/// use cornerness_image::ops::add;
///
/// let a = Image::<f32>::new([2, 1].into(), vec![1.0, 2.0]).unwrap();
/// let b = Image::<f32>::new([2, 1].into(), vec![3.0, 4.0]).unwrap();
///
/// assert_eq!(add(&a, &b).unwrap().as_slice(), &[4.0, 6.0]);
/// ```
pub fn add(src1: &Image<f32>, src2: &Image<f32>) -> Result<Image<f32>, ImageError> {
    zip_with(src1, src2, |a, b| a + b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_with() -> Result<(), ImageError> {
        let a = Image::<f32>::new([3, 1].into(), vec![1.0, -2.0, 3.0])?;
        let b = Image::<u8>::new([3, 1].into(), vec![2, 0, 1])?;
        let c = zip_with(&a, &b, |x, &y| x * y as f32)?;
        assert_eq!(c.as_slice(), &[2.0, 0.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_size_mismatch() -> Result<(), ImageError> {
        let a = Image::<f32>::from_size_val([3, 1].into(), 0.0)?;
        let b = Image::<f32>::from_size_val([1, 3].into(), 0.0)?;
        assert_eq!(add(&a, &b), Err(ImageError::InvalidImageSize(3, 1, 1, 3)));
        Ok(())
    }
}
