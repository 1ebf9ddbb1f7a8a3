use cornerness_image::Image;

use super::TensorChannels;
use crate::error::DetectorError;
use crate::parallel::{fill_rows, ExecutionStrategy};

/// The default sensitivity of the harris response.
pub const DEFAULT_HARRIS_K: f32 = 0.04;

/// Computes the harris response of a structure tensor.
///
/// For each pixel `det - k * trace²` with `det = sxx * syy - sxy²` and
/// `trace = sxx + syy`. The values are not clamped nor normalized, so edges
/// give negative responses.
///
/// # Arguments
///
/// * `tensor` - The smoothed structure tensor channels.
/// * `k` - The sensitivity, usually between 0.04 and 0.06.
/// * `strategy` - How the rows are scheduled.
///
/// # Errors
///
/// `InvalidParameter` if `k` is not finite, `InvalidInput` if the channels
/// differ in size.
pub fn harris_response(
    tensor: &TensorChannels,
    k: f32,
    strategy: ExecutionStrategy,
) -> Result<Image<f32>, DetectorError> {
    if !k.is_finite() {
        return Err(DetectorError::InvalidParameter(format!(
            "harris k must be finite, got {k}"
        )));
    }

    let TensorChannels { sxx, syy, sxy } = tensor;
    if sxx.size() != syy.size() || sxx.size() != sxy.size() {
        return Err(DetectorError::InvalidInput(format!(
            "tensor channel sizes differ: {}, {}, {}",
            sxx.size(),
            syy.size(),
            sxy.size()
        )));
    }

    let cols = sxx.cols();
    let (xx, yy, xy) = (sxx.as_slice(), syy.as_slice(), sxy.as_slice());
    let mut dst = Image::from_size_val(sxx.size(), 0.0f32)?;

    fill_rows(dst.as_slice_mut(), cols, strategy, |r, dst_row| {
        let offset = r * cols;
        dst_row.iter_mut().enumerate().for_each(|(c, dst_pixel)| {
            let (a, b, m) = (xx[offset + c], yy[offset + c], xy[offset + c]);
            let det = a * b - m * m;
            let trace = a + b;
            *dst_pixel = det - k * trace * trace;
        });
    })?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tensor(sxx: f32, syy: f32, sxy: f32) -> Result<TensorChannels, DetectorError> {
        let size = [2, 1].into();
        Ok(TensorChannels {
            sxx: Image::from_size_val(size, sxx)?,
            syy: Image::from_size_val(size, syy)?,
            sxy: Image::from_size_val(size, sxy)?,
        })
    }

    #[test]
    fn test_harris_response_formula() -> Result<(), DetectorError> {
        let response = harris_response(&tensor(2.0, 3.0, 1.0)?, 0.04, ExecutionStrategy::Serial)?;
        // det = 5, trace = 5
        for &v in response.as_slice() {
            assert_relative_eq!(v, 5.0 - 0.04 * 25.0);
        }
        Ok(())
    }

    #[test]
    fn test_harris_response_edge_is_negative() -> Result<(), DetectorError> {
        let response = harris_response(&tensor(4.0, 0.0, 0.0)?, DEFAULT_HARRIS_K, Default::default())?;
        assert!(response.as_slice().iter().all(|&v| v < 0.0));
        Ok(())
    }

    #[test]
    fn test_harris_response_zero() -> Result<(), DetectorError> {
        let response = harris_response(&tensor(0.0, 0.0, 0.0)?, DEFAULT_HARRIS_K, Default::default())?;
        assert!(response.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn test_harris_response_invalid() -> Result<(), DetectorError> {
        let res = harris_response(&tensor(1.0, 1.0, 0.0)?, f32::NAN, Default::default());
        assert!(matches!(res, Err(DetectorError::InvalidParameter(_))));

        let mut bad = tensor(1.0, 1.0, 0.0)?;
        bad.sxy = Image::from_size_val([3, 1].into(), 0.0)?;
        let res = harris_response(&bad, DEFAULT_HARRIS_K, Default::default());
        assert!(matches!(res, Err(DetectorError::InvalidInput(_))));
        Ok(())
    }
}
