use cornerness_image::{Image, ImageSize};

use crate::error::DetectorError;
use crate::parallel::{fill_rows, ExecutionStrategy};

/// Quantize a response value to a byte.
///
/// NaN maps to zero, infinities saturate.
#[inline]
fn quantize(value: f32, offset: f32, gain: f32) -> u8 {
    let v = ((value + offset) * gain).round();
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Magnify a response map and quantize it to bytes for inspection.
///
/// Each source pixel becomes a constant `scale × scale` block holding
/// `clamp(round((response + offset) * gain), 0, 255)`.
///
/// # Arguments
///
/// * `response` - The response map with shape (H, W).
/// * `scale` - The magnification, at least one.
/// * `offset` - Added to the response before the gain.
/// * `gain` - Multiplies the offset response.
///
/// # Returns
///
/// The raster with shape (H * scale, W * scale).
///
/// # Errors
///
/// `InvalidParameter` if `scale` is zero or the magnified size overflows,
/// an image error if the raster does not fit in memory.
///
/// # Examples
///
/// ```
/// use cornerness_image::Image;
/// use cornerness_imgproc::visualize::rasterize_response;
///
/// let response = Image::from_rows(&[[0.0f32, 0.4]]).unwrap();
/// let raster = rasterize_response(&response, 2, 0.06, 700.0).unwrap();
///
/// assert_eq!(raster.as_slice(), &[42, 42, 255, 255, 42, 42, 255, 255]);
/// ```
pub fn rasterize_response(
    response: &Image<f32>,
    scale: usize,
    offset: f32,
    gain: f32,
) -> Result<Image<u8>, DetectorError> {
    if scale < 1 {
        return Err(DetectorError::InvalidParameter(format!(
            "raster scale must be at least 1, got {scale}"
        )));
    }

    let src_cols = response.cols();
    let size = match (
        src_cols.checked_mul(scale),
        response.rows().checked_mul(scale),
    ) {
        (Some(width), Some(height)) => ImageSize { width, height },
        _ => {
            return Err(DetectorError::InvalidParameter(format!(
                "raster scale {scale} overflows the {} raster size",
                response.size()
            )))
        }
    };
    let src_data = response.as_slice();
    let mut dst = Image::from_size_val(size, 0u8)?;

    fill_rows(
        dst.as_slice_mut(),
        size.width,
        ExecutionStrategy::default(),
        |j, dst_row| {
            let src_row = &src_data[(j / scale) * src_cols..(j / scale + 1) * src_cols];
            dst_row
                .iter_mut()
                .enumerate()
                .for_each(|(i, px)| *px = quantize(src_row[i / scale], offset, gain));
        },
    )?;

    Ok(dst)
}
