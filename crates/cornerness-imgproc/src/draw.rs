use cornerness_image::Image;

use crate::error::DetectorError;
use crate::features::CornerPoint;

/// Mark the corners on a copy of an image.
///
/// # Arguments
///
/// * `img` - The image the corners were detected on.
/// * `corners` - The corners to mark.
/// * `marker` - The value written at each corner.
///
/// # Returns
///
/// A copy of `img` with `marker` at each corner; `img` itself is left untouched.
///
/// # Errors
///
/// If a corner lies outside the image, an error is returned.
pub fn annotate_corners<T: Copy>(
    img: &Image<T>,
    corners: &[CornerPoint],
    marker: T,
) -> Result<Image<T>, DetectorError> {
    let mut annotated = img.clone();
    for corner in corners {
        annotated.set_pixel(corner.row, corner.col, marker)?;
    }
    Ok(annotated)
}
