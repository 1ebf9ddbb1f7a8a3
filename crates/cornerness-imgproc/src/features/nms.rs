use cornerness_image::Image;
use serde::{Deserialize, Serialize};

use crate::error::DetectorError;

/// The default minimum response of a corner.
pub const DEFAULT_NMS_THRESHOLD: f32 = 0.1;

/// A detected corner with its position and response.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerPoint {
    /// The row of the corner.
    pub row: usize,
    /// The column of the corner.
    pub col: usize,
    /// The response at the corner.
    pub score: f32,
}

impl CornerPoint {
    /// Creates a new corner with the specified position and score.
    pub fn new(row: usize, col: usize, score: f32) -> Self {
        CornerPoint { row, col, score }
    }
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Check whether the pixel at (`row`, `col`) is a strict local maximum.
///
/// The pixel must be greater than all of its 8 neighbors; a tie with any
/// neighbor disqualifies it. Pixels on the image border are never maxima.
///
/// # Examples
///
/// ```
/// use cornerness_image::Image;
/// use cornerness_imgproc::features::is_strict_local_max;
///
/// let response = Image::from_rows(&[
///     [0.0f32, 0.0, 0.0],
///     [0.0, 1.0, 1.0],
///     [0.0, 0.0, 0.0],
/// ]).unwrap();
/// assert!(!is_strict_local_max(&response, 1, 1));
/// ```
pub fn is_strict_local_max(response: &Image<f32>, row: usize, col: usize) -> bool {
    let (rows, cols) = (response.rows(), response.cols());
    if row == 0 || col == 0 || row + 1 >= rows || col + 1 >= cols {
        return false;
    }

    let data = response.as_slice();
    let center = data[row * cols + col];
    NEIGHBORS.iter().all(|&(dr, dc)| {
        let r = (row as isize + dr) as usize;
        let c = (col as isize + dc) as usize;
        center > data[r * cols + c]
    })
}

/// Keep the interior pixels that exceed `threshold` and are strict local maxima.
///
/// # Arguments
///
/// * `response` - The cornerness map.
/// * `threshold` - The minimum response, non negative.
///
/// # Returns
///
/// The corners in row-major order.
pub fn non_max_suppression(
    response: &Image<f32>,
    threshold: f32,
) -> Result<Vec<CornerPoint>, DetectorError> {
    if !(threshold.is_finite() && threshold >= 0.0) {
        return Err(DetectorError::InvalidParameter(format!(
            "nms threshold must be finite and non negative, got {threshold}"
        )));
    }

    let (rows, cols) = (response.rows(), response.cols());
    let data = response.as_slice();
    let mut corners = Vec::new();

    for row in 1..rows.saturating_sub(1) {
        for col in 1..cols.saturating_sub(1) {
            let score = data[row * cols + col];
            if score > threshold && is_strict_local_max(response, row, col) {
                corners.push(CornerPoint::new(row, col, score));
            }
        }
    }

    log::debug!("nms kept {} corners over {}", corners.len(), threshold);

    Ok(corners)
}
