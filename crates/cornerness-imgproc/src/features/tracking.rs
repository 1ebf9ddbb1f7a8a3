//! Seed an external point tracker with harris corners and carry the points
//! that stay matched from frame to frame.
//!
//! The tracker itself, e.g. a pyramidal Lucas-Kanade optical flow, lives
//! outside this crate behind the [`PointTracker`] trait.

use cornerness_image::Image;

use super::{CornerPoint, HarrisDetector};
use crate::error::DetectorError;

/// Status of a point after one frame to frame tracking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackStatus {
    /// Found in the next frame.
    Tracked,
    /// The tracker could not find the point.
    Lost,
    /// The tracked position fell outside the image.
    OutOfBounds,
}

/// A point position with its tracking status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoint {
    /// The `[x, y]` position in the next frame.
    ///
    /// Unreliable unless `status` is [`TrackStatus::Tracked`].
    pub position: [f32; 2],
    /// Tracking outcome.
    pub status: TrackStatus,
}

/// A point matched between two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    /// The `[x, y]` position in the previous frame.
    pub previous: [f32; 2],
    /// The `[x, y]` position in the current frame.
    pub current: [f32; 2],
}

/// A frame to frame point tracker.
pub trait PointTracker {
    /// The error returned when tracking fails as a whole.
    type Error: std::error::Error + 'static;

    /// Track `points` from `prev` to `next`.
    ///
    /// Must return one [`TrackedPoint`] per input point, in the same order.
    fn track(
        &mut self,
        prev: &Image<f32>,
        next: &Image<f32>,
        points: &[[f32; 2]],
    ) -> Result<Vec<TrackedPoint>, Self::Error>;
}

/// An error of the tracking driver.
#[derive(thiserror::Error, Debug)]
pub enum TrackingError<E: std::error::Error + 'static> {
    /// Error coming from the detector or from malformed tracker output.
    #[error(transparent)]
    Detector(#[from] DetectorError),

    /// Error coming from the tracker.
    #[error("point tracker failed: {0}")]
    Tracker(#[source] E),
}

/// Convert corners to `[x, y]` tracker seeds, `x` being the column.
pub fn corner_seeds(corners: &[CornerPoint]) -> Vec<[f32; 2]> {
    corners
        .iter()
        .map(|c| [c.col as f32, c.row as f32])
        .collect()
}

/// Pair each previous point with its tracked position, keeping only the tracked ones.
///
/// # Errors
///
/// `InvalidInput` if the tracker returned a different number of points.
pub fn matched_correspondences(
    previous: &[[f32; 2]],
    tracked: &[TrackedPoint],
) -> Result<Vec<Correspondence>, DetectorError> {
    if previous.len() != tracked.len() {
        return Err(DetectorError::InvalidInput(format!(
            "tracker returned {} points for {} seeds",
            tracked.len(),
            previous.len()
        )));
    }

    Ok(previous
        .iter()
        .zip(tracked)
        .filter(|(_, t)| t.status == TrackStatus::Tracked)
        .map(|(&previous, t)| Correspondence {
            previous,
            current: t.position,
        })
        .collect())
}

/// Track the corners of the first frame through the rest of the sequence.
///
/// The points matched in a frame become the seeds of the next one, lost
/// points are dropped for good.
///
/// # Returns
///
/// The correspondences of each consecutive frame pair.
///
/// # Errors
///
/// `InvalidInput` if `frames` is empty, or any detector or tracker error.
pub fn track_frames<I, T>(
    frames: I,
    detector: &HarrisDetector,
    tracker: &mut T,
) -> Result<Vec<Vec<Correspondence>>, TrackingError<T::Error>>
where
    I: IntoIterator<Item = Image<f32>>,
    T: PointTracker,
{
    let mut frames = frames.into_iter();
    let Some(mut prev) = frames.next() else {
        return Err(DetectorError::InvalidInput("the frame sequence is empty".to_string()).into());
    };

    let mut points = corner_seeds(&detector.detect(&prev)?.corners);
    log::debug!("seeded {} points from the first frame", points.len());

    let mut matches = Vec::new();
    for (idx, next) in frames.enumerate() {
        let tracked = tracker
            .track(&prev, &next, &points)
            .map_err(TrackingError::Tracker)?;
        let pairs = matched_correspondences(&points, &tracked)?;
        log::debug!(
            "frame {}: {} of {} points tracked",
            idx + 1,
            pairs.len(),
            points.len()
        );

        points = pairs.iter().map(|p| p.current).collect();
        matches.push(pairs);
        prev = next;
    }

    Ok(matches)
}
