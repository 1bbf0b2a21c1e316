//! Seam between a detector and [`CentroidTracker`](crate::CentroidTracker).

use crate::tracker::Detection;

/// Anything that turns one frame into boxes.
///
/// The tracker only looks at box centers, so a source needs no scores or
/// class labels. A canned list is enough for replaying recorded frames:
///
/// ```
/// use centroid_track::{Detection, DetectionSource};
///
/// struct FixedDetector(Vec<Detection>);
///
/// impl DetectionSource for FixedDetector {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         _input: &[u8],
///         _width: u32,
///         _height: u32,
///     ) -> Result<Vec<Detection>, Self::Error> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait DetectionSource {
    type Error;

    /// Detect objects in a `width` x `height` frame. The pixel layout of
    /// `input` is up to the implementor; boxes come back in that frame's
    /// pixel coordinates.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Conversion from a detector's native box list.
pub trait IntoDetections {
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// TLBR boxes `[x1, y1, x2, y2]`, the layout most detector heads emit.
impl IntoDetections for Vec<[f32; 4]> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|[x1, y1, x2, y2]| Detection::new(x1, y1, x2, y2))
            .collect()
    }
}
