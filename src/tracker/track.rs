//! Single tracked object.

use crate::tracker::kalman_filter::{KalmanFilter, MotionNoise};
use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;

const COLOR_PALETTE: [[u8; 3]; 10] = [
    [255, 64, 64],
    [64, 255, 64],
    [64, 64, 255],
    [255, 255, 64],
    [255, 64, 255],
    [64, 255, 255],
    [255, 128, 0],
    [128, 0, 255],
    [255, 128, 192],
    [128, 255, 128],
];

/// Display color for a track id. Stable across frames, never read by the
/// tracker itself.
pub fn track_color(track_id: u64) -> [u8; 3] {
    COLOR_PALETTE[(track_id % COLOR_PALETTE.len() as u64) as usize]
}

/// A persistent identity for one object across frames.
///
/// Tracks are advanced only by [`CentroidTracker::update`], which predicts
/// each one exactly once per frame:
///
/// ```compile_fail
/// use centroid_track::{CentroidTracker, Detection};
///
/// let mut tracker = CentroidTracker::default();
/// let mut track = tracker.update(&[Detection::new(0.0, 0.0, 10.0, 10.0)])[0].clone();
/// track.predict();
/// ```
///
/// [`CentroidTracker::update`]: crate::CentroidTracker::update
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier
    pub track_id: u64,
    /// Detection from the last frame this track was matched (or created)
    pub detection: Detection,
    /// Consecutive frames without a matching detection
    pub age: u32,
    /// Frames with a matching detection, counting the one that created it
    pub hits: u32,
    /// Display tag for renderers
    pub color: [u8; 3],
    kalman_filter: KalmanFilter,
}

impl Track {
    /// Start a track from `detection`.
    ///
    /// The filter is seeded at the detection center and stepped forward once
    /// so the track already carries a prior for the next frame.
    pub fn new(track_id: u64, detection: Detection, noise: MotionNoise) -> Self {
        let (cx, cy) = detection.center();
        let mut kalman_filter = KalmanFilter::initiate(cx as f64, cy as f64, noise);
        kalman_filter.predict();

        Self {
            track_id,
            detection,
            age: 0,
            hits: 1,
            color: track_color(track_id),
            kalman_filter,
        }
    }

    /// Advance the motion model one frame and return the expected center.
    pub(crate) fn predict(&mut self) -> (f64, f64) {
        self.kalman_filter.predict()
    }

    /// Apply a matching detection.
    pub(crate) fn update(&mut self, detection: Detection) {
        let (cx, cy) = detection.center();
        self.kalman_filter.correct(cx as f64, cy as f64);
        self.detection = detection;
        self.age = 0;
        self.hits += 1;
    }

    /// Record a frame without a matching detection.
    pub(crate) fn mark_missed(&mut self) {
        self.age += 1;
    }

    /// Bounding box of the last matched detection.
    pub fn rect(&self) -> Rect {
        self.detection.bbox
    }

    /// Filtered center estimate.
    pub fn predicted_center(&self) -> (f64, f64) {
        self.kalman_filter.position()
    }

    /// Estimated velocity in pixels per frame.
    pub fn velocity(&self) -> (f64, f64) {
        self.kalman_filter.velocity()
    }
}
