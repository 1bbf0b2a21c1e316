//! Multi-object tracking by motion prediction and optimal assignment.
//!
//! Each frame's detections are matched to existing tracks by solving a
//! Hungarian assignment over the Euclidean distance between detection
//! centers and each track's constant-velocity Kalman prediction. Unmatched
//! detections start new tracks; unmatched tracks age and are evicted once
//! they exceed the configured grace period.
//!
//! ```
//! use centroid_track::{CentroidTracker, Detection};
//!
//! let mut tracker = CentroidTracker::default();
//! let tracks = tracker.update(&[Detection::new(0.0, 0.0, 20.0, 20.0)]);
//! assert_eq!(tracks[0].track_id, 1);
//! ```

mod error;
pub mod integration;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{CentroidTracker, Detection, Rect, Track, TrackerConfig};
