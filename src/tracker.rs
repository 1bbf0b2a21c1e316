mod centroid_tracker;
pub mod hungarian;
mod kalman_filter;
mod lifecycle;
pub mod matching;
mod rect;
mod track;

pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use kalman_filter::{KalmanFilter, MotionNoise};
pub use lifecycle::TrackRegistry;
pub use matching::{AssignmentResult, Detection};
pub use rect::Rect;
pub use track::{Track, track_color};
