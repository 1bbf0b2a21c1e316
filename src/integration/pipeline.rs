//! TrackerPipeline for combining detection with tracking.

use crate::error::Result;
use crate::tracker::{CentroidTracker, Track, TrackerConfig};

use super::DetectionSource;

/// Bundles a `DetectionSource` with a `CentroidTracker` for end-to-end
/// frame processing.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self> {
        Ok(Self {
            detector,
            tracker: CentroidTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::default(),
        }
    }

    /// Run detection on one frame and feed the result to the tracker.
    ///
    /// A detector error leaves the tracker untouched; the frame is not
    /// counted.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> std::result::Result<&[Track], D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.tracker.update(&detections))
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut CentroidTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Detection;

    struct MockDetector {
        frames: Vec<Vec<Detection>>,
    }

    impl DetectionSource for MockDetector {
        type Error = String;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> std::result::Result<Vec<Detection>, Self::Error> {
            if self.frames.is_empty() {
                return Err("stream exhausted".to_string());
            }
            Ok(self.frames.remove(0))
        }
    }

    #[test]
    fn test_tracker_pipeline() {
        let detector = MockDetector {
            frames: vec![
                vec![Detection::new(10.0, 20.0, 50.0, 80.0)],
                vec![Detection::new(12.0, 22.0, 52.0, 82.0)],
            ],
        };

        let mut pipeline = TrackerPipeline::with_default_config(detector);
        let first = pipeline.process_frame(&[], 640, 480).unwrap()[0].track_id;

        let tracks = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].track_id, first);
        assert_eq!(tracks[0].age, 0);
    }

    #[test]
    fn test_detector_error_propagates() {
        let detector = MockDetector { frames: vec![] };
        let mut pipeline = TrackerPipeline::with_default_config(detector);

        let err = pipeline.process_frame(&[], 640, 480).unwrap_err();
        assert_eq!(err, "stream exhausted");
        assert_eq!(pipeline.tracker().frame_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrackerConfig {
            max_assignment_cost: 0.0,
            ..TrackerConfig::default()
        };
        assert!(TrackerPipeline::new(MockDetector { frames: vec![] }, config).is_err());
    }
}
