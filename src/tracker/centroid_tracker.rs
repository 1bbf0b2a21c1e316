//! Per-frame tracker orchestration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::tracker::kalman_filter::MotionNoise;
use crate::tracker::lifecycle::TrackRegistry;
use crate::tracker::matching::{self, Detection};
use crate::tracker::track::Track;

/// Configuration for the [`CentroidTracker`].
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Reserved minimum separation between tracks, in pixels. Not used by
    /// matching.
    pub min_tracker_distance: f64,
    /// Frames a track may go unmatched before it is evicted.
    pub max_aging: u32,
    /// Center distance, in pixels, at or above which a pairing is rejected.
    pub max_assignment_cost: f64,
    pub process_noise: f64,
    pub measurement_noise: f64,
    pub initial_position_variance: f64,
    pub initial_velocity_variance: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let noise = MotionNoise::default();
        Self {
            min_tracker_distance: 100.0,
            max_aging: 10,
            max_assignment_cost: 2000.0,
            process_noise: noise.process,
            measurement_noise: noise.measurement,
            initial_position_variance: noise.initial_position_variance,
            initial_velocity_variance: noise.initial_velocity_variance,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        fn non_negative(field: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TrackerError::invalid_config(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ))
            }
        }

        fn positive(field: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TrackerError::invalid_config(
                    field,
                    format!("must be finite and positive, got {value}"),
                ))
            }
        }

        non_negative("min_tracker_distance", self.min_tracker_distance)?;
        positive("max_assignment_cost", self.max_assignment_cost)?;
        non_negative("process_noise", self.process_noise)?;
        positive("measurement_noise", self.measurement_noise)?;
        non_negative("initial_position_variance", self.initial_position_variance)?;
        non_negative("initial_velocity_variance", self.initial_velocity_variance)?;
        Ok(())
    }

    pub fn motion_noise(&self) -> MotionNoise {
        MotionNoise {
            process: self.process_noise,
            measurement: self.measurement_noise,
            initial_position_variance: self.initial_position_variance,
            initial_velocity_variance: self.initial_velocity_variance,
        }
    }
}

/// Multi-object tracker matching Kalman-predicted centers to detections.
///
/// Not re-entrant: each call to [`update`](Self::update) consumes one frame
/// and must finish before the next frame is submitted.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    registry: TrackRegistry,
    frame_id: u64,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::from_validated(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: TrackerConfig) -> Self {
        Self {
            registry: TrackRegistry::new(),
            frame_id: 0,
            config,
        }
    }

    /// Process one frame of detections and return the live tracks.
    ///
    /// With no live tracks every detection starts a new track. Otherwise
    /// every track is predicted and matched, unmatched tracks age, unmatched
    /// detections spawn tracks, and tracks older than `max_aging` are
    /// evicted. An empty `detections` slice still ages and evicts.
    pub fn update(&mut self, detections: &[Detection]) -> &[Track] {
        self.frame_id += 1;
        let noise = self.config.motion_noise();

        if self.registry.is_empty() {
            for &det in detections {
                self.registry.spawn(det, noise);
            }
            debug!(
                frame_id = self.frame_id,
                spawned = detections.len(),
                "bootstrapped tracks"
            );
            return self.registry.tracks();
        }

        let result = matching::associate(
            detections,
            self.registry.tracks_mut(),
            self.config.max_assignment_cost,
        );
        self.registry.apply(&result, detections, noise);
        let evicted = self.registry.evict(self.config.max_aging);

        debug!(
            frame_id = self.frame_id,
            matched = result.matches.len(),
            spawned = result.unmatched_detections.len(),
            missed = result.unmatched_tracks.len(),
            evicted,
            live = self.registry.len(),
            "frame processed"
        );

        self.registry.tracks()
    }

    pub fn tracks(&self) -> &[Track] {
        self.registry.tracks()
    }

    /// Number of frames processed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Drop all tracks. Ids issued afterwards continue from the last one.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.frame_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::rect::Rect;

    fn det_at(cx: f32, cy: f32) -> Detection {
        Detection::from_rect(Rect::from_center(cx, cy, 10.0, 10.0))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrackerConfig {
            measurement_noise: 0.0,
            ..TrackerConfig::default()
        };
        let err = CentroidTracker::new(config).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidConfig {
                field: "measurement_noise",
                ..
            }
        ));

        let config = TrackerConfig {
            max_assignment_cost: f64::NAN,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TrackerConfig {
            min_tracker_distance: -1.0,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{ "max_aging": 3, "max_assignment_cost": 25.0 }"#).unwrap();
        assert_eq!(config.max_aging, 3);
        assert_eq!(config.max_assignment_cost, 25.0);
        assert_eq!(config.process_noise, 0.03);
        assert_eq!(config.min_tracker_distance, 100.0);
    }

    #[test]
    fn test_frame_count_and_reset() {
        let mut tracker = CentroidTracker::default();
        tracker.update(&[det_at(10.0, 10.0)]);
        tracker.update(&[det_at(11.0, 11.0)]);
        assert_eq!(tracker.frame_count(), 2);

        tracker.reset();
        assert_eq!(tracker.frame_count(), 0);
        assert!(tracker.tracks().is_empty());

        let tracks = tracker.update(&[det_at(10.0, 10.0)]);
        assert_eq!(tracks[0].track_id, 2);
    }

    #[test]
    fn test_bootstrap_with_no_detections() {
        let mut tracker = CentroidTracker::default();
        assert!(tracker.update(&[]).is_empty());
        assert_eq!(tracker.frame_count(), 1);
    }
}
