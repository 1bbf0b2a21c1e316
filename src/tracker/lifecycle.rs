//! Track registry: creation, matching, aging and eviction.

use tracing::debug;

use crate::tracker::kalman_filter::MotionNoise;
use crate::tracker::matching::{AssignmentResult, Detection};
use crate::tracker::track::Track;

/// Live tracks plus the id counter that feeds them.
///
/// Ids start at 1 and only ever grow; evicting a track or clearing the
/// registry never hands an id out again. Callers can read tracks but not
/// edit them in place:
///
/// ```compile_fail
/// use centroid_track::tracker::TrackRegistry;
///
/// let mut registry = TrackRegistry::new();
/// let _ = registry.tracks_mut();
/// ```
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    next_id: u64,
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Create a track for `detection` and append it.
    pub fn spawn(&mut self, detection: Detection, noise: MotionNoise) -> u64 {
        let track_id = self.next_id;
        self.next_id += 1;

        let (cx, cy) = detection.center();
        debug!(track_id, cx, cy, "new track");
        self.tracks.push(Track::new(track_id, detection, noise));
        track_id
    }

    /// Apply one frame's assignment.
    ///
    /// Matched tracks are corrected and their age reset, unmatched tracks
    /// age by one, and unmatched detections become new tracks. Indices in
    /// `result` refer to `detections` and to the registry order before this
    /// call; new tracks are appended after the existing ones.
    pub fn apply(
        &mut self,
        result: &AssignmentResult,
        detections: &[Detection],
        noise: MotionNoise,
    ) {
        for &(det_idx, track_idx) in &result.matches {
            self.tracks[track_idx].update(detections[det_idx]);
        }

        for &track_idx in &result.unmatched_tracks {
            self.tracks[track_idx].mark_missed();
        }

        for &det_idx in &result.unmatched_detections {
            self.spawn(detections[det_idx], noise);
        }
    }

    /// Drop every track whose age exceeds `max_aging`, returning how many
    /// were removed. Survivors keep their relative order.
    pub fn evict(&mut self, max_aging: u32) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|track| {
            let keep = track.age <= max_aging;
            if !keep {
                debug!(track_id = track.track_id, age = track.age, "evicting track");
            }
            keep
        });
        before - self.tracks.len()
    }

    /// Remove all tracks. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.tracks.clear();
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
    fn test_spawn_assigns_increasing_ids() {
        let mut registry = TrackRegistry::new();
        assert_eq!(registry.spawn(det_at(0.0, 0.0), MotionNoise::default()), 1);
        assert_eq!(registry.spawn(det_at(5.0, 5.0), MotionNoise::default()), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_apply_uses_detection_at_unmatched_slot() {
        let mut registry = TrackRegistry::new();
        registry.spawn(det_at(0.0, 0.0), MotionNoise::default());

        let detections = [det_at(100.0, 100.0), det_at(1.0, 1.0), det_at(200.0, 200.0)];
        let result = AssignmentResult {
            matches: vec![(1, 0)],
            unmatched_detections: vec![0, 2],
            unmatched_tracks: vec![],
            total_cost: 1.4,
        };
        registry.apply(&result, &detections, MotionNoise::default());

        let tracks = registry.tracks();
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].rect().center(), (1.0, 1.0));
        assert_eq!(tracks[1].rect().center(), (100.0, 100.0));
        assert_eq!(tracks[2].rect().center(), (200.0, 200.0));
    }

    #[test]
    fn test_apply_ages_unmatched_tracks() {
        let mut registry = TrackRegistry::new();
        registry.spawn(det_at(0.0, 0.0), MotionNoise::default());
        registry.spawn(det_at(50.0, 50.0), MotionNoise::default());

        let result = AssignmentResult {
            matches: vec![(0, 1)],
            unmatched_detections: vec![],
            unmatched_tracks: vec![0],
            total_cost: 0.0,
        };
        registry.apply(&result, &[det_at(50.0, 50.0)], MotionNoise::default());

        assert_eq!(registry.tracks()[0].age, 1);
        assert_eq!(registry.tracks()[1].age, 0);
    }

    #[test]
    fn test_evict_keeps_tracks_at_threshold() {
        let mut registry = TrackRegistry::new();
        for i in 0..3 {
            registry.spawn(det_at(i as f32 * 10.0, 0.0), MotionNoise::default());
        }
        registry.tracks_mut()[0].age = 2;
        registry.tracks_mut()[1].age = 3;
        registry.tracks_mut()[2].age = 1;

        assert_eq!(registry.evict(2), 1);
        let ids: Vec<u64> = registry.tracks().iter().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_clear_does_not_reuse_ids() {
        let mut registry = TrackRegistry::new();
        registry.spawn(det_at(0.0, 0.0), MotionNoise::default());
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.spawn(det_at(0.0, 0.0), MotionNoise::default()), 2);
    }
}
