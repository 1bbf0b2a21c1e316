//! Detection-to-track association.

use ndarray::Array2;
use tracing::trace;

use crate::tracker::hungarian::hungarian;
use crate::tracker::rect::Rect;
use crate::tracker::track::Track;

/// Detection input for the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Bounding box reported by the detector
    pub bbox: Rect,
}

impl Detection {
    /// Create a detection from TLBR corners.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
        }
    }

    pub fn from_rect(bbox: Rect) -> Self {
        Self { bbox }
    }

    /// Center of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        self.bbox.center()
    }
}

/// Euclidean distance between every detection center (rows) and every
/// predicted track position (columns).
pub fn center_distance(detections: &[Detection], predictions: &[(f64, f64)]) -> Array2<f64> {
    let mut dists = Array2::zeros((detections.len(), predictions.len()));
    for (i, det) in detections.iter().enumerate() {
        let (dx, dy) = det.center();
        for (j, &(px, py)) in predictions.iter().enumerate() {
            dists[[i, j]] = (dx as f64 - px).hypot(dy as f64 - py);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Accepted `(detection, track)` index pairs.
    pub matches: Vec<(usize, usize)>,
    pub unmatched_detections: Vec<usize>,
    pub unmatched_tracks: Vec<usize>,
    /// Sum of the accepted pair costs.
    pub total_cost: f64,
}

impl AssignmentResult {
    /// Per-detection view: the matched track index, or `None`.
    pub fn detection_assignments(&self, num_detections: usize) -> Vec<Option<usize>> {
        let mut assignments = vec![None; num_detections];
        for &(det_idx, track_idx) in &self.matches {
            assignments[det_idx] = Some(track_idx);
        }
        assignments
    }
}

/// Optimal one-to-one assignment over `cost_matrix` (detections × tracks).
///
/// A pair is accepted only when its cost is strictly below `max_cost`; the
/// solver's cheapest pairing can still join unrelated objects, so both sides
/// of a rejected pair are reported unmatched.
pub fn linear_assignment(cost_matrix: &Array2<f64>, max_cost: f64) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_detections: (0..num_rows).collect(),
            unmatched_tracks: (0..num_cols).collect(),
            total_cost: 0.0,
        };
    }

    let row_to_col = hungarian(cost_matrix.view());

    let mut matches = vec![];
    let mut unmatched_detections = vec![];
    let mut unmatched_tracks_mask = vec![true; num_cols];
    let mut total_cost = 0.0;

    for (row_idx, col) in row_to_col.into_iter().enumerate() {
        match col {
            Some(col_idx) if cost_matrix[[row_idx, col_idx]] < max_cost => {
                total_cost += cost_matrix[[row_idx, col_idx]];
                matches.push((row_idx, col_idx));
                unmatched_tracks_mask[col_idx] = false;
            }
            Some(col_idx) => {
                trace!(
                    detection = row_idx,
                    track = col_idx,
                    cost = cost_matrix[[row_idx, col_idx]],
                    max_cost,
                    "rejected assignment above cost threshold"
                );
                unmatched_detections.push(row_idx);
            }
            None => unmatched_detections.push(row_idx),
        }
    }

    let unmatched_tracks = unmatched_tracks_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_detections,
        unmatched_tracks,
        total_cost,
    }
}

/// Advance every track one frame and match `detections` against the
/// predictions.
///
/// Every track is predicted exactly once, matched or not, since prediction
/// is what moves its filter forward in time.
pub fn associate(
    detections: &[Detection],
    tracks: &mut [Track],
    max_cost: f64,
) -> AssignmentResult {
    let predictions: Vec<(f64, f64)> = tracks.iter_mut().map(Track::predict).collect();
    let dists = center_distance(detections, &predictions);
    linear_assignment(&dists, max_cost)
}
