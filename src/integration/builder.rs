//! Box-format conversions for hand-built detections.

use crate::tracker::{Detection, Rect};

/// Builds a [`Detection`] from whichever corner or center convention the
/// caller has. The last format setter wins.
///
/// ```
/// use centroid_track::DetectionBuilder;
///
/// let det = DetectionBuilder::new().xywh(30.0, 50.0, 40.0, 60.0).build();
/// assert_eq!(det.center(), (30.0, 50.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl DetectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corners: top-left `(x1, y1)`, bottom-right `(x2, y2)`.
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Center point plus width and height.
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Top-left corner plus width and height.
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    pub fn build(self) -> Detection {
        Detection::from_rect(Rect::from_tlbr(self.x1, self.y1, self.x2, self.y2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_builder() {
        let det = DetectionBuilder::new().tlbr(10.0, 20.0, 50.0, 80.0).build();
        assert_eq!(det.bbox.to_tlwh(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(det.center(), (30.0, 50.0));
    }

    #[test]
    fn test_builder_formats_agree() {
        let a = DetectionBuilder::new().xywh(30.0, 50.0, 40.0, 60.0).build();
        let b = DetectionBuilder::new().tlwh(10.0, 20.0, 40.0, 60.0).build();
        assert_eq!(a, b);
    }
}
