//! Integration module for connecting object detection backends with the tracker.
//!
//! Detection itself is out of scope for this crate; this module only provides
//! the traits and glue that let an external detector feed frames in.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
