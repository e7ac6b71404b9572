//! Diagnostics of the skeleton pass.
//!
//! [`FrameReport`] is attached to every [`crate::FrameSkeleton`]: input
//! geometry, per-stage timings, scan counters and what the joint resolver
//! changed. The `overlay` module renders a frame for visual inspection; it is
//! used by tools and never by the pass itself.

pub mod overlay;
pub mod report;
pub mod timing;

pub use overlay::render_overlay;
pub use report::{FrameReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
