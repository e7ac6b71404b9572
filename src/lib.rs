#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod calibration;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod image;
pub mod interpolate;
pub mod types;

// Stage modules. Public so tools and tests can drive a single stage, but
// their signatures follow the extractor's needs.
pub mod config;
pub mod joints;
pub mod scan;
pub mod template;
pub mod trace;

// --- High-level re-exports -------------------------------------------------

// Main entry points: extractor + results.
pub use crate::extractor::{ExtractorParams, FrameHistory, FrameSkeleton, SkeletonExtractor};
pub use crate::types::{Endpoint, EndpointRef, Joint, Pixel, Segment, SegmentMap, Side};

// Calibration and errors.
pub use crate::calibration::{CameraCalibration, DepthCoefficients};
pub use crate::error::SkeletonError;

// Diagnostics attached to every frame.
pub use crate::diagnostics::{FrameReport, TimingBreakdown};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use finger_skeleton::prelude::*;
///
/// # fn main() -> Result<(), SkeletonError> {
/// let (w, h) = (640usize, 480usize);
/// let buffer = vec![0.0f32; w * h];
///
/// let calib = CameraCalibration::from_focal(475.0, 320.0, 240.0, 0.001);
/// let mut extractor = SkeletonExtractor::new(w, h, &calib, ExtractorParams::default())?;
///
/// let frame = extractor.process(&buffer)?;
/// println!(
///     "segments={} open_tips={} total_ms={:.3}",
///     frame.segments.len(),
///     frame.report.open_tips,
///     frame.report.timings.total_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ClassificationView;
    pub use crate::{
        CameraCalibration, ExtractorParams, FrameSkeleton, Segment, SkeletonError,
        SkeletonExtractor,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::joints::{move_away_from_edge, JointOptions, JointResolver, ResolveStats};
    pub use crate::scan::{margin_for, FrameScanner, ScanOptions, ScanOutput, ScanStats, WideAreaNet};
    pub use crate::trace::{ring_limit, trace_segment, OwnershipMap, ReachScratch, TraceContext};

    // Shared geometry and scratch.
    pub use crate::interpolate::{points, resolved_side, resolved_tip, SegmentPoints};
    pub use crate::template::{RingSample, RingTemplate};
}
