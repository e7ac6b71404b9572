//! Joint resolver: stitch a frame's segments into a skeleton.
//!
//! Four passes run in order over the segment map, in scan order:
//!
//! 1. **Matching**: every endpoint of segment `k` is compared with the
//!    anchors of segments scanned after `k`. Offsets are converted to metres
//!    at the anchor depth; an endpoint within `match_distance_m` of an anchor
//!    becomes a joint, recorded on both sides.
//! 2. **Orientation**: one end per segment is closed. Vertical segments close
//!    their topmost end, horizontal ones the side with fewer claimed pixels.
//! 3. **Centre substitution**: open ends with a ring-overlap centre hint move
//!    onto it and resample their depth.
//! 4. **Edge avoidance**: the open tip, and the anchor when nothing joins it,
//!    are pulled back so they sit at least `edge_budget_m` inside the region.
//!
//! None of the passes can fail. Conditions that are not met (no hint, no
//! movement needed, degenerate geometry) leave the traced values in place.

mod matching;
mod options;
mod orientation;
mod tips;

pub use options::JointOptions;
pub use tips::move_away_from_edge;

use crate::calibration::DepthCoefficients;
use crate::image::ClassificationView;
use crate::types::SegmentMap;
use log::debug;
use serde::Serialize;

/// What the resolver changed in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveStats {
    /// Endpoint-to-anchor links.
    pub joints: usize,
    /// Ends closed by the orientation pass.
    pub closed: usize,
    /// Ends moved onto their centre hint.
    pub centered: usize,
    /// Tips and anchors pulled back from an edge.
    pub edge_adjusted: usize,
}

#[derive(Clone, Debug)]
pub struct JointResolver {
    coefs: DepthCoefficients,
    options: JointOptions,
}

impl JointResolver {
    pub fn new(coefs: DepthCoefficients, options: JointOptions) -> Self {
        Self { coefs, options }
    }

    pub fn options(&self) -> &JointOptions {
        &self.options
    }

    /// Run all passes in place.
    pub fn resolve(&self, view: ClassificationView<'_>, segments: &mut SegmentMap) -> ResolveStats {
        let stats = ResolveStats {
            joints: self.match_joints(segments),
            closed: self.close_orientation(segments),
            centered: self.substitute_centers(view, segments),
            edge_adjusted: self.avoid_edges(view, segments),
        };
        debug!(
            "joints: segments={} joints={} closed={} centered={} edge_adjusted={}",
            segments.len(),
            stats.joints,
            stats.closed,
            stats.centered,
            stats.edge_adjusted
        );
        stats
    }

    pub fn match_joints(&self, segments: &mut SegmentMap) -> usize {
        matching::match_joints(segments, &self.coefs, self.options.match_distance_m)
    }

    pub fn close_orientation(&self, segments: &mut SegmentMap) -> usize {
        orientation::close_orientation(segments, self.options.vertical_ratio)
    }

    pub fn substitute_centers(&self, view: ClassificationView<'_>, segments: &mut SegmentMap) -> usize {
        tips::substitute_centers(view, segments)
    }

    pub fn avoid_edges(&self, view: ClassificationView<'_>, segments: &mut SegmentMap) -> usize {
        tips::avoid_edges(view, segments, &self.coefs, self.options.edge_budget_m)
    }
}
