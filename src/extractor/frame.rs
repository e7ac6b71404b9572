use crate::diagnostics::FrameReport;
use crate::interpolate::{self, SegmentPoints};
use crate::scan::WideAreaNet;
use crate::types::{Endpoint, Segment, SegmentMap};

/// Resolved skeleton of one frame.
#[derive(Clone, Debug)]
pub struct FrameSkeleton {
    pub width: usize,
    pub height: usize,
    /// Segments keyed by seed index, in scan order.
    pub segments: SegmentMap,
    pub net: WideAreaNet,
    pub report: FrameReport,
    /// Spacing used by [`FrameSkeleton::points`].
    pub spacing_px: f32,
}

impl FrameSkeleton {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, seed: usize) -> Option<&Segment> {
        self.segments.get(&seed)
    }

    /// Resolved tips that are not joined to anything, keyed by seed.
    pub fn open_tips(&self) -> impl Iterator<Item = (usize, &Endpoint)> + '_ {
        self.segments.iter().filter_map(|(&seed, seg)| {
            let tip = interpolate::resolved_tip(seg);
            (!tip.has_joint()).then_some((seed, tip))
        })
    }

    /// Interpolated points of the segment seeded at `seed`.
    pub fn points(&self, seed: usize) -> Option<SegmentPoints<'_>> {
        self.segments
            .get(&seed)
            .map(|seg| interpolate::points(seg, self.spacing_px))
    }
}
