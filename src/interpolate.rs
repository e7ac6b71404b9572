//! Evenly spaced points along a resolved segment, for renderers.
//!
//! Points run from the anchor toward the resolved tip. `x` and `y` are whole
//! pixels, `z` is normalised depth interpolated linearly.
use crate::types::{Endpoint, Segment, Side};
use nalgebra::Point3;
use serde::Deserialize;

/// Interpolation parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InterpolationOptions {
    /// Pixel distance between consecutive points.
    pub spacing_px: f32,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self { spacing_px: 20.0 }
    }
}

/// Side of the endpoint that best represents the segment's open end.
///
/// The side with more claimed pixels, unless exactly one side is joined, in
/// which case the other side.
pub fn resolved_side(seg: &Segment) -> Side {
    match (seg.far_left.has_joint(), seg.far_right.has_joint()) {
        (true, false) => Side::Right,
        (false, true) => Side::Left,
        _ if seg.count_left > seg.count_right => Side::Left,
        _ => Side::Right,
    }
}

pub fn resolved_tip(seg: &Segment) -> &Endpoint {
    seg.endpoint(resolved_side(seg))
}

/// Number of points for `seg` at `spacing_px`.
pub fn point_count(seg: &Segment, spacing_px: f32) -> usize {
    let distance = resolved_tip(seg).distance_2d_from(seg.x, seg.y);
    let count = distance / spacing_px;
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Point `i` of `count`, at fraction `(i + 1) / count` from anchor to tip.
pub fn point_at(seg: &Segment, i: usize, spacing_px: f32) -> Point3<f32> {
    let count = point_count(seg, spacing_px);
    lerp(seg, resolved_tip(seg), i, count)
}

/// All points of `seg`; clone the iterator to walk it again.
pub fn points(seg: &Segment, spacing_px: f32) -> SegmentPoints<'_> {
    SegmentPoints {
        segment: seg,
        tip: resolved_tip(seg),
        count: point_count(seg, spacing_px),
        next: 0,
    }
}

fn lerp(seg: &Segment, tip: &Endpoint, i: usize, count: usize) -> Point3<f32> {
    let t = if count == 0 {
        0.0
    } else {
        (i + 1) as f32 / count as f32
    };
    let x = seg.x as f32 + t * (tip.x as f32 - seg.x as f32);
    let y = seg.y as f32 + t * (tip.y as f32 - seg.y as f32);
    Point3::new(x.trunc(), y.trunc(), seg.depth + t * (tip.depth - seg.depth))
}

/// Lazy, finite sequence of interpolated points.
#[derive(Clone, Debug)]
pub struct SegmentPoints<'a> {
    segment: &'a Segment,
    tip: &'a Endpoint,
    count: usize,
    next: usize,
}

impl Iterator for SegmentPoints<'_> {
    type Item = Point3<f32>;

    fn next(&mut self) -> Option<Point3<f32>> {
        if self.next >= self.count {
            return None;
        }
        let p = lerp(self.segment, self.tip, self.next, self.count);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SegmentPoints<'_> {}
