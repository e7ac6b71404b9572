use crate::calibration::DepthCoefficients;
use crate::image::ClassificationView;
use crate::types::{Pixel, SegmentMap, Side};

/// Move open ends onto their centre hint, keeping the traced position in
/// `original`. Returns the number of ends moved.
pub(crate) fn substitute_centers(view: ClassificationView<'_>, segments: &mut SegmentMap) -> usize {
    let width = view.width();
    let mut moved = 0;
    for seg in segments.values_mut() {
        for side in [Side::Left, Side::Right] {
            let end = seg.endpoint_mut(side);
            if end.joint.is_some() {
                continue;
            }
            let Some(center) = end.center else {
                continue;
            };
            end.original = Some(end.position());
            end.relocate(center.x, center.y, width);
            end.depth = view.depth_at(end.index);
            moved += 1;
        }
    }
    moved
}

/// Pull open tips and free anchors back from the region edge.
///
/// The open tip is `far_left` unless it is joined, then `far_right`. It is
/// checked against the anchor, and the anchor (unless another segment joins
/// it) against the possibly moved tip. Returns the number of points moved.
pub(crate) fn avoid_edges(
    view: ClassificationView<'_>,
    segments: &mut SegmentMap,
    coefs: &DepthCoefficients,
    edge_budget_m: f32,
) -> usize {
    let width = view.width();
    let mut moved = 0;
    for seg in segments.values_mut() {
        let tip_side = if seg.far_left.has_joint() {
            Side::Right
        } else {
            Side::Left
        };
        let anchor = seg.anchor();

        let end = seg.endpoint_mut(tip_side);
        if end.joint.is_none() {
            let budget = coefs.edge_budget_px(edge_budget_m, end.depth);
            if let Some(p) = move_away_from_edge(view, end.position(), anchor, budget) {
                end.relocate(p.x, p.y, width);
                moved += 1;
            }
        }

        if !seg.anchor_has_joint() {
            let tip = seg.endpoint(tip_side).position();
            let budget = coefs.edge_budget_px(edge_budget_m, seg.depth);
            if let Some(p) = move_away_from_edge(view, anchor, tip, budget) {
                seg.x = p.x;
                seg.y = p.y;
                moved += 1;
            }
        }
    }
    moved
}

/// Keep `p` at least `budget_px` inside the region, measured along the
/// direction from `to` through `p`.
///
/// Probes outward from `p` one major-axis pixel at a time. If a zero or
/// off-frame sample is met after `i` steps out of `steps`, `p` is pulled back
/// towards `to` by the remaining `steps - i`. The displacement never exceeds
/// `budget_px` plus rounding. Returns `None` when `p` stays put.
pub fn move_away_from_edge(
    view: ClassificationView<'_>,
    p: Pixel,
    to: Pixel,
    budget_px: f32,
) -> Option<Pixel> {
    if !budget_px.is_finite() || budget_px <= 0.0 {
        return None;
    }
    let dx = p.x as f32 - to.x as f32;
    let dy = p.y as f32 - to.y as f32;
    if dx.abs() < 2.0 && dy.abs() < 2.0 {
        return None;
    }
    let len = (dx * dx + dy * dy).sqrt();
    let major = dx.abs().max(dy.abs());
    let (sx, sy) = (dx / major, dy / major);
    let steps = budget_px * major / len;

    let mut x = p.x as f32 + 0.5;
    let mut y = p.y as f32 + 0.5;
    let mut i = 1usize;
    while (i as f32) < steps {
        x += sx;
        y += sy;
        let inside = view
            .get_signed(x.floor() as i64, y.floor() as i64)
            .is_some_and(|v| v != 0.0);
        if !inside {
            break;
        }
        i += 1;
    }
    if i as f32 >= steps {
        return None;
    }

    let back = steps - i as f32;
    let nx = (p.x as f32 - sx * back + 0.5).floor();
    let ny = (p.y as f32 - sy * back + 0.5).floor();
    let max_x = view.width().saturating_sub(1) as f32;
    let max_y = view.height().saturating_sub(1) as f32;
    let moved = Pixel::new(nx.clamp(0.0, max_x) as usize, ny.clamp(0.0, max_y) as usize);
    (moved != p).then_some(moved)
}
