use crate::calibration::DepthCoefficients;
use crate::types::{Endpoint, EndpointRef, Joint, Segment, SegmentMap, Side};

/// Squared physical distance between an endpoint and a segment anchor.
///
/// Pixel offsets are converted to metres at the anchor's depth; the depth
/// term uses the depth scale directly.
#[inline]
pub(crate) fn anchor_distance2(end: &Endpoint, anchor: &Segment, coefs: &DepthCoefficients) -> f32 {
    let coef = anchor.depth * coefs.depth_coef;
    let dx = coef * (anchor.x as f32 - end.x as f32);
    let dy = coef * (anchor.y as f32 - end.y as f32);
    let dz = coefs.depth_scale * (anchor.depth - end.depth);
    dx * dx + dy * dy + dz * dz
}

/// Link endpoints to the anchors of segments scanned after their own.
///
/// An endpoint near several anchors joins the nearest one. Each link is
/// written on both sides: `Joint::Anchor` on the endpoint and an
/// [`EndpointRef`] on the anchor. Returns the number of links.
pub(crate) fn match_joints(
    segments: &mut SegmentMap,
    coefs: &DepthCoefficients,
    max_distance_m: f32,
) -> usize {
    let threshold2 = max_distance_m * max_distance_m;
    let mut links: Vec<(usize, Side, usize)> = Vec::new();
    {
        let ordered: Vec<&Segment> = segments.values().collect();
        for (k, seg) in ordered.iter().enumerate() {
            for side in [Side::Left, Side::Right] {
                let end = seg.endpoint(side);
                let mut best: Option<(f32, usize)> = None;
                for other in &ordered[k + 1..] {
                    let d2 = anchor_distance2(end, other, coefs);
                    if d2 < threshold2 && best.map_or(true, |(b, _)| d2 < b) {
                        best = Some((d2, other.seed));
                    }
                }
                if let Some((_, anchor)) = best {
                    links.push((seg.seed, side, anchor));
                }
            }
        }
    }

    for &(seed, side, anchor) in &links {
        if let Some(seg) = segments.get_mut(&seed) {
            seg.endpoint_mut(side).joint = Some(Joint::Anchor(anchor));
        }
        if let Some(target) = segments.get_mut(&anchor) {
            target.anchor_joints.push(EndpointRef { seed, side });
        }
    }
    links.len()
}
