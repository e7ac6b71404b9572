use crate::types::{Joint, Segment, SegmentMap, Side};

/// Side that is not an open tip given the segment's shape.
///
/// Vertical segments close their topmost end (the base of an upright finger
/// silhouette); horizontal ones close the side with fewer claimed pixels,
/// which faces the palm.
pub(crate) fn closed_side(seg: &Segment, vertical_ratio: f32) -> Side {
    let fl = &seg.far_left;
    let fr = &seg.far_right;
    let spread_x = fr.x as f32 - fl.x as f32;
    let spread_y = fr.y.max(fl.y) as f32 - seg.y as f32;
    if spread_x < vertical_ratio * spread_y {
        if fr.y < fl.y {
            Side::Right
        } else {
            Side::Left
        }
    } else if seg.count_right < seg.count_left {
        Side::Right
    } else {
        Side::Left
    }
}

/// Close one end per segment. Ends already joined to an anchor keep their
/// link. Returns the number of ends closed.
pub(crate) fn close_orientation(segments: &mut SegmentMap, vertical_ratio: f32) -> usize {
    let mut closed = 0;
    for seg in segments.values_mut() {
        let side = closed_side(seg, vertical_ratio);
        let end = seg.endpoint_mut(side);
        if end.joint.is_none() {
            end.joint = Some(Joint::Closed);
            closed += 1;
        }
    }
    closed
}
