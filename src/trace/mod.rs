//! Segment tracer: grow one segment outward from a seed pixel.
//!
//! The trace walks the lower half of the template rings around the seed,
//! ring by ring. A sample is only considered when its template parent was
//! reached, so growth never jumps across zero-valued gaps. For each reached
//! sample:
//!
//! - zero: not reachable, nothing happens;
//! - non-zero and already owned by another seed: reachable, growth continues
//!   through it but it is not re-claimed;
//! - negative (wide area): claimed, endpoints untouched;
//! - positive (bone): claimed and tracked as the far-left (`dx < 0`) or
//!   far-right extreme. Values above [`RING_OVERLAP_THRESHOLD`] also record a
//!   centre hint for that side.
//!
//! Growth stops at the radius or at the first ring that reaches nothing new.
//! The tracer performs no bounds checks per sample; callers keep seeds at
//! least `radius` pixels from the left, right and bottom borders, which is
//! validated once per call.

mod ownership;
mod scratch;

pub use ownership::{OwnershipMap, UNCLAIMED};
pub use scratch::ReachScratch;

use crate::error::SkeletonError;
use crate::image::{ClassificationView, RING_OVERLAP_THRESHOLD};
use crate::template::RingTemplate;
use crate::types::{Endpoint, Pixel, Segment};

/// Everything one trace reads and writes.
pub struct TraceContext<'a> {
    pub view: ClassificationView<'a>,
    pub template: &'a RingTemplate,
    pub owners: &'a mut OwnershipMap,
    pub reach: &'a mut ReachScratch,
}

impl<'a> TraceContext<'a> {
    pub fn new(
        view: ClassificationView<'a>,
        template: &'a RingTemplate,
        owners: &'a mut OwnershipMap,
        reach: &'a mut ReachScratch,
    ) -> Self {
        reach.ensure_len(template.len());
        Self {
            view,
            template,
            owners,
            reach,
        }
    }
}

/// Number of rings visited for `radius`, i.e. rings `1..rings`.
///
/// Mirrors `ring < radius` for fractional radii. Radii of one or less (and
/// NaN) visit nothing.
#[inline]
pub fn ring_limit(radius: f32) -> usize {
    if radius > 1.0 {
        if radius.is_finite() {
            radius.ceil() as usize
        } else {
            usize::MAX
        }
    } else {
        1
    }
}

/// Trace the segment seeded at `(x, y)` and claim its pixels.
///
/// The seed must be a bone pixel the ownership map has not claimed yet.
pub fn trace_segment(
    ctx: &mut TraceContext<'_>,
    x: usize,
    y: usize,
    radius: f32,
) -> Result<Segment, SkeletonError> {
    let view = ctx.view;
    let width = view.width();
    let rings = ring_limit(radius);
    let last_ring = rings - 1;

    let template_max = ctx.template.ring_count().saturating_sub(1);
    if last_ring > template_max {
        return Err(SkeletonError::RadiusExceeded {
            radius: last_ring,
            max: template_max,
        });
    }
    let border = x
        .min(width.saturating_sub(1).saturating_sub(x))
        .min(view.height().saturating_sub(1).saturating_sub(y));
    if last_ring > border {
        return Err(SkeletonError::RadiusExceeded {
            radius: last_ring,
            max: border,
        });
    }

    let seed = view.index(x, y);
    ctx.reach.reset();
    ctx.reach.mark(0);
    ctx.owners.claim(seed, seed);

    let mut far_left = Endpoint::at(seed, x, y);
    let mut far_right = Endpoint::at(seed, x, y);
    let mut count_left = 0usize;
    let mut count_right = 0usize;

    for ring in 1..rings {
        let mut reached_any = false;
        for i in ctx.template.lower_half_range(ring) {
            let sample = ctx.template.sample(i);
            if !ctx.reach.is_reachable(sample.parent) {
                continue;
            }
            // Lower half only: dy >= 0, and |dx| <= ring <= border.
            let px = (x as i64 + sample.dx as i64) as usize;
            let py = y + sample.dy as usize;
            let pixel = py * width + px;
            let value = view.value(pixel);
            if value == 0.0 {
                continue;
            }
            ctx.reach.mark(i);
            reached_any = true;
            if !ctx.owners.claim(pixel, seed) {
                continue;
            }
            if value < 0.0 {
                continue;
            }
            let end = if sample.dx < 0 {
                count_left += 1;
                &mut far_left
            } else {
                count_right += 1;
                &mut far_right
            };
            if value > RING_OVERLAP_THRESHOLD {
                end.center = Some(Pixel::new(px, py));
            }
            end.index = pixel;
            end.x = px;
            end.y = py;
        }
        if !reached_any {
            break;
        }
    }

    far_left.depth = view.depth_at(far_left.index);
    far_right.depth = view.depth_at(far_right.index);

    Ok(Segment {
        seed,
        x,
        y,
        depth: view.depth_at(seed),
        far_left,
        far_right,
        count_left,
        count_right,
        anchor_joints: Vec::new(),
    })
}
