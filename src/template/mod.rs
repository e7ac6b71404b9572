//! Concentric-ring connectivity template.
//!
//! The tracer grows a segment ring by ring around its seed. Instead of
//! recomputing circle geometry for every seed, all integer offsets up to the
//! kernel radius are enumerated once and grouped into rings:
//!
//! - Ring `r` holds every offset `(dx, dy)` with `floor(sqrt(dx² + dy²)) == r`.
//! - Within a ring, samples are ordered clockwise in screen space (y down),
//!   starting at `(0, -r)`. A quarter of the ring therefore starts at `(r, 0)`
//!   and the lower half runs from `(r, 0)` through `(0, r)` to `(-r, 0)`.
//! - Every sample on ring `r >= 1` records its *parent*: the sample at
//!   `(dx, dy) * (r - 1) / r` (integer division, truncating toward zero). The
//!   parent is always 8-adjacent and lies one or two rings closer to the
//!   centre, so "parent reachable" is a cheap connectivity gate that stops
//!   propagation across gaps.
//!
//! Only the lower half of each ring is visited by the tracer: the frame scan
//! runs top-to-bottom, left-to-right, so anything above a seed on a connected
//! structure has already been claimed by an earlier seed.
//!
//! Sample 0 is the centre itself (ring 0).

use crate::error::SkeletonError;
use std::f64::consts::TAU;
use std::ops::Range;
use std::sync::{Arc, OnceLock};

/// Number of rings generated for the default template.
pub const DEFAULT_KERNEL_RADIUS: usize = 60;

/// Immutable ring tables.
#[derive(Clone, Debug)]
pub struct RingTemplate {
    dx: Vec<i32>,
    dy: Vec<i32>,
    parent: Vec<u32>,
    ring_start: Vec<usize>,
    ring_size: Vec<usize>,
}

/// One sample of a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingSample {
    /// Index of the sample in the template tables.
    pub index: usize,
    pub dx: i32,
    pub dy: i32,
    /// Sample index one step closer to the centre.
    pub parent: usize,
}

/// Iterator over a contiguous range of template samples.
#[derive(Clone, Debug)]
pub struct RingSamples<'a> {
    template: &'a RingTemplate,
    range: Range<usize>,
}

impl Iterator for RingSamples<'_> {
    type Item = RingSample;

    fn next(&mut self) -> Option<RingSample> {
        let index = self.range.next()?;
        Some(self.template.sample(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for RingSamples<'_> {}

impl RingTemplate {
    /// Enumerate rings `0..kernel_radius`.
    pub fn generate(kernel_radius: usize) -> Self {
        let kernel_radius = kernel_radius.max(1);
        let reach = kernel_radius as i32;
        let mut rings: Vec<Vec<(i32, i32)>> = vec![Vec::new(); kernel_radius];
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let ring = ring_of(dx, dy);
                if ring < kernel_radius {
                    rings[ring].push((dx, dy));
                }
            }
        }
        for ring in &mut rings {
            ring.sort_by(|a, b| clockwise_angle(*a).total_cmp(&clockwise_angle(*b)));
        }

        let total: usize = rings.iter().map(Vec::len).sum();
        let mut dx = Vec::with_capacity(total);
        let mut dy = Vec::with_capacity(total);
        let mut ring_start = Vec::with_capacity(kernel_radius);
        let mut ring_size = Vec::with_capacity(kernel_radius);
        for ring in &rings {
            ring_start.push(dx.len());
            ring_size.push(ring.len());
            for &(x, y) in ring {
                dx.push(x);
                dy.push(y);
            }
        }

        // Dense lookup from offset to sample index, used only while linking parents.
        let side = (2 * kernel_radius + 1) as i32;
        let mut lookup = vec![u32::MAX; (side * side) as usize];
        let slot = |x: i32, y: i32| ((y + reach) * side + (x + reach)) as usize;
        for (i, (&x, &y)) in dx.iter().zip(&dy).enumerate() {
            lookup[slot(x, y)] = i as u32;
        }

        let mut parent = vec![0u32; total];
        for (r, &start) in ring_start.iter().enumerate().skip(1) {
            let r = r as i32;
            for i in start..start + ring_size[r as usize] {
                let px = dx[i] * (r - 1) / r;
                let py = dy[i] * (r - 1) / r;
                let p = lookup[slot(px, py)];
                debug_assert!(p != u32::MAX, "parent of ({}, {}) missing", dx[i], dy[i]);
                parent[i] = p;
            }
        }

        Self {
            dx,
            dy,
            parent,
            ring_start,
            ring_size,
        }
    }

    /// Process-wide template for [`DEFAULT_KERNEL_RADIUS`].
    pub fn shared() -> Arc<RingTemplate> {
        static SHARED: OnceLock<Arc<RingTemplate>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(RingTemplate::generate(DEFAULT_KERNEL_RADIUS)))
            .clone()
    }

    /// Template for `kernel_radius`, reusing the shared one when possible.
    pub fn for_kernel(kernel_radius: usize) -> Arc<RingTemplate> {
        if kernel_radius == DEFAULT_KERNEL_RADIUS {
            Self::shared()
        } else {
            Arc::new(Self::generate(kernel_radius))
        }
    }

    /// Number of rings, including the centre ring 0.
    pub fn ring_count(&self) -> usize {
        self.ring_size.len()
    }

    /// Total number of samples across all rings.
    pub fn len(&self) -> usize {
        self.dx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dx.is_empty()
    }

    pub fn ring_size(&self, ring: usize) -> Result<usize, SkeletonError> {
        self.check_ring(ring)?;
        Ok(self.ring_size[ring])
    }

    pub fn ring_start(&self, ring: usize) -> Result<usize, SkeletonError> {
        self.check_ring(ring)?;
        Ok(self.ring_start[ring])
    }

    /// All samples of `ring` in clockwise order.
    pub fn ring(&self, ring: usize) -> Result<RingSamples<'_>, SkeletonError> {
        self.check_ring(ring)?;
        let start = self.ring_start[ring];
        Ok(RingSamples {
            template: self,
            range: start..start + self.ring_size[ring],
        })
    }

    /// Samples of the lower half of `ring`, from `(r, 0)` to `(-r, 0)`.
    pub fn lower_half(&self, ring: usize) -> Result<RingSamples<'_>, SkeletonError> {
        self.check_ring(ring)?;
        Ok(RingSamples {
            template: self,
            range: self.lower_half_range(ring),
        })
    }

    #[inline]
    pub(crate) fn lower_half_range(&self, ring: usize) -> Range<usize> {
        let size = self.ring_size[ring];
        let start = self.ring_start[ring] + (size >> 2);
        let end = (start + 1 + (size >> 1)).min(self.ring_start[ring] + size);
        start..end
    }

    #[inline]
    pub(crate) fn sample(&self, index: usize) -> RingSample {
        RingSample {
            index,
            dx: self.dx[index],
            dy: self.dy[index],
            parent: self.parent[index] as usize,
        }
    }

    fn check_ring(&self, ring: usize) -> Result<(), SkeletonError> {
        if ring >= self.ring_count() {
            return Err(SkeletonError::RadiusExceeded {
                radius: ring,
                max: self.ring_count().saturating_sub(1),
            });
        }
        Ok(())
    }
}

fn ring_of(dx: i32, dy: i32) -> usize {
    let d2 = (dx * dx + dy * dy) as u64;
    let mut r = (d2 as f64).sqrt() as u64;
    while r * r > d2 {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= d2 {
        r += 1;
    }
    r as usize
}

/// Angle measured clockwise (screen space) from straight up.
fn clockwise_angle((dx, dy): (i32, i32)) -> f64 {
    (dx as f64).atan2(-(dy as f64)).rem_euclid(TAU)
}
