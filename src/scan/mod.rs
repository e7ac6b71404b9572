//! Frame scanner: seed segment traces over a whole classification frame.
//!
//! Pixels are visited row by row, left to right, inside a margin sized so
//! that no trace can leave the frame:
//!
//! - values below `-1` feed the coarse [`WideAreaNet`];
//! - values in `(-1, 0]` are skipped;
//! - unclaimed bone pixels seed a trace with a radius adapted to their depth,
//!   `segment_coef / depth · finger_width_factor`, clamped to the ceiling;
//! - claimed bone pixels already belong to a segment and are skipped.
//!
//! The scan order is what makes lower-half tracing sufficient: anything above
//! or to the left of a seed on a connected structure was reached earlier.

mod net;
mod options;

pub use net::{WideAreaNet, EMPTY_CELL, MAX_FRAME_SIDE};
pub use options::ScanOptions;

use crate::error::SkeletonError;
use crate::image::{depth_fraction, ClassificationView, WIDE_AREA_THRESHOLD};
use crate::template::RingTemplate;
use crate::trace::{trace_segment, OwnershipMap, ReachScratch, TraceContext};
use crate::types::SegmentMap;
use log::debug;
use serde::Serialize;
use std::sync::Arc;

/// Result of one full-frame scan.
#[derive(Clone, Debug)]
pub struct ScanOutput {
    pub segments: SegmentMap,
    pub net: WideAreaNet,
    pub stats: ScanStats,
}

/// Counters gathered while scanning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Traces started.
    pub seeds: usize,
    /// Seeds whose adaptive radius hit the ceiling.
    pub clamped: usize,
    /// Pixels claimed by any segment.
    pub claimed: usize,
}

/// Scanner bound to one frame size and calibration.
#[derive(Clone, Debug)]
pub struct FrameScanner {
    width: usize,
    height: usize,
    margin: usize,
    radius_ceiling: f32,
    segment_coef: f32,
    finger_width_factor: f32,
    net_cell_px: usize,
    template: Arc<RingTemplate>,
}

impl FrameScanner {
    /// `segment_coef` converts normalised depth into the pixel length of a
    /// finger segment (see [`crate::calibration::DepthCoefficients`]).
    pub fn new(
        width: usize,
        height: usize,
        template: Arc<RingTemplate>,
        segment_coef: f32,
        options: &ScanOptions,
    ) -> Result<Self, SkeletonError> {
        if !segment_coef.is_finite() || segment_coef <= 0.0 {
            return Err(SkeletonError::InvalidCalibration(
                "segment coefficient must be finite and positive",
            ));
        }
        if width > MAX_FRAME_SIDE || height > MAX_FRAME_SIDE {
            return Err(SkeletonError::FrameTooLarge {
                width,
                height,
                max: MAX_FRAME_SIDE,
            });
        }
        if let Some(max) = options.max_radius_px {
            if max >= template.ring_count() {
                return Err(SkeletonError::RadiusExceeded {
                    radius: max,
                    max: template.ring_count().saturating_sub(1),
                });
            }
        }
        let margin = margin_for(width, height, template.ring_count(), options);
        let ceiling = options.max_radius_px.map_or(margin, |max| max.min(margin));
        Ok(Self {
            width,
            height,
            margin,
            radius_ceiling: ceiling as f32,
            segment_coef,
            finger_width_factor: options.finger_width_factor,
            net_cell_px: options.net_cell_px,
            template,
        })
    }

    /// Untouched border, equal on all four sides.
    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn radius_ceiling(&self) -> f32 {
        self.radius_ceiling
    }

    pub fn template(&self) -> &Arc<RingTemplate> {
        &self.template
    }

    /// Trace radius for a bone pixel with classification `value`.
    ///
    /// Zero or non-finite depths (which would give an infinite radius) clamp
    /// to the ceiling like any other oversized radius.
    #[inline]
    pub fn adaptive_radius(&self, value: f32) -> f32 {
        let depth = depth_fraction(value);
        let radius = self.segment_coef / depth * self.finger_width_factor;
        if radius.is_nan() {
            self.radius_ceiling
        } else {
            radius.min(self.radius_ceiling)
        }
    }

    /// Scan `view` and trace every segment.
    ///
    /// `owners` and `reach` are reset here; `net` is reused for storage only,
    /// its previous contents are discarded.
    pub fn scan(
        &self,
        view: ClassificationView<'_>,
        owners: &mut OwnershipMap,
        reach: &mut ReachScratch,
        mut net: WideAreaNet,
    ) -> Result<ScanOutput, SkeletonError> {
        if view.width() != self.width || view.height() != self.height {
            return Err(SkeletonError::MalformedBuffer {
                width: self.width,
                height: self.height,
                expected: self.width * self.height,
                actual: view.as_slice().len(),
            });
        }
        owners.reset(self.width * self.height);
        net.reset(self.width, self.height, self.net_cell_px);

        let mut segments = SegmentMap::new();
        let mut stats = ScanStats::default();
        let mut ctx = TraceContext::new(view, &self.template, owners, reach);
        let data = view.as_slice();
        let m = self.margin;

        for y in m..self.height.saturating_sub(m) {
            let row = y * self.width;
            for x in m..self.width.saturating_sub(m) {
                let value = data[row + x];
                if value < WIDE_AREA_THRESHOLD {
                    net.offer(x, y);
                    continue;
                }
                if value <= 0.0 || ctx.owners.is_claimed(row + x) {
                    continue;
                }
                let radius = self.adaptive_radius(value);
                if radius >= self.radius_ceiling {
                    stats.clamped += 1;
                }
                let segment = trace_segment(&mut ctx, x, y, radius)?;
                stats.seeds += 1;
                segments.insert(segment.seed, segment);
            }
        }
        stats.claimed = ctx.owners.claimed();

        debug!(
            "scan: {}x{} margin={} seeds={} clamped={} claimed={} net_cells={}",
            self.width,
            self.height,
            m,
            stats.seeds,
            stats.clamped,
            stats.claimed,
            net.occupied()
        );

        Ok(ScanOutput {
            segments,
            net,
            stats,
        })
    }
}

/// `min(rings, floor(w · fx), floor(h · fy))`.
pub fn margin_for(width: usize, height: usize, rings: usize, options: &ScanOptions) -> usize {
    let mx = (width as f32 * options.margin_fraction_x.max(0.0)) as usize;
    let my = (height as f32 * options.margin_fraction_y.max(0.0)) as usize;
    rings.min(mx).min(my)
}
