//! Per-frame pass driving scanner and resolver.
//!
//! ```no_run
//! use finger_skeleton::{CameraCalibration, ExtractorParams, SkeletonExtractor};
//!
//! # fn example(buffer: &[f32]) -> Result<(), finger_skeleton::SkeletonError> {
//! let calib = CameraCalibration::from_focal(475.0, 320.0, 240.0, 0.001);
//! let mut extractor = SkeletonExtractor::new(640, 480, &calib, ExtractorParams::default())?;
//! let frame = extractor.process(buffer)?;
//! for (seed, tip) in frame.open_tips() {
//!     println!("segment {seed}: tip at ({}, {})", tip.x, tip.y);
//! }
//! extractor.recycle(frame);
//! # Ok(())
//! # }
//! ```
use super::frame::FrameSkeleton;
use super::params::ExtractorParams;
use super::workspace::FrameWorkspace;
use crate::calibration::{CameraCalibration, DepthCoefficients};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{FrameReport, InputDescriptor, TimingBreakdown};
use crate::error::SkeletonError;
use crate::image::ClassificationView;
use crate::interpolate::resolved_tip;
use crate::joints::JointResolver;
use crate::scan::{FrameScanner, ScanOutput};
use crate::template::RingTemplate;
use crate::trace::OwnershipMap;
use log::{debug, warn};
use std::time::Instant;

/// Skeleton extractor bound to one frame size and calibration.
///
/// Owns all frame-scoped scratch; frames must be processed one at a time.
pub struct SkeletonExtractor {
    width: usize,
    height: usize,
    params: ExtractorParams,
    coefs: DepthCoefficients,
    scanner: FrameScanner,
    resolver: JointResolver,
    workspace: FrameWorkspace,
}

impl SkeletonExtractor {
    /// Validate the configuration and prepare the template and scratch.
    pub fn new(
        width: usize,
        height: usize,
        calibration: &CameraCalibration,
        params: ExtractorParams,
    ) -> Result<Self, SkeletonError> {
        let coefs = calibration.coefficients()?;
        let template = RingTemplate::for_kernel(params.template.kernel_radius);
        let template_len = template.len();
        let scanner = FrameScanner::new(width, height, template, coefs.segment_coef, &params.scan)?;
        let resolver = JointResolver::new(coefs, params.joints.clone());
        debug!(
            "SkeletonExtractor::new w={} h={} margin={} ceiling={:.1} segment_coef={:.2}",
            width,
            height,
            scanner.margin(),
            scanner.radius_ceiling(),
            coefs.segment_coef
        );
        Ok(Self {
            width,
            height,
            params,
            coefs,
            scanner,
            resolver,
            workspace: FrameWorkspace::new(width * height, template_len),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    pub fn coefficients(&self) -> &DepthCoefficients {
        &self.coefs
    }

    pub fn scanner(&self) -> &FrameScanner {
        &self.scanner
    }

    /// Pixel ownership left by the last processed frame.
    pub fn owners(&self) -> &OwnershipMap {
        self.workspace.owners()
    }

    pub fn input_descriptor(&self) -> InputDescriptor {
        InputDescriptor {
            width: self.width,
            height: self.height,
            margin: self.scanner.margin(),
            radius_ceiling: self.scanner.radius_ceiling(),
            kernel_radius: self.scanner.template().ring_count(),
        }
    }

    /// Run the full pass on one classification buffer.
    ///
    /// A buffer that does not hold `width * height` values is rejected before
    /// any per-pixel work.
    pub fn process(&mut self, buffer: &[f32]) -> Result<FrameSkeleton, SkeletonError> {
        let total_start = Instant::now();
        let view = ClassificationView::from_slice(self.width, self.height, buffer)?;
        let mut timings = TimingBreakdown::default();

        let net = self.workspace.take_net();
        let scanner = &self.scanner;
        let workspace = &mut self.workspace;
        let ScanOutput {
            mut segments,
            net,
            stats: scan,
        } = timings.measure("scan", || {
            scanner.scan(view, &mut workspace.owners, &mut workspace.reach, net)
        })?;

        let resolver = &self.resolver;
        let resolve = timings.measure("joints", || resolver.resolve(view, &mut segments));

        let open_tips = segments
            .values()
            .filter(|seg| !resolved_tip(seg).has_joint())
            .count();
        timings.total_ms = elapsed_ms(total_start);

        let report = FrameReport {
            input: self.input_descriptor(),
            timings,
            scan,
            segments: segments.len(),
            net_cells: net.occupied(),
            resolve,
            open_tips,
            rejected: None,
        };
        debug!("frame: {}", report.summary());

        Ok(FrameSkeleton {
            width: self.width,
            height: self.height,
            segments,
            net,
            report,
            spacing_px: self.params.interpolation.spacing_px,
        })
    }

    /// Like [`process`](Self::process) but never fails: a rejected frame
    /// yields an empty skeleton whose report carries the reason.
    pub fn process_or_empty(&mut self, buffer: &[f32]) -> FrameSkeleton {
        match self.process(buffer) {
            Ok(frame) => frame,
            Err(err) => {
                warn!("frame rejected, emitting empty skeleton: {err}");
                self.empty_frame(err.to_string())
            }
        }
    }

    /// Hand a finished frame's storage back for reuse.
    pub fn recycle(&mut self, frame: FrameSkeleton) {
        self.workspace.recycle_net(frame.net);
    }

    fn empty_frame(&mut self, reason: String) -> FrameSkeleton {
        let mut net = self.workspace.take_net();
        net.reset(self.width, self.height, self.params.scan.net_cell_px);
        let mut report = FrameReport::empty(self.input_descriptor());
        report.rejected = Some(reason);
        FrameSkeleton {
            width: self.width,
            height: self.height,
            segments: Default::default(),
            net,
            report,
            spacing_px: self.params.interpolation.spacing_px,
        }
    }
}

impl std::fmt::Debug for SkeletonExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkeletonExtractor")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("margin", &self.scanner.margin())
            .field("coefs", &self.coefs)
            .finish()
    }
}
