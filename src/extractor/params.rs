//! Parameter types configuring the skeleton pass.
//!
//! Everything defaults to the values the pass was tuned with for a 640x480
//! depth stream; a JSON config only needs to name what it changes.

use crate::interpolate::InterpolationOptions;
use crate::joints::JointOptions;
use crate::scan::ScanOptions;
use crate::template::DEFAULT_KERNEL_RADIUS;
use serde::Deserialize;

/// Connectivity template size.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Number of rings generated, which also caps the scan margin.
    pub kernel_radius: usize,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            kernel_radius: DEFAULT_KERNEL_RADIUS,
        }
    }
}

/// Extractor-wide parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    pub template: TemplateOptions,
    pub scan: ScanOptions,
    pub joints: JointOptions,
    pub interpolation: InterpolationOptions,
    /// Frames kept by [`super::FrameHistory`] in tools.
    pub history_len: usize,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            template: TemplateOptions::default(),
            scan: ScanOptions::default(),
            joints: JointOptions::default(),
            interpolation: InterpolationOptions::default(),
            history_len: 3,
        }
    }
}
