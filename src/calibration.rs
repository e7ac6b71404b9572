//! Camera calibration and the depth/pixel coefficients derived from it.
//!
//! All heuristics of the skeleton pass are expressed in metres and converted
//! to pixels at the depth where they are applied. With focal length `fx` (in
//! pixels) and `depth_scale` (metres per unit of normalised depth), a length
//! `L` metres seen at normalised depth `d` spans `L · fx / depth_scale / d`
//! pixels.
use crate::error::SkeletonError;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Length of one finger segment used to size trace radii (metres).
pub const FINGER_SEGMENT_M: f32 = 0.05;
/// Half the width of a finger as seen by the upstream classification pass (metres).
pub const FINGER_HALF_WIDTH_M: f32 = 0.0027;

/// Pinhole intrinsics plus the depth normalisation of the classification buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraCalibration {
    pub intrinsics: Matrix3<f32>,
    /// Metres per unit of normalised depth.
    pub depth_scale: f32,
}

impl CameraCalibration {
    pub fn new(intrinsics: Matrix3<f32>, depth_scale: f32) -> Self {
        Self {
            intrinsics,
            depth_scale,
        }
    }

    /// Intrinsics with square pixels and principal point `(cx, cy)`.
    pub fn from_focal(fx: f32, cx: f32, cy: f32, depth_scale: f32) -> Self {
        Self::new(
            Matrix3::new(fx, 0.0, cx, 0.0, fx, cy, 0.0, 0.0, 1.0),
            depth_scale,
        )
    }

    #[inline]
    pub fn fx(&self) -> f32 {
        self.intrinsics[(0, 0)]
    }

    /// Check the parameters and derive the coefficients used by the pass.
    pub fn coefficients(&self) -> Result<DepthCoefficients, SkeletonError> {
        let fx = self.fx();
        if !fx.is_finite() || fx <= 0.0 {
            return Err(SkeletonError::InvalidCalibration(
                "focal length must be finite and positive",
            ));
        }
        if !self.depth_scale.is_finite() || self.depth_scale <= 0.0 {
            return Err(SkeletonError::InvalidCalibration(
                "depth scale must be finite and positive",
            ));
        }
        let px_per_m = fx / self.depth_scale;
        Ok(DepthCoefficients {
            segment_coef: FINGER_SEGMENT_M * px_per_m,
            finger_half_width: FINGER_HALF_WIDTH_M * px_per_m,
            depth_coef: self.depth_scale / fx,
            depth_scale: self.depth_scale,
        })
    }
}

/// Conversions between metres at a given depth and pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthCoefficients {
    /// Pixels spanned by a finger segment at unit normalised depth.
    pub segment_coef: f32,
    /// Pixels spanned by half a finger width at unit normalised depth.
    pub finger_half_width: f32,
    /// Metres per pixel at unit normalised depth.
    pub depth_coef: f32,
    /// Metres per unit of normalised depth.
    pub depth_scale: f32,
}

impl DepthCoefficients {
    /// Pixels spanned by `metres` at normalised depth `depth`.
    #[inline]
    pub fn pixels_at(&self, metres: f32, depth: f32) -> f32 {
        metres / self.depth_coef / depth
    }

    /// Edge-avoidance budget in pixels at `depth`.
    #[inline]
    pub fn edge_budget_px(&self, edge_budget_m: f32, depth: f32) -> f32 {
        self.pixels_at(edge_budget_m, depth)
    }
}
