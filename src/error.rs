//! Error taxonomy of the skeleton pass.
//!
//! Only precondition and configuration problems surface as errors. Everything
//! that can go wrong per pixel (gaps, degenerate segments, missing centre
//! hints) is absorbed by the heuristics and yields a smaller or noisier
//! skeleton instead.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    /// The classification buffer does not match the configured frame size.
    #[error("classification buffer has {actual} values, expected {expected} for {width}x{height}")]
    MalformedBuffer {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    /// A trace radius larger than the template (or the seed's border
    /// distance) allows.
    #[error("trace radius {radius} exceeds the available {max} rings")]
    RadiusExceeded { radius: usize, max: usize },
    /// A frame side too long for the wide-area net's packed coordinates.
    #[error("frame {width}x{height} exceeds the maximum side of {max} pixels")]
    FrameTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    /// Camera parameters that cannot produce depth/pixel coefficients.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(&'static str),
}
