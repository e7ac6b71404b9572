//! Per-pixel classification buffer produced by the upstream depth pre-pass.
//!
//! Each value encodes one pixel:
//! - `0.0`: not relevant (no depth, or outside the working range).
//! - `> 0`: bone pixel. The integer part is a ring count from the pre-pass,
//!   the fractional part is normalised depth. Values above
//!   [`RING_OVERLAP_THRESHOLD`] mark pixels where several sampling rings
//!   overlapped, used as a centre hint for fingertips.
//! - `< 0`: wide-area pixel (palm, back of the hand). The fractional part of
//!   the magnitude is normalised depth; values below `-1` mark wider areas.
//!
//! Buffers are row-major with stride equal to width.
use crate::error::SkeletonError;

/// Bone values above this carry the pre-pass ring-overlap signal. The
/// threshold is part of the pre-pass output encoding.
pub const RING_OVERLAP_THRESHOLD: f32 = 1.0;

/// Values below this are wide-area pixels that feed the coarse net.
pub const WIDE_AREA_THRESHOLD: f32 = -1.0;

/// Fractional part of a classification value, truncating toward zero.
#[inline]
pub fn depth_fraction(value: f32) -> f32 {
    value - value.trunc()
}

/// Borrowed, size-checked view over a classification buffer.
#[derive(Clone, Copy, Debug)]
pub struct ClassificationView<'a> {
    width: usize,
    height: usize,
    data: &'a [f32],
}

impl<'a> ClassificationView<'a> {
    /// Wrap `data`, failing fast when it does not hold exactly `width * height` values.
    pub fn from_slice(width: usize, height: usize, data: &'a [f32]) -> Result<Self, SkeletonError> {
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(SkeletonError::MalformedBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn value(&self, index: usize) -> f32 {
        self.data[index]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Value at signed coordinates, `None` outside the frame.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<f32> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    /// Normalised depth of a bone pixel.
    #[inline]
    pub fn depth_at(&self, index: usize) -> f32 {
        depth_fraction(self.data[index])
    }

    /// Normalised depth of a pixel known to be wide-area (negative encoding).
    #[inline]
    pub fn wide_depth(&self, x: usize, y: usize) -> f32 {
        depth_fraction(-self.get(x, y))
    }
}

/// Owned classification buffer, mostly for tools and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ClassificationImage {
    /// All-zero buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = y * self.w + x;
        self.data[i] = v;
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    pub fn view(&self) -> ClassificationView<'_> {
        ClassificationView {
            width: self.w,
            height: self.h,
            data: &self.data,
        }
    }
}
