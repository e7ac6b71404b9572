pub mod classification;
pub mod io;

pub use self::classification::{
    depth_fraction, ClassificationImage, ClassificationView, RING_OVERLAP_THRESHOLD,
    WIDE_AREA_THRESHOLD,
};
