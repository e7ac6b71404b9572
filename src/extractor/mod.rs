//! Frame-level orchestration of the skeleton pass.
//!
//! One pass is a strict sequence: validate the buffer, scan the frame (which
//! seeds every trace in scan order over a shared ownership map), then resolve
//! joints. Scratch is owned by the extractor and reset per frame, so a frame
//! never sees state left by the previous one.
//!
//! Modules
//! - [`params`]: configuration types, deserialisable from JSON.
//! - `pipeline`: the [`SkeletonExtractor`] itself.
//! - `frame`: the [`FrameSkeleton`] result.
//! - `workspace`: reusable frame-scoped buffers.
//! - `history`: a small ring of recent frames for tools.

mod frame;
mod history;
pub mod params;
mod pipeline;
mod workspace;

pub use frame::FrameSkeleton;
pub use history::FrameHistory;
pub use params::{ExtractorParams, TemplateOptions};
pub use pipeline::SkeletonExtractor;
pub use workspace::FrameWorkspace;

#[cfg(test)]
mod tests;
