//! Frame-scoped scratch reused across frames.
//!
//! The ownership map, the trace reachability flags and the net storage are
//! sized once and reset by the scanner at the start of every frame, so a
//! steady stream of frames allocates nothing but the segment map.
use crate::scan::WideAreaNet;
use crate::trace::{OwnershipMap, ReachScratch};

#[derive(Debug, Default)]
pub struct FrameWorkspace {
    pub(crate) owners: OwnershipMap,
    pub(crate) reach: ReachScratch,
    spare_net: Option<WideAreaNet>,
}

impl FrameWorkspace {
    pub fn new(pixels: usize, template_len: usize) -> Self {
        Self {
            owners: OwnershipMap::with_len(pixels),
            reach: ReachScratch::with_len(template_len),
            spare_net: None,
        }
    }

    /// Net storage for the next frame; a fresh one if none was recycled.
    pub fn take_net(&mut self) -> WideAreaNet {
        self.spare_net.take().unwrap_or_default()
    }

    /// Keep `net` for reuse by the next frame.
    pub fn recycle_net(&mut self, net: WideAreaNet) {
        self.spare_net = Some(net);
    }

    pub fn owners(&self) -> &OwnershipMap {
        &self.owners
    }
}
