use super::FrameSkeleton;
use std::collections::VecDeque;
use std::rc::Rc;

/// Fixed-capacity ring of recent frame snapshots, newest first.
///
/// Snapshots are shared by reference count within the thread that runs the
/// extractor; frames carry per-endpoint caches and are not `Sync`.
#[derive(Clone, Debug)]
pub struct FrameHistory {
    frames: VecDeque<Rc<FrameSkeleton>>,
    capacity: usize,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add the newest frame; returns the evicted oldest one when full.
    pub fn push(&mut self, frame: impl Into<Rc<FrameSkeleton>>) -> Option<Rc<FrameSkeleton>> {
        let evicted = if self.frames.len() == self.capacity {
            self.frames.pop_back()
        } else {
            None
        };
        self.frames.push_front(frame.into());
        evicted
    }

    pub fn latest(&self) -> Option<&Rc<FrameSkeleton>> {
        self.frames.front()
    }

    /// The frame before the latest.
    pub fn previous(&self) -> Option<&Rc<FrameSkeleton>> {
        self.frames.get(1)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<FrameSkeleton>> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
