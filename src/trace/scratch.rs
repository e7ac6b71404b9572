/// Per-trace reachability flags indexed by template sample.
///
/// Only the entries marked during a trace are cleared on `reset`, so the cost
/// of a reset follows the size of the previous trace, not of the template.
#[derive(Clone, Debug, Default)]
pub struct ReachScratch {
    reachable: Vec<bool>,
    touched: Vec<u32>,
}

impl ReachScratch {
    pub fn with_len(len: usize) -> Self {
        Self {
            reachable: vec![false; len],
            touched: Vec::with_capacity(256),
        }
    }

    /// Grow to hold `len` samples. Existing flags are kept.
    pub fn ensure_len(&mut self, len: usize) {
        if self.reachable.len() < len {
            self.reachable.resize(len, false);
        }
    }

    pub fn reset(&mut self) {
        for &i in &self.touched {
            self.reachable[i as usize] = false;
        }
        self.touched.clear();
    }

    #[inline]
    pub fn mark(&mut self, sample: usize) {
        if !self.reachable[sample] {
            self.reachable[sample] = true;
            self.touched.push(sample as u32);
        }
    }

    #[inline]
    pub fn is_reachable(&self, sample: usize) -> bool {
        self.reachable[sample]
    }

    /// Samples marked since the last reset.
    pub fn marked(&self) -> usize {
        self.touched.len()
    }
}
