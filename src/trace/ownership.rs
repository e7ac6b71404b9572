/// Marker for pixels no segment has claimed.
pub const UNCLAIMED: u32 = u32::MAX;

/// Pixel → owning seed index for one frame.
///
/// Every pixel is written at most once per frame: the first trace that reaches
/// it owns it.
#[derive(Clone, Debug, Default)]
pub struct OwnershipMap {
    owners: Vec<u32>,
    claimed: usize,
}

impl OwnershipMap {
    pub fn with_len(len: usize) -> Self {
        Self {
            owners: vec![UNCLAIMED; len],
            claimed: 0,
        }
    }

    /// Mark every pixel unclaimed, resizing to `len`.
    pub fn reset(&mut self, len: usize) {
        self.owners.clear();
        self.owners.resize(len, UNCLAIMED);
        self.claimed = 0;
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    #[inline]
    pub fn is_claimed(&self, pixel: usize) -> bool {
        self.owners[pixel] != UNCLAIMED
    }

    #[inline]
    pub fn owner(&self, pixel: usize) -> Option<usize> {
        match self.owners[pixel] {
            UNCLAIMED => None,
            seed => Some(seed as usize),
        }
    }

    /// Claim an unclaimed pixel for `seed`. Returns `false` if already owned.
    #[inline]
    pub fn claim(&mut self, pixel: usize, seed: usize) -> bool {
        if self.owners[pixel] != UNCLAIMED {
            return false;
        }
        self.owners[pixel] = seed as u32;
        self.claimed += 1;
        true
    }

    /// Number of claimed pixels.
    pub fn claimed(&self) -> usize {
        self.claimed
    }

    /// Raw owner table, [`UNCLAIMED`] for free pixels.
    pub fn as_slice(&self) -> &[u32] {
        &self.owners
    }
}
