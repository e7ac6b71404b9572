use crate::types::Pixel;

/// Marker for net cells without a representative.
pub const EMPTY_CELL: u32 = u32::MAX;

/// Largest frame side the packed representatives can address. Coordinates
/// stay below `u16::MAX`, so no pixel packs to [`EMPTY_CELL`].
pub const MAX_FRAME_SIDE: usize = u16::MAX as usize;

/// Coarse grid over the frame keeping one wide-area pixel per cell.
///
/// Representatives are packed as `(x << 16) | y`; the first pixel scanned in
/// a cell wins. Frames are limited to [`MAX_FRAME_SIDE`] per side. Storage
/// is reused across frames via [`reset`].
///
/// [`reset`]: WideAreaNet::reset
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WideAreaNet {
    cell_px: usize,
    cols: usize,
    rows: usize,
    cells: Vec<u32>,
}

impl WideAreaNet {
    pub fn new(width: usize, height: usize, cell_px: usize) -> Self {
        let mut net = Self::default();
        net.reset(width, height, cell_px);
        net
    }

    /// Clear every cell and size the grid for `width × height`.
    pub fn reset(&mut self, width: usize, height: usize, cell_px: usize) {
        let cell_px = cell_px.max(1);
        self.cell_px = cell_px;
        self.cols = width.div_ceil(cell_px);
        self.rows = height.div_ceil(cell_px);
        self.cells.clear();
        self.cells.resize(self.cols * self.rows, EMPTY_CELL);
    }

    pub fn cell_px(&self) -> usize {
        self.cell_px
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Record `(x, y)` unless its cell already has a representative.
    #[inline]
    pub fn offer(&mut self, x: usize, y: usize) -> bool {
        let slot = (y / self.cell_px) * self.cols + x / self.cell_px;
        if self.cells[slot] != EMPTY_CELL {
            return false;
        }
        self.cells[slot] = ((x as u32) << 16) | y as u32;
        true
    }

    /// Representative of cell `(col, row)`.
    pub fn cell(&self, col: usize, row: usize) -> Option<Pixel> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        unpack(self.cells[row * self.cols + col])
    }

    /// Occupied cells as `(col, row, representative)`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Pixel)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, &packed)| unpack(packed).map(|p| (i % cols, i / cols, p)))
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Packed cell table, [`EMPTY_CELL`] for empty cells.
    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }
}

#[inline]
fn unpack(packed: u32) -> Option<Pixel> {
    if packed == EMPTY_CELL {
        None
    } else {
        Some(Pixel::new((packed >> 16) as usize, (packed & 0xffff) as usize))
    }
}
