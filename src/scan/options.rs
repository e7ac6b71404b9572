use serde::Deserialize;

/// Frame scan parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Horizontal margin as a fraction of the frame width.
    pub margin_fraction_x: f32,
    /// Vertical margin as a fraction of the frame height.
    pub margin_fraction_y: f32,
    /// Scales the segment length at a seed's depth into a trace radius.
    pub finger_width_factor: f32,
    /// Side of a wide-area net cell in pixels.
    pub net_cell_px: usize,
    /// Optional trace radius ceiling below the margin.
    pub max_radius_px: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            margin_fraction_x: 0.1,
            margin_fraction_y: 0.125,
            finger_width_factor: 0.8,
            net_cell_px: 20,
            max_radius_px: None,
        }
    }
}
