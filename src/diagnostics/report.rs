use super::timing::TimingBreakdown;
use crate::joints::ResolveStats;
use crate::scan::ScanStats;
use serde::Serialize;

/// Frame geometry the pass ran with.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub margin: usize,
    pub radius_ceiling: f32,
    pub kernel_radius: usize,
}

/// Summary of one frame pass.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub scan: ScanStats,
    pub segments: usize,
    pub net_cells: usize,
    pub resolve: ResolveStats,
    /// Segments whose resolved tip is not joined.
    pub open_tips: usize,
    /// Set when the frame was rejected and replaced by an empty result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<String>,
}

impl FrameReport {
    pub fn empty(input: InputDescriptor) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    /// One-line summary for logs and tools.
    pub fn summary(&self) -> String {
        match &self.rejected {
            Some(reason) => format!("rejected: {reason}"),
            None => format!(
                "segments={} joints={} closed={} open_tips={} claimed={} net={} total={:.3}ms",
                self.segments,
                self.resolve.joints,
                self.resolve.closed,
                self.open_tips,
                self.scan.claimed,
                self.net_cells,
                self.timings.total_ms
            ),
        }
    }
}
