use serde::Deserialize;

/// Joint resolver parameters. Distances are physical, in metres.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct JointOptions {
    /// Endpoints closer than this to another segment's anchor become joints.
    pub match_distance_m: f32,
    /// A segment is vertical when its horizontal spread is below this
    /// fraction of its vertical spread.
    pub vertical_ratio: f32,
    /// Distance kept between an open end and the region edge.
    pub edge_budget_m: f32,
}

impl Default for JointOptions {
    fn default() -> Self {
        Self {
            match_distance_m: 0.03,
            vertical_ratio: 0.3,
            edge_budget_m: 0.006,
        }
    }
}
