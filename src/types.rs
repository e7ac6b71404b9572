use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;

/// Segments of one frame keyed by seed pixel index. Seeds are discovered in
/// scan order, which is ascending index order, so iteration follows the scan.
pub type SegmentMap = BTreeMap<usize, Segment>;

/// Integer pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

impl Pixel {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Which of the two traced extremes an endpoint is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    Right,
}

/// Why an endpoint is not an open tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Joint {
    /// Coincides with the anchor of the segment seeded at this index.
    Anchor(usize),
    /// Closed by the orientation pass (base of a vertical finger or palm side).
    Closed,
}

/// Back-reference from a segment anchor to an endpoint that joined it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRef {
    pub seed: usize,
    pub side: Side,
}

/// One of the two extremes of a traced segment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Linear pixel index of the current position.
    pub index: usize,
    pub x: usize,
    pub y: usize,
    /// Normalised depth sampled at the endpoint.
    pub depth: f32,
    /// Last ring-overlap pixel seen on this side during the trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Pixel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint: Option<Joint>,
    /// Traced position before centre substitution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<Pixel>,
    /// Last distance computed by `distance_2d_from`, keyed by its origin.
    #[serde(skip)]
    distance_2d: Cell<Option<(Pixel, f32)>>,
}

impl Endpoint {
    pub fn at(index: usize, x: usize, y: usize) -> Self {
        Self {
            index,
            x,
            y,
            depth: 0.0,
            center: None,
            joint: None,
            original: None,
            distance_2d: Cell::new(None),
        }
    }

    pub fn position(&self) -> Pixel {
        Pixel::new(self.x, self.y)
    }

    pub fn has_joint(&self) -> bool {
        self.joint.is_some()
    }

    /// Pixel distance to `(x, y)`. Cached until either point moves.
    pub fn distance_2d_from(&self, x: usize, y: usize) -> f32 {
        let origin = Pixel::new(x, y);
        if let Some((cached_origin, distance)) = self.distance_2d.get() {
            if cached_origin == origin {
                return distance;
            }
        }
        let dx = self.x as f32 - x as f32;
        let dy = self.y as f32 - y as f32;
        let distance = (dx * dx + dy * dy).sqrt();
        self.distance_2d.set(Some((origin, distance)));
        distance
    }

    /// Move to a new pixel; drops the cached distance.
    pub(crate) fn relocate(&mut self, x: usize, y: usize, width: usize) {
        self.x = x;
        self.y = y;
        self.index = y * width + x;
        self.distance_2d.set(None);
    }
}

// The cached distance is derived data and does not take part in equality.
impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.x == other.x
            && self.y == other.y
            && self.depth == other.depth
            && self.center == other.center
            && self.joint == other.joint
            && self.original == other.original
    }
}

/// Connected group of bone pixels traced from one seed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Seed pixel index; also the key in [`SegmentMap`].
    pub seed: usize,
    /// Anchor position. Starts at the seed, edge avoidance may move it.
    pub x: usize,
    pub y: usize,
    pub depth: f32,
    pub far_left: Endpoint,
    pub far_right: Endpoint,
    pub count_left: usize,
    pub count_right: usize,
    /// Endpoints of other segments that coincide with this anchor.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchor_joints: Vec<EndpointRef>,
}

impl Segment {
    pub fn endpoint(&self, side: Side) -> &Endpoint {
        match side {
            Side::Left => &self.far_left,
            Side::Right => &self.far_right,
        }
    }

    pub fn endpoint_mut(&mut self, side: Side) -> &mut Endpoint {
        match side {
            Side::Left => &mut self.far_left,
            Side::Right => &mut self.far_right,
        }
    }

    pub fn anchor(&self) -> Pixel {
        Pixel::new(self.x, self.y)
    }

    pub fn anchor_has_joint(&self) -> bool {
        !self.anchor_joints.is_empty()
    }

    /// Both endpoints still sit on the seed.
    pub fn is_degenerate(&self) -> bool {
        self.far_left.index == self.seed && self.far_right.index == self.seed
    }
}
