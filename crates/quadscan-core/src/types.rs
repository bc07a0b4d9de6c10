use serde::{Deserialize, Serialize};

/// Integer pixel coordinates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round sub-pixel coordinates to the nearest integer pixel.
    pub fn rounded(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }

    /// Squared Euclidean distance, exact in integer arithmetic.
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// An unconfirmed circular blob.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub center: Point,
    pub radius: f32,
}

impl Candidate {
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Placeholder candidates (non-positive radius, or a center that is not
    /// strictly inside the positive quadrant) never become markers.
    pub fn is_valid(&self) -> bool {
        self.radius > 0.0 && self.center.x > 0 && self.center.y > 0
    }
}

/// Confirmed marker centers in discovery order for one frame.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet(Vec<Point>);

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, p: Point) {
        self.0.push(p);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }
}

impl FromIterator<Point> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Four corner points of a detected region.
///
/// Marker-based detection returns them in band order, outline detection in
/// contour order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quadrilateral(pub [Point; 4]);

impl Quadrilateral {
    /// All-zero quadrilateral signalling a failed marker detection.
    pub const SENTINEL: Quadrilateral = Quadrilateral([Point::ORIGIN; 4]);

    pub fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    /// Closed edge list `(p0,p1) (p1,p2) (p2,p3) (p3,p0)`.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let p = self.0;
        [(p[0], p[1]), (p[1], p[2]), (p[2], p[3]), (p[3], p[0])]
    }
}

impl From<[Point; 4]> for Quadrilateral {
    fn from(points: [Point; 4]) -> Self {
        Self(points)
    }
}
