use serde::{Deserialize, Serialize};

/// Point on the board in board units (x to the right, y downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// distance_to returns the Euclidean distance between two points.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// circles_overlap returns true if the interiors of two circles of equal radius overlap.
/// Touching circles do not count as overlapping.
pub fn circles_overlap(a: &Point, b: &Point, radius: f64) -> bool {
    a.distance_to(b) < 2.0 * radius
}

/// calc_clearance returns the smallest gap between the circle around `p` and the circles around
/// `others` (all of the same radius). The gap is negative if circles overlap and infinite if
/// there are no other circles.
pub fn calc_clearance<'a, I>(p: &Point, others: I, radius: f64) -> f64
where
    I: IntoIterator<Item = &'a Point>,
{
    others
        .into_iter()
        .map(|o| p.distance_to(o) - 2.0 * radius)
        .fold(f64::INFINITY, f64::min)
}

/// in_bounds returns true if the point lies inside the rectangle [0, width] x [0, height] shrunk
/// by `margin` on every side (boundary included).
pub fn in_bounds(p: &Point, width: f64, height: f64, margin: f64) -> bool {
    margin <= p.x && p.x <= width - margin && margin <= p.y && p.y <= height - margin
}
