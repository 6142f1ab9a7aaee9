use crate::core::geometry::Point;
use serde::{Deserialize, Serialize};

/// LocationMark is the display state of a location from the point of view of the active car.
/// * `Visited` - the active car was already there (including its start)
/// * `Pending` - the active car may drive there
/// * `EndLocked` - end location of the active car, other locations must be visited first
/// * `EndReachable` - end location of the active car, visiting it is the final move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMark {
    Visited,
    Pending,
    EndLocked,
    EndReachable,
}

#[derive(Debug, Clone)]
pub struct Location {
    pub location_id: usize,
    pub name: String,
    pub pos: Point,
    pub radius: f64,
    pub mark: LocationMark,
}

impl Location {
    pub fn new(location_id: usize, pos: Point, radius: f64) -> Location {
        Location {
            location_id,
            name: format!("Location {}", location_id),
            pos,
            radius,
            mark: LocationMark::Pending,
        }
    }

    /// Distance between the centers of two locations in board units.
    pub fn distance_to(&self, other: &Location) -> f64 {
        self.pos.distance_to(&other.pos)
    }

    pub fn overlaps(&self, other: &Location) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// is_selectable returns true if the active car may currently click the location.
    pub fn is_selectable(&self) -> bool {
        matches!(self.mark, LocationMark::Pending | LocationMark::EndReachable)
    }
}
