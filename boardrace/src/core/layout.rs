use crate::core::geometry::{calc_clearance, circles_overlap, Point};
use crate::core::location::Location;
use crate::error::SetupError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// * `width` - Board width (board units)
/// * `height` - Board height (board units)
/// * `location_radius` - Radius of a location, also used as clearance to the board edges
/// * `nudge_margin` - Locations closer than `location_radius` to an edge are moved inwards by
/// `location_radius + nudge_margin`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoardPars {
    pub width: f64,
    pub height: f64,
    pub location_radius: f64,
    pub nudge_margin: f64,
}

impl Default for BoardPars {
    fn default() -> Self {
        BoardPars {
            width: 1000.0,
            height: 700.0,
            location_radius: 25.0,
            nudge_margin: 10.0,
        }
    }
}

impl BoardPars {
    pub fn check(&self) -> Result<(), SetupError> {
        let r = self.location_radius;
        let valid = r.is_finite()
            && r >= 0.0
            && self.nudge_margin.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 2.0 * r
            && self.height > 2.0 * r;

        if valid {
            Ok(())
        } else {
            Err(SetupError::InvalidBoard {
                width: self.width,
                height: self.height,
                radius: r,
            })
        }
    }
}

/// Handling of candidates that overlap an already placed location.
/// * `SingleRetry` - resample once and accept the second candidate in any case
/// * `RetryUntilClear` - resample up to `max_attempts` candidates, if none is clear the one with
/// the largest clearance is accepted
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PlacementPolicy {
    SingleRetry,
    RetryUntilClear { max_attempts: u32 },
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::RetryUntilClear { max_attempts: 100 }
    }
}

/// calc_no_locations returns the number of locations on the board for the given number of
/// players: two more than players for an odd number, three more for an even number.
pub fn calc_no_locations(no_players: usize) -> usize {
    if no_players % 2 == 1 {
        no_players + 2
    } else {
        no_players + 3
    }
}

/// create_locations places the locations one after another on the board.
pub fn create_locations<R: Rng + ?Sized>(
    no_locations: usize,
    board: &BoardPars,
    policy: PlacementPolicy,
    rng: &mut R,
) -> Result<Vec<Location>, SetupError> {
    board.check()?;

    let mut positions: Vec<Point> = Vec::with_capacity(no_locations);

    for location_id in 0..no_locations {
        let pos = match policy {
            PlacementPolicy::SingleRetry => {
                let first = sample_candidate(board, rng);
                let overlapping = positions
                    .iter()
                    .any(|p| circles_overlap(&first, p, board.location_radius));

                if overlapping {
                    sample_candidate(board, rng)
                } else {
                    first
                }
            }
            PlacementPolicy::RetryUntilClear { max_attempts } => {
                place_until_clear(location_id, &positions, board, max_attempts.max(1), rng)
            }
        };

        debug!(
            "Placed location {} at ({:.1}, {:.1})",
            location_id, pos.x, pos.y
        );
        positions.push(pos);
    }

    Ok(positions
        .into_iter()
        .enumerate()
        .map(|(location_id, pos)| Location::new(location_id, pos, board.location_radius))
        .collect())
}

fn place_until_clear<R: Rng + ?Sized>(
    location_id: usize,
    positions: &[Point],
    board: &BoardPars,
    max_attempts: u32,
    rng: &mut R,
) -> Point {
    let mut best = sample_candidate(board, rng);
    let mut best_clearance = calc_clearance(&best, positions, board.location_radius);

    for _ in 1..max_attempts {
        if best_clearance >= 0.0 {
            return best;
        }

        let candidate = sample_candidate(board, rng);
        let clearance = calc_clearance(&candidate, positions, board.location_radius);
        if clearance > best_clearance {
            best = candidate;
            best_clearance = clearance;
        }
    }

    if best_clearance < 0.0 {
        warn!(
            "Could not place location {} without overlap after {} attempts, overlap is {:.1}",
            location_id, max_attempts, -best_clearance
        );
    }

    best
}

/// sample_candidate draws a uniformly distributed position and nudges it away from the edges.
fn sample_candidate<R: Rng + ?Sized>(board: &BoardPars, rng: &mut R) -> Point {
    let r = board.location_radius;
    let x = rng.gen_range(0.0..board.width - 2.0 * r);
    let y = rng.gen_range(0.0..board.height - 2.0 * r);

    nudge_inwards(Point::new(x, y), board)
}

fn nudge_inwards(p: Point, board: &BoardPars) -> Point {
    let r = board.location_radius;
    let nudge = r + board.nudge_margin;
    let nudge_coord = |c: f64, size: f64| {
        let mut c = c;
        if c < r {
            c += nudge;
        }
        if c > size - r {
            c -= nudge;
        }
        c.max(r).min(size - r)
    };

    Point::new(nudge_coord(p.x, board.width), nudge_coord(p.y, board.height))
}
