use crate::error::SetupError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Start and end location of a single car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAssignment {
    pub start: usize,
    pub end: usize,
}

/// assign_routes draws a start and an end location for every car. Starts are unique among all
/// cars, ends are unique among all cars and no car ends where it starts. The end of one car may
/// coincide with the start of another one.
pub fn assign_routes<R: Rng + ?Sized>(
    no_players: usize,
    no_locations: usize,
    rng: &mut R,
) -> Result<Vec<RouteAssignment>, SetupError> {
    if no_players == 0 {
        return Err(SetupError::NoPlayers);
    }

    // the last car needs a free end location that is not its own start
    if no_locations < no_players + 1 {
        return Err(SetupError::TooManyPlayers {
            players: no_players,
            locations: no_locations,
        });
    }

    let mut assignments: Vec<RouteAssignment> = Vec::with_capacity(no_players);

    for _ in 0..no_players {
        let mut start = rng.gen_range(0..no_locations);
        let mut end = rng.gen_range(0..no_locations);

        while assignments.iter().any(|a| a.start == start) {
            start = rng.gen_range(0..no_locations);
        }
        while end == start || assignments.iter().any(|a| a.end == end) {
            end = rng.gen_range(0..no_locations);
        }

        assignments.push(RouteAssignment { start, end });
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::calc_no_locations;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn starts_and_ends_are_unique() {
        for no_players in 1..=8 {
            for seed in 0..25 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let no_locations = calc_no_locations(no_players);
                let assignments = assign_routes(no_players, no_locations, &mut rng).unwrap();

                assert_eq!(assignments.len(), no_players);

                let starts: HashSet<usize> = assignments.iter().map(|a| a.start).collect();
                let ends: HashSet<usize> = assignments.iter().map(|a| a.end).collect();
                assert_eq!(starts.len(), no_players);
                assert_eq!(ends.len(), no_players);

                for a in assignments.iter() {
                    assert_ne!(a.start, a.end);
                    assert!(a.start < no_locations && a.end < no_locations);
                }
            }
        }
    }

    #[test]
    fn tightest_pool_still_resolves() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let assignments = assign_routes(4, 5, &mut rng).unwrap();
        assert_eq!(assignments.len(), 4);
    }

    #[test]
    fn too_small_pool_is_a_setup_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            assign_routes(3, 3, &mut rng),
            Err(SetupError::TooManyPlayers {
                players: 3,
                locations: 3
            })
        );
        assert_eq!(assign_routes(0, 3, &mut rng), Err(SetupError::NoPlayers));
    }
}
