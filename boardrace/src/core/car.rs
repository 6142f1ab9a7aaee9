use crate::core::state_handler::StateHandler;
use crate::error::SetupError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound of a randomly drawn stat (engine, tires, weight).
pub const STAT_MAX: u32 = 10;

/// Move distance (km) separating short legs (tires dominate) from long legs (engine dominates).
pub const DISTANCE_MIDPOINT: f64 = 5.0;

/// Car stats, summing up to the stat budget of the race.
/// * `engine` - Dominates the time on long legs (distance >= 5 km)
/// * `tires` - Tires and suspension, dominate the time on short legs
/// * `boost` - Time reduction factor while the boost is active
/// * `weight` - Damps the time of every leg on a smaller scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarStats {
    pub engine: u32,
    pub tires: u32,
    pub boost: u32,
    pub weight: u32,
}

impl CarStats {
    /// prime draws random stats under the given budget. Engine, tires and weight are drawn one
    /// after another from 1..=STAT_MAX (capped such that every remaining stat still gets at least
    /// one point), whatever is left goes to boost.
    pub fn prime<R: Rng + ?Sized>(stat_budget: u32, rng: &mut R) -> Result<CarStats, SetupError> {
        if stat_budget < 3 {
            return Err(SetupError::StatBudgetTooSmall {
                budget: stat_budget,
            });
        }

        let mut remaining = stat_budget;
        let mut draw = |still_needed: u32| {
            let upper = STAT_MAX.min(remaining - still_needed);
            let stat = rng.gen_range(1..=upper);
            remaining -= stat;
            stat
        };

        let engine = draw(2);
        let tires = draw(1);
        let weight = draw(0);

        Ok(CarStats {
            engine,
            tires,
            boost: remaining,
            weight,
        })
    }

    pub fn total(&self) -> u32 {
        self.engine + self.tires + self.boost + self.weight
    }
}

/// calc_move_time returns the time (h) a car with the given stats needs for a leg of the given
/// distance (km):
///
/// * `distance >= 5`: t = d / (0.5 + 0.1 * engine)
/// * `distance < 5`: t = d / (0.5 + 0.1 * tires)
/// * weight: t = t / (0.9 + 0.02 * weight)
/// * boost (if active): t = t / (1 + 0.1 * boost)
///
/// Negative distances are treated as zero.
pub fn calc_move_time(distance: f64, stats: &CarStats, boosted: bool) -> f64 {
    let distance = distance.max(0.0);

    let mut t_move = if distance >= DISTANCE_MIDPOINT {
        distance / (0.5 + 0.1 * stats.engine as f64)
    } else {
        distance / (0.5 + 0.1 * stats.tires as f64)
    };

    t_move /= 0.9 + 0.02 * stats.weight as f64;

    if boosted {
        t_move /= 1.0 + 0.1 * stats.boost as f64;
    }

    t_move
}

#[derive(Debug, Clone)]
pub struct Car {
    pub car_id: usize,
    pub stats: CarStats,
    boost_active: bool,
    boost_charges: u32,
    time: f64,
    pub sh: StateHandler,
}

impl Car {
    pub fn new(car_id: usize, stats: CarStats, boost_charges: u32, sh: StateHandler) -> Car {
        Car {
            car_id,
            stats,
            boost_active: false,
            boost_charges,
            time: 0.0,
            sh,
        }
    }

    /// Accumulated driving time (h).
    pub fn get_time(&self) -> f64 {
        self.time
    }

    pub fn get_boost_active(&self) -> bool {
        self.boost_active
    }

    pub fn get_boost_charges(&self) -> u32 {
        self.boost_charges
    }

    /// calc_time returns the time the car would need for the given distance in its current
    /// state (i.e., including an armed boost).
    pub fn calc_time(&self, distance: f64) -> f64 {
        calc_move_time(distance, &self.stats, self.boost_active)
    }

    /// activate_boost arms the boost for the next move. Returns false if no charge is left or the
    /// boost is armed already.
    pub fn activate_boost(&mut self) -> bool {
        if self.boost_active || self.boost_charges == 0 {
            return false;
        }
        self.boost_active = true;
        self.boost_charges -= 1;
        true
    }

    /// drive_to moves the car to the given location and adds the time for the leg. An armed boost
    /// is used up by the move. Returns the added time.
    pub fn drive_to(&mut self, location_id: usize, distance: f64) -> f64 {
        let t_move = self.calc_time(distance);
        self.time += t_move;
        self.boost_active = false;
        self.sh.visit(location_id);
        t_move
    }
}
