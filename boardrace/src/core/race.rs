use crate::core::assignment::assign_routes;
use crate::core::car::{Car, CarStats};
use crate::core::layout::{calc_no_locations, create_locations};
use crate::core::location::{Location, LocationMark};
use crate::core::state_handler::StateHandler;
use crate::error::SetupError;
use crate::interfaces::view_interface::{CarState, LocationState, RaceSnapshot};
use crate::post::race_result::{CarResult, RaceResult};
use crate::pre::read_game_pars::GamePars;
use helpers::general::argmin;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    Setup,
    InProgress,
    Finished,
}

/// Reasons for refusing a player command. A rejected command does not change the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotInProgress(RaceStatus),
    NotActiveCar { car_id: usize, active_car: usize },
    UnknownLocation(usize),
    AlreadyVisited(usize),
    EndNotReachable(usize),
    NoBoostLeft,
    BoostAlreadyActive,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::NotInProgress(status) => write!(f, "race is not in progress ({:?})", status),
            Rejection::NotActiveCar { car_id, active_car } => write!(
                f,
                "it is the turn of car {}, not of car {}",
                active_car, car_id
            ),
            Rejection::UnknownLocation(l) => write!(f, "location {} does not exist", l),
            Rejection::AlreadyVisited(l) => write!(f, "location {} was already visited", l),
            Rejection::EndNotReachable(l) => write!(
                f,
                "end location {} can only be visited after all other locations",
                l
            ),
            Rejection::NoBoostLeft => write!(f, "no boost left"),
            Rejection::BoostAlreadyActive => write!(f, "boost is already active"),
        }
    }
}

/// Summary of an accepted move.
/// * `distance` - (km) Distance of the leg
/// * `time_added` - (h) Time added to the car
/// * `car` - State of the car after the move
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub car_id: usize,
    pub from: usize,
    pub to: usize,
    pub distance: f64,
    pub time_added: f64,
    pub boosted: bool,
    pub car: CarState,
    pub next_active_car: usize,
    pub race_finished: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VisitOutcome {
    Accepted(MoveReport),
    Rejected {
        reason: Rejection,
        active_car: usize,
    },
}

impl VisitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VisitOutcome::Accepted(_))
    }

    /// Car whose turn it is after the command.
    pub fn get_active_car(&self) -> usize {
        match self {
            VisitOutcome::Accepted(report) => report.next_active_car,
            VisitOutcome::Rejected { active_car, .. } => *active_car,
        }
    }
}

#[derive(Debug)]
pub struct Race {
    status: RaceStatus,
    pub locations: Vec<Location>,
    pub cars_list: Vec<Car>,
    active_car: usize,
    distance_scale: f64,
    winner: Option<usize>,
}

impl Race {
    /// new creates locations, cars and their routes on the basis of the game parameters. The race
    /// stays in setup state until it is started.
    pub fn new<R: Rng + ?Sized>(game_pars: &GamePars, rng: &mut R) -> Result<Race, SetupError> {
        if game_pars.players == 0 {
            return Err(SetupError::NoPlayers);
        }

        let no_locations = calc_no_locations(game_pars.players);
        let locations = create_locations(
            no_locations,
            &game_pars.board,
            game_pars.placement,
            rng,
        )?;

        let assignments = assign_routes(game_pars.players, no_locations, rng)?;

        let mut cars_list = Vec::with_capacity(game_pars.players);
        for (car_id, assignment) in assignments.iter().enumerate() {
            let stats = CarStats::prime(game_pars.stat_budget, rng)?;
            debug!(
                "Car {}: start {}, end {}, {:?}",
                car_id, assignment.start, assignment.end, stats
            );
            cars_list.push(Car::new(
                car_id,
                stats,
                game_pars.boost_charges,
                StateHandler::new(assignment.start, assignment.end),
            ));
        }

        Race::from_parts(locations, cars_list, game_pars.distance_scale)
    }

    /// from_parts creates a race in setup state from already placed locations and cars.
    pub fn from_parts(
        locations: Vec<Location>,
        cars_list: Vec<Car>,
        distance_scale: f64,
    ) -> Result<Race, SetupError> {
        if cars_list.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if !(distance_scale.is_finite() && distance_scale > 0.0) {
            return Err(SetupError::InvalidDistanceScale(distance_scale));
        }

        let no_locations = locations.len();
        for (index, car) in cars_list.iter().enumerate() {
            if car.car_id != index {
                return Err(SetupError::CarIdMismatch {
                    index,
                    car_id: car.car_id,
                });
            }

            for &location_id in [car.sh.get_start(), car.sh.get_end()].iter() {
                if location_id >= no_locations {
                    return Err(SetupError::InvalidRoute {
                        car_id: car.car_id,
                        location_id,
                        locations: no_locations,
                    });
                }
            }

            if car.sh.get_start() == car.sh.get_end() {
                return Err(SetupError::StartIsEnd {
                    car_id: car.car_id,
                    location_id: car.sh.get_start(),
                });
            }

            // starts and ends are unique among all cars
            for other in cars_list[..index].iter() {
                if other.sh.get_start() == car.sh.get_start() {
                    return Err(SetupError::SharedStart {
                        first: other.car_id,
                        second: car.car_id,
                        location_id: car.sh.get_start(),
                    });
                }
                if other.sh.get_end() == car.sh.get_end() {
                    return Err(SetupError::SharedEnd {
                        first: other.car_id,
                        second: car.car_id,
                        location_id: car.sh.get_end(),
                    });
                }
            }
        }

        Ok(Race {
            status: RaceStatus::Setup,
            locations,
            cars_list,
            active_car: 0,
            distance_scale,
            winner: None,
        })
    }

    /// initialize sets up a race and starts it.
    pub fn initialize<R: Rng + ?Sized>(
        game_pars: &GamePars,
        rng: &mut R,
    ) -> Result<Race, SetupError> {
        let mut race = Race::new(game_pars, rng)?;
        race.start();
        Ok(race)
    }

    /// start hands the first turn to car 0.
    pub fn start(&mut self) {
        if self.status != RaceStatus::Setup {
            panic!("Tried to start a race that is not in setup state!")
        }

        self.status = RaceStatus::InProgress;
        self.active_car = 0;
        self.update_marks();

        info!(
            "Race started with {} cars on {} locations",
            self.cars_list.len(),
            self.locations.len()
        );
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// visit_location drives the given car to the target location if the command is valid, passes
    /// the turn on and checks if the race is finished.
    pub fn visit_location(&mut self, car_id: usize, location_id: usize) -> VisitOutcome {
        if let Err(reason) = self.check_visit(car_id, location_id) {
            return VisitOutcome::Rejected {
                reason,
                active_car: self.active_car,
            };
        }

        let from = self.cars_list[car_id].sh.get_cur_location();
        let distance = self.calc_distance(from, location_id);

        let car = &mut self.cars_list[car_id];
        let boosted = car.get_boost_active();
        let time_added = car.drive_to(location_id, distance);

        debug!(
            "Car {} drove from {} to {} ({:.2}km, +{:.3}h{})",
            car_id,
            from,
            location_id,
            distance,
            time_added,
            if boosted { ", boosted" } else { "" }
        );

        self.active_car = (self.active_car + 1) % self.cars_list.len();
        self.update_marks();
        self.handle_race_finish();

        VisitOutcome::Accepted(MoveReport {
            car_id,
            from,
            to: location_id,
            distance,
            time_added,
            boosted,
            car: self.get_car_state(car_id),
            next_active_car: self.active_car,
            race_finished: self.status == RaceStatus::Finished,
        })
    }

    /// activate_boost arms the boost of the active car for its next move.
    pub fn activate_boost(&mut self, car_id: usize) -> Result<(), Rejection> {
        self.check_turn(car_id)?;

        let car = &mut self.cars_list[car_id];
        if car.get_boost_active() {
            return Err(Rejection::BoostAlreadyActive);
        }
        if !car.activate_boost() {
            return Err(Rejection::NoBoostLeft);
        }

        debug!(
            "Car {} activated its boost ({} left)",
            car_id,
            car.get_boost_charges()
        );
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // RACE STATE PARTS ----------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn check_turn(&self, car_id: usize) -> Result<(), Rejection> {
        if self.status != RaceStatus::InProgress {
            return Err(Rejection::NotInProgress(self.status));
        }
        if car_id != self.active_car {
            return Err(Rejection::NotActiveCar {
                car_id,
                active_car: self.active_car,
            });
        }
        Ok(())
    }

    fn check_visit(&self, car_id: usize, location_id: usize) -> Result<(), Rejection> {
        self.check_turn(car_id)?;

        if location_id >= self.locations.len() {
            return Err(Rejection::UnknownLocation(location_id));
        }

        let sh = &self.cars_list[car_id].sh;
        if sh.has_visited(location_id) {
            return Err(Rejection::AlreadyVisited(location_id));
        }

        // the end location is the last stop of every route
        if location_id == sh.get_end()
            && self.locations[location_id].mark != LocationMark::EndReachable
        {
            return Err(Rejection::EndNotReachable(location_id));
        }

        Ok(())
    }

    /// update_marks sets the location marks from the point of view of the active car.
    fn update_marks(&mut self) {
        let no_locations = self.locations.len();
        let sh = &self.cars_list[self.active_car].sh;
        let end_reachable = sh.get_end_reachable(no_locations);

        for location in self.locations.iter_mut() {
            let location_id = location.location_id;
            location.mark = if sh.has_visited(location_id) {
                LocationMark::Visited
            } else if location_id == sh.get_end() {
                if end_reachable {
                    LocationMark::EndReachable
                } else {
                    LocationMark::EndLocked
                }
            } else {
                LocationMark::Pending
            };
        }
    }

    fn handle_race_finish(&mut self) {
        if !self.get_all_finished() {
            return;
        }

        let times: Vec<f64> = self.cars_list.iter().map(|car| car.get_time()).collect();
        self.winner = argmin(&times);
        self.status = RaceStatus::Finished;

        if let Some(winner) = self.winner {
            info!(
                "Race finished, car {} wins with {:.3}h",
                winner, times[winner]
            );
        }
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_status(&self) -> RaceStatus {
        self.status
    }

    pub fn get_active_car(&self) -> usize {
        self.active_car
    }

    pub fn get_no_locations(&self) -> usize {
        self.locations.len()
    }

    /// get_winner returns the car with the lowest time (lowest id on ties) once the race is
    /// finished.
    pub fn get_winner(&self) -> Option<usize> {
        if self.status == RaceStatus::Finished {
            self.winner
        } else {
            None
        }
    }

    pub fn get_all_finished(&self) -> bool {
        let no_locations = self.locations.len();
        self.cars_list
            .iter()
            .all(|car| car.sh.get_finished(no_locations))
    }

    /// calc_distance returns the distance (km) between two locations.
    pub fn calc_distance(&self, from: usize, to: usize) -> f64 {
        self.locations[from].distance_to(&self.locations[to]) / self.distance_scale
    }

    pub fn get_car_state(&self, car_id: usize) -> CarState {
        let car = &self.cars_list[car_id];
        CarState {
            car_id: car.car_id,
            stats: car.stats,
            time: car.get_time(),
            cur_location: car.sh.get_cur_location(),
            start: car.sh.get_start(),
            end: car.sh.get_end(),
            visited: car.sh.get_route().to_vec(),
            boost_active: car.get_boost_active(),
            boost_charges: car.get_boost_charges(),
        }
    }

    pub fn get_snapshot(&self) -> RaceSnapshot {
        let cur_location = self.cars_list[self.active_car].sh.get_cur_location();

        RaceSnapshot {
            status: self.status,
            active_car: self.active_car,
            car_states: (0..self.cars_list.len())
                .map(|car_id| self.get_car_state(car_id))
                .collect(),
            location_states: self
                .locations
                .iter()
                .map(|location| LocationState {
                    location_id: location.location_id,
                    name: location.name.to_owned(),
                    pos: location.pos,
                    radius: location.radius,
                    mark: location.mark,
                    distance_from_active: self.calc_distance(cur_location, location.location_id),
                })
                .collect(),
            winner: self.get_winner(),
        }
    }

    pub fn get_race_result(&self, seed: u64) -> RaceResult {
        RaceResult {
            seed,
            no_locations: self.locations.len(),
            finished: self.status == RaceStatus::Finished,
            winner: self.get_winner(),
            car_results: self
                .cars_list
                .iter()
                .map(|car| CarResult {
                    car_id: car.car_id,
                    engine: car.stats.engine,
                    tires: car.stats.tires,
                    boost: car.stats.boost,
                    weight: car.stats.weight,
                    time: car.get_time(),
                    route: car.sh.get_route().to_vec(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::car::calc_move_time;
    use crate::core::geometry::{in_bounds, Point};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    const STATS: CarStats = CarStats {
        engine: 5,
        tires: 10,
        boost: 5,
        weight: 5,
    };

    /// Four locations on the corners of a 300 x 400 rectangle (distance scale 100 -> km):
    /// L0 (0, 0), L1 (300, 0), L2 (300, 400), L3 (0, 400).
    /// Car 0 drives L0 -> ... -> L2, car 1 drives L1 -> ... -> L3.
    fn two_car_race(stats_1: CarStats) -> Race {
        let corners = [(0.0, 0.0), (300.0, 0.0), (300.0, 400.0), (0.0, 400.0)];
        let locations = corners
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Location::new(i, Point::new(x, y), 25.0))
            .collect();
        let cars_list = vec![
            Car::new(0, STATS, 1, StateHandler::new(0, 2)),
            Car::new(1, stats_1, 1, StateHandler::new(1, 3)),
        ];

        let mut race = Race::from_parts(locations, cars_list, 100.0).unwrap();
        race.start();
        race
    }

    fn marks(race: &Race) -> Vec<LocationMark> {
        race.locations.iter().map(|l| l.mark).collect()
    }

    #[test]
    fn start_marks_active_car_view() {
        let race = two_car_race(STATS);

        assert_eq!(race.get_status(), RaceStatus::InProgress);
        assert_eq!(race.get_active_car(), 0);
        assert_eq!(
            marks(&race),
            vec![
                LocationMark::Visited,
                LocationMark::Pending,
                LocationMark::EndLocked,
                LocationMark::Pending
            ]
        );
    }

    #[test]
    fn accepted_visit_adds_time_and_passes_turn() {
        let mut race = two_car_race(STATS);

        let outcome = race.visit_location(0, 3);
        let report = match outcome {
            VisitOutcome::Accepted(report) => report,
            other => panic!("visit was rejected: {:?}", other),
        };

        // L0 -> L3 is 400 board units = 4km -> tires branch
        assert_relative_eq!(report.distance, 4.0);
        assert_relative_eq!(report.time_added, calc_move_time(4.0, &STATS, false));
        assert_relative_eq!(race.cars_list[0].get_time(), report.time_added);
        assert_eq!(report.car.cur_location, 3);
        assert_eq!(report.car.visited, vec![0, 3]);
        assert_eq!(report.next_active_car, 1);
        assert!(!report.race_finished);

        // marks now show the view of car 1 (start L1, end L3)
        assert_eq!(race.get_active_car(), 1);
        assert_eq!(
            marks(&race),
            vec![
                LocationMark::Pending,
                LocationMark::Visited,
                LocationMark::Pending,
                LocationMark::EndLocked
            ]
        );
    }

    #[test]
    fn long_leg_uses_engine_branch() {
        let mut race = two_car_race(STATS);
        race.visit_location(0, 3);

        // L1 -> L3 is the diagonal of 500 board units = 5km -> engine branch
        match race.visit_location(1, 0) {
            VisitOutcome::Accepted(report) => assert_relative_eq!(report.distance, 3.0),
            other => panic!("visit was rejected: {:?}", other),
        }
        race.visit_location(0, 1);
        match race.visit_location(1, 2) {
            VisitOutcome::Accepted(report) => {
                assert_relative_eq!(report.distance, 5.0);
                assert_relative_eq!(report.time_added, 5.0);
            }
            other => panic!("visit was rejected: {:?}", other),
        }
    }

    #[test]
    fn rejected_visits_leave_state_unchanged() {
        let mut race = two_car_race(STATS);
        let before = race.get_snapshot();

        let attempts = [
            (1, 3, Rejection::NotActiveCar {
                car_id: 1,
                active_car: 0,
            }),
            (0, 0, Rejection::AlreadyVisited(0)),
            (0, 2, Rejection::EndNotReachable(2)),
            (0, 9, Rejection::UnknownLocation(9)),
        ];
        for &(car_id, location_id, reason) in attempts.iter() {
            assert_eq!(
                race.visit_location(car_id, location_id),
                VisitOutcome::Rejected {
                    reason,
                    active_car: 0
                }
            );
        }

        assert_eq!(race.get_snapshot(), before);
    }

    #[test]
    fn end_opens_after_all_other_locations() {
        let mut race = two_car_race(STATS);

        assert!(race.visit_location(0, 1).is_accepted());
        assert!(race.visit_location(1, 0).is_accepted());

        // car 0 has visited L0, L1 -> L3 still open, end L2 locked
        assert!(!race.visit_location(0, 2).is_accepted());
        assert!(race.visit_location(0, 3).is_accepted());
        assert!(race.visit_location(1, 2).is_accepted());

        // car 0 has visited L0, L1, L3 -> end L2 reachable
        assert_eq!(race.locations[2].mark, LocationMark::EndReachable);
        assert!(race.locations[2].is_selectable());
        assert!(race.visit_location(0, 2).is_accepted());
        assert_eq!(race.get_status(), RaceStatus::InProgress);
        assert_eq!(race.get_winner(), None);

        let outcome = race.visit_location(1, 3);
        assert!(outcome.is_accepted());
        assert_eq!(race.get_status(), RaceStatus::Finished);
        assert!(race.get_all_finished());
    }

    #[test]
    fn faster_car_wins() {
        let slow = CarStats {
            engine: 1,
            tires: 1,
            boost: 14,
            weight: 10,
        };
        let mut race = two_car_race(slow);
        for &(car_id, location_id) in [(0, 1), (1, 0), (0, 3), (1, 2), (0, 2), (1, 3)].iter() {
            assert!(race.visit_location(car_id, location_id).is_accepted());
        }

        assert_eq!(race.get_winner(), Some(0));
        assert!(race.cars_list[0].get_time() < race.cars_list[1].get_time());
        assert_eq!(race.get_snapshot().winner, Some(0));
    }

    #[test]
    fn tie_goes_to_lowest_car_id() {
        // both routes consist of a 3km leg, a 5km diagonal and another 3km leg
        let mut race = two_car_race(STATS);
        for &(car_id, location_id) in [(0, 1), (1, 0), (0, 3), (1, 2), (0, 2), (1, 3)].iter() {
            assert!(race.visit_location(car_id, location_id).is_accepted());
        }

        assert_relative_eq!(race.cars_list[0].get_time(), race.cars_list[1].get_time());
        assert_eq!(race.get_winner(), Some(0));
    }

    #[test]
    fn finished_race_rejects_commands() {
        let mut race = two_car_race(STATS);
        for &(car_id, location_id) in [(0, 1), (1, 2), (0, 3), (1, 0), (0, 2), (1, 3)].iter() {
            race.visit_location(car_id, location_id);
        }

        assert_eq!(
            race.visit_location(0, 1),
            VisitOutcome::Rejected {
                reason: Rejection::NotInProgress(RaceStatus::Finished),
                active_car: 0
            }
        );
        assert_eq!(
            race.activate_boost(0),
            Err(Rejection::NotInProgress(RaceStatus::Finished))
        );
    }

    #[test]
    fn boost_applies_to_next_move_only() {
        let mut race = two_car_race(STATS);

        assert_eq!(race.activate_boost(1), Err(Rejection::NotActiveCar {
            car_id: 1,
            active_car: 0
        }));
        assert_eq!(race.activate_boost(0), Ok(()));
        assert_eq!(race.activate_boost(0), Err(Rejection::BoostAlreadyActive));

        // a rejected visit keeps the boost armed
        assert!(!race.visit_location(0, 2).is_accepted());
        assert!(race.cars_list[0].get_boost_active());

        match race.visit_location(0, 3) {
            VisitOutcome::Accepted(report) => {
                assert!(report.boosted);
                assert_relative_eq!(report.time_added, calc_move_time(4.0, &STATS, true));
                assert!(!report.car.boost_active);
                assert_eq!(report.car.boost_charges, 0);
            }
            other => panic!("visit was rejected: {:?}", other),
        }

        race.visit_location(1, 0);
        assert_eq!(race.activate_boost(0), Err(Rejection::NoBoostLeft));
    }

    #[test]
    fn snapshot_reports_distances_from_active_car() {
        let mut race = two_car_race(STATS);
        let snapshot = race.get_snapshot();
        let distances: Vec<f64> = snapshot
            .location_states
            .iter()
            .map(|l| l.distance_from_active)
            .collect();
        assert_relative_eq!(distances[0], 0.0);
        assert_relative_eq!(distances[1], 3.0);
        assert_relative_eq!(distances[2], 5.0);
        assert_relative_eq!(distances[3], 4.0);

        race.visit_location(0, 3);
        let snapshot = race.get_snapshot();
        assert_eq!(snapshot.active_car, 1);
        assert_relative_eq!(snapshot.location_states[1].distance_from_active, 0.0);
        assert_relative_eq!(snapshot.location_states[3].distance_from_active, 5.0);
    }

    #[test]
    fn setup_race_waits_for_start() {
        let locations = vec![
            Location::new(0, Point::new(0.0, 0.0), 1.0),
            Location::new(1, Point::new(10.0, 0.0), 1.0),
        ];
        let cars_list = vec![Car::new(0, STATS, 0, StateHandler::new(0, 1))];
        let mut race = Race::from_parts(locations, cars_list, 1.0).unwrap();

        assert_eq!(race.get_status(), RaceStatus::Setup);
        assert_eq!(
            race.visit_location(0, 1),
            VisitOutcome::Rejected {
                reason: Rejection::NotInProgress(RaceStatus::Setup),
                active_car: 0
            }
        );

        race.start();
        assert_eq!(race.locations[1].mark, LocationMark::EndReachable);
        assert!(race.visit_location(0, 1).is_accepted());
        assert_eq!(race.get_winner(), Some(0));
    }

    #[test]
    fn from_parts_validates_input() {
        let locations = || vec![Location::new(0, Point::new(0.0, 0.0), 1.0)];
        let car = || Car::new(0, STATS, 0, StateHandler::new(0, 4));

        assert!(matches!(
            Race::from_parts(locations(), vec![], 1.0),
            Err(SetupError::NoPlayers)
        ));
        assert!(matches!(
            Race::from_parts(locations(), vec![car()], 0.0),
            Err(SetupError::InvalidDistanceScale(_))
        ));
        assert!(matches!(
            Race::from_parts(locations(), vec![car()], 1.0),
            Err(SetupError::InvalidRoute {
                car_id: 0,
                location_id: 4,
                locations: 1
            })
        ));
    }

    #[test]
    fn from_parts_rejects_broken_assignments() {
        let locations = || {
            (0..4)
                .map(|i| Location::new(i, Point::new(10.0 * i as f64, 0.0), 1.0))
                .collect::<Vec<Location>>()
        };
        let car = |car_id: usize, start: usize, end: usize| {
            Car::new(car_id, STATS, 0, StateHandler::new(start, end))
        };

        assert_eq!(
            Race::from_parts(locations(), vec![car(1, 0, 2), car(0, 1, 3)], 1.0).unwrap_err(),
            SetupError::CarIdMismatch {
                index: 0,
                car_id: 1
            }
        );
        assert_eq!(
            Race::from_parts(locations(), vec![car(0, 0, 0)], 1.0).unwrap_err(),
            SetupError::StartIsEnd {
                car_id: 0,
                location_id: 0
            }
        );
        assert_eq!(
            Race::from_parts(locations(), vec![car(0, 0, 2), car(1, 0, 3)], 1.0).unwrap_err(),
            SetupError::SharedStart {
                first: 0,
                second: 1,
                location_id: 0
            }
        );
        assert_eq!(
            Race::from_parts(locations(), vec![car(0, 0, 2), car(1, 1, 2)], 1.0).unwrap_err(),
            SetupError::SharedEnd {
                first: 0,
                second: 1,
                location_id: 2
            }
        );

        // the end of one car may be the start of another one
        assert!(Race::from_parts(locations(), vec![car(0, 0, 1), car(1, 1, 0)], 1.0).is_ok());
    }

    #[test]
    fn initialized_race_honours_setup_invariants() {
        for players in 1..=6 {
            let game_pars = GamePars {
                players,
                ..GamePars::default()
            };
            let mut rng = ChaCha8Rng::seed_from_u64(players as u64);
            let race = Race::initialize(&game_pars, &mut rng).unwrap();

            assert_eq!(race.get_no_locations(), calc_no_locations(players));
            assert_eq!(race.cars_list.len(), players);
            assert_eq!(race.get_active_car(), 0);

            let starts: HashSet<usize> = race.cars_list.iter().map(|c| c.sh.get_start()).collect();
            let ends: HashSet<usize> = race.cars_list.iter().map(|c| c.sh.get_end()).collect();
            assert_eq!(starts.len(), players);
            assert_eq!(ends.len(), players);

            let board = &game_pars.board;
            for (i, a) in race.locations.iter().enumerate() {
                assert!(in_bounds(
                    &a.pos,
                    board.width,
                    board.height,
                    board.location_radius
                ));
                assert!(race.locations[i + 1..].iter().all(|b| !a.overlaps(b)));
            }

            for car in race.cars_list.iter() {
                assert_ne!(car.sh.get_start(), car.sh.get_end());
                assert_eq!(car.sh.get_cur_location(), car.sh.get_start());
                assert_eq!(car.stats.total(), game_pars.stat_budget);
                assert_relative_eq!(car.get_time(), 0.0);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_race() {
        let game_pars = GamePars {
            players: 3,
            ..GamePars::default()
        };
        let race_a = Race::initialize(&game_pars, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let race_b = Race::initialize(&game_pars, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();

        assert_eq!(race_a.get_snapshot(), race_b.get_snapshot());
    }

    #[test]
    fn no_players_is_a_setup_error() {
        let game_pars = GamePars {
            players: 0,
            ..GamePars::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            Race::initialize(&game_pars, &mut rng),
            Err(SetupError::NoPlayers)
        ));
    }
}
