use thiserror::Error;

/// SetupError is returned if the game parameters do not allow setting up a race, e.g., because
/// the board is too small to hold a single location. It is raised before any race starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetupError {
    #[error("At least one player is required to start a race")]
    NoPlayers,

    #[error("{players} players cannot get unique start and end locations out of {locations} locations")]
    TooManyPlayers { players: usize, locations: usize },

    #[error("Board of {width}x{height} cannot hold locations of radius {radius}")]
    InvalidBoard { width: f64, height: f64, radius: f64 },

    #[error("Stat budget {budget} is too small, engine, tires and weight need at least 1 each")]
    StatBudgetTooSmall { budget: u32 },

    #[error("Distance scale must be positive and finite, but is {0}")]
    InvalidDistanceScale(f64),

    #[error("Route of car {car_id} references location {location_id}, but only {locations} exist")]
    InvalidRoute {
        car_id: usize,
        location_id: usize,
        locations: usize,
    },

    #[error("Car at position {index} carries id {car_id}, car ids must match their position")]
    CarIdMismatch { index: usize, car_id: usize },

    #[error("Car {car_id} starts and ends at location {location_id}")]
    StartIsEnd { car_id: usize, location_id: usize },

    #[error("Cars {first} and {second} both start at location {location_id}")]
    SharedStart {
        first: usize,
        second: usize,
        location_id: usize,
    },

    #[error("Cars {first} and {second} both end at location {location_id}")]
    SharedEnd {
        first: usize,
        second: usize,
        location_id: usize,
    },
}
