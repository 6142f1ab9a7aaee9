use crate::core::car::CarStats;
use crate::core::geometry::Point;
use crate::core::location::LocationMark;
use crate::core::race::RaceStatus;
use anyhow::Context;

/// Colors of the cars, repeated for more than five cars.
pub const CAR_COLORS: [&str; 5] = ["red", "blue", "black", "yellow", "orange"];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// car_color returns the display color of the car with the given id.
pub fn car_color(car_id: usize) -> anyhow::Result<RgbColor> {
    let name = CAR_COLORS[car_id % CAR_COLORS.len()];
    let tmp_color = name
        .parse::<css_color_parser::Color>()
        .context(format!("Could not parse car color {}!", name))?;

    Ok(RgbColor {
        r: tmp_color.r,
        g: tmp_color.g,
        b: tmp_color.b,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarState {
    pub car_id: usize,
    pub stats: CarStats,
    pub time: f64,
    pub cur_location: usize,
    pub start: usize,
    pub end: usize,
    pub visited: Vec<usize>,
    pub boost_active: bool,
    pub boost_charges: u32,
}

/// * `distance_from_active` - (km) Distance from the current location of the active car
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    pub location_id: usize,
    pub name: String,
    pub pos: Point,
    pub radius: f64,
    pub mark: LocationMark,
    pub distance_from_active: f64,
}

/// RaceSnapshot is a read-only copy of the engine state for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSnapshot {
    pub status: RaceStatus,
    pub active_car: usize,
    pub car_states: Vec<CarState>,
    pub location_states: Vec<LocationState>,
    pub winner: Option<usize>,
}

/// RaceState is sent to the presentation layer after every accepted command.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceState {
    pub snapshot: RaceSnapshot,
    pub car_colors: Vec<RgbColor>,
}

impl RaceState {
    pub fn new(snapshot: RaceSnapshot) -> anyhow::Result<RaceState> {
        let car_colors = snapshot
            .car_states
            .iter()
            .map(|car_state| car_color(car_state.car_id))
            .collect::<anyhow::Result<Vec<RgbColor>>>()?;

        Ok(RaceState {
            snapshot,
            car_colors,
        })
    }
}
