use crate::core::layout::{BoardPars, PlacementPolicy};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

/// GamePars is used to store all parameters required to set up a race. Missing entries in a
/// parameter file are filled with their defaults.
/// * `players` - Number of players (= cars)
/// * `board` - Board geometry
/// * `placement` - Handling of overlapping location candidates
/// * `stat_budget` - Sum of the four stats of every car
/// * `distance_scale` - Board units per km, used to convert board distances for the time model
/// * `boost_charges` - Number of boosts every car may use during the race
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GamePars {
    pub players: usize,
    pub board: BoardPars,
    pub placement: PlacementPolicy,
    pub stat_budget: u32,
    pub distance_scale: f64,
    pub boost_charges: u32,
}

impl Default for GamePars {
    fn default() -> Self {
        GamePars {
            players: 2,
            board: BoardPars::default(),
            placement: PlacementPolicy::default(),
            stat_budget: 26,
            distance_scale: 100.0,
            boost_charges: 1,
        }
    }
}

/// read_game_pars reads the JSON file and decodes the JSON string into the game parameters
/// struct.
pub fn read_game_pars(filepath: &Path) -> anyhow::Result<GamePars> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;
    let pars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}
