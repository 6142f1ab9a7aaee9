use crate::core::race::{Race, RaceStatus, VisitOutcome};
use crate::interfaces::commands::PlayerCommand;
use crate::interfaces::view_interface::RaceState;
use crate::post::race_result::RaceResult;
use crate::pre::read_game_pars::GamePars;
use anyhow::Context;
use flume::Sender;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

/// handle_race creates a race on the basis of the inserted parameters and seed, plays the given
/// commands (always for the active car) until the race is finished, the commands run out or a
/// quit command arrives, and returns the results for post-processing. If a sender is inserted, the
/// race state is sent after setup and after every accepted command.
pub fn handle_race<I>(
    game_pars: &GamePars,
    seed: u64,
    commands: I,
    tx: Option<&Sender<RaceState>>,
) -> anyhow::Result<RaceResult>
where
    I: IntoIterator<Item = PlayerCommand>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut race = Race::initialize(game_pars, &mut rng).context("Failed to set up the race!")?;

    info!(
        "Race set up with {} players on {} locations (seed {})",
        game_pars.players,
        race.get_no_locations(),
        seed
    );
    send_race_state(&race, tx)?;

    for cmd in commands {
        let car_id = race.get_active_car();

        match cmd {
            PlayerCommand::Visit(location_id) => match race.visit_location(car_id, location_id) {
                VisitOutcome::Accepted(report) => {
                    info!(
                        "Car {} drove to location {} ({:.1}km, +{:.2}h, total {:.2}h)",
                        report.car_id, report.to, report.distance, report.time_added, report.car.time
                    );
                    send_race_state(&race, tx)?;
                }
                VisitOutcome::Rejected { reason, .. } => {
                    warn!("Car {} cannot drive to location {}: {}", car_id, location_id, reason)
                }
            },
            PlayerCommand::Boost => match race.activate_boost(car_id) {
                Ok(()) => {
                    info!("Car {} activated its boost", car_id);
                    send_race_state(&race, tx)?;
                }
                Err(reason) => warn!("Car {} cannot boost: {}", car_id, reason),
            },
            PlayerCommand::Quit => {
                info!("Race aborted by the players");
                break;
            }
        }

        if race.get_status() == RaceStatus::Finished {
            break;
        }
    }

    if race.get_status() != RaceStatus::Finished {
        warn!("Race ended before every car reached its end location");
    }

    Ok(race.get_race_result(seed))
}

fn send_race_state(race: &Race, tx: Option<&Sender<RaceState>>) -> anyhow::Result<()> {
    if let Some(tx) = tx {
        let race_state = RaceState::new(race.get_snapshot())?;
        tx.send(race_state)
            .context("Failed to send race state to the presentation layer!")?;
    }
    Ok(())
}
