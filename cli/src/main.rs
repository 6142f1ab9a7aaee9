mod render;

use anyhow::Context;
use boardrace::core::handle_race::handle_race;
use boardrace::interfaces::commands::read_commands;
use boardrace::pre::game_opts::GameOpts;
use boardrace::pre::read_game_pars::{read_game_pars, GamePars};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get game options from the command line arguments
    let game_opts: GameOpts = GameOpts::parse();

    let level = if game_opts.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("boardrace={}", level).parse()?),
        )
        .init();

    // get game parameters
    let mut game_pars = if let Some(parfile_path) = &game_opts.parfile_path {
        info!("Reading game parameters from {:?}", parfile_path);
        read_game_pars(parfile_path)?
    } else {
        GamePars::default()
    };
    if let Some(players) = game_opts.players {
        game_pars.players = players;
    }
    let seed = game_opts.seed.unwrap_or_else(rand::random);

    info!(
        "Starting a race for {} players on a {}x{} board (seed {})",
        game_pars.players, game_pars.board.width, game_pars.board.height, seed
    );

    // EXECUTION -----------------------------------------------------------------------------------
    // the renderer runs in its own thread and prints every race state it receives
    let (tx, rx) = flume::unbounded();
    let renderer = thread::spawn(move || -> anyhow::Result<()> {
        for race_state in rx.iter() {
            print!("{}", render::render_race_state(&race_state)?);
        }
        Ok(())
    });

    let race_result = match &game_opts.script_path {
        Some(script_path) => {
            let fh = File::open(script_path)
                .context(format!("Failed to open command script {:?}!", script_path))?;
            handle_race(&game_pars, seed, read_commands(BufReader::new(fh)), Some(&tx))
        }
        None => {
            let stdin = io::stdin();
            let commands = read_commands(stdin.lock());
            handle_race(&game_pars, seed, commands, Some(&tx))
        }
    };

    drop(tx);
    renderer
        .join()
        .map_err(|_| anyhow::anyhow!("Renderer thread panicked!"))?
        .context("Failed to render the race state!")?;
    let race_result = race_result?;

    // POST-PROCESSING -----------------------------------------------------------------------------
    race_result.print_results()?;
    let out_path = race_result.write_results_to_file(&game_opts.output_path)?;
    info!("Results written to {}", out_path);

    Ok(())
}
