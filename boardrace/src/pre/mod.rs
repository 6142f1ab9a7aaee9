pub mod game_opts;
pub mod read_game_pars;
