use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "BOARDRACE",
    about = "A turn-based board racing game written in Rust"
)]
pub struct GameOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging (placement and every move)
    #[clap(short, long)]
    pub debug: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set number of players (overrides the value of the parameter file)
    #[clap(short = 'n', long)]
    pub players: Option<usize>,

    /// Set seed of the random number generator (OPTIONAL: random seed if not set)
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Set path to the game parameter file (OPTIONAL: if not set, uses the default board)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set path to a file with one command per line (OPTIONAL: if not set, reads from stdin)
    #[clap(short = 'c', long)]
    pub script_path: Option<PathBuf>,

    /// Set path of the CSV result file
    #[clap(short, long, default_value = "output/last_run.csv")]
    pub output_path: PathBuf,
}
