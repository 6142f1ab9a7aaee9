use std::error::Error;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use tracing::warn;

/// Commands a player can give on its turn.
/// * `Visit` - drive the active car to the location with the given id
/// * `Boost` - arm the boost of the active car for its next move
/// * `Quit` - abort the race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Visit(usize),
    Boost,
    Quit,
}

/// ParseCommandError is used if a line of player input cannot be interpreted as a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid command '{}'", self.0)
    }
}

impl Error for ParseCommandError {}

impl FromStr for PlayerCommand {
    type Err = ParseCommandError;

    /// Accepted forms: `3`, `v 3`, `visit 3`, `b`, `boost`, `q`, `quit` (case insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let mut tokens = lower.split_whitespace();
        let err = || ParseCommandError(s.trim().to_owned());

        let cmd = match (tokens.next(), tokens.next()) {
            (Some("b"), None) | (Some("boost"), None) => PlayerCommand::Boost,
            (Some("q"), None) | (Some("quit"), None) => PlayerCommand::Quit,
            (Some("v"), Some(id)) | (Some("visit"), Some(id)) => {
                PlayerCommand::Visit(id.parse().map_err(|_| err())?)
            }
            (Some(id), None) => PlayerCommand::Visit(id.parse().map_err(|_| err())?),
            _ => return Err(err()),
        };

        if tokens.next().is_some() {
            return Err(err());
        }

        Ok(cmd)
    }
}

/// read_commands turns the lines of a reader into commands. Blank lines and lines starting with
/// `#` are skipped, invalid lines (including lines that are not valid UTF-8) are reported and
/// skipped. Reading stops at the first I/O error, which is reported as well.
pub fn read_commands<R: BufRead>(reader: R) -> impl Iterator<Item = PlayerCommand> {
    reader
        .split(b'\n')
        .map_while(|line| match line {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                warn!("Stopped reading commands: {}", e);
                None
            }
        })
        .filter(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .filter_map(|line| match line.parse::<PlayerCommand>() {
            Ok(cmd) => Some(cmd),
            Err(e) => {
                warn!("{}, expected a location id, 'boost' or 'quit'", e);
                None
            }
        })
}
