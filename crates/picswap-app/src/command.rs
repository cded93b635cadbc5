//! Commands typed at the `picswap` prompt.

use std::str::FromStr;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Swap the tiles at two positions.
    Swap(usize, usize),
    /// Print the board.
    Show,
    /// Report whether the tile at a position is home.
    Check(usize),
    /// Load a fresh image and start over.
    New,
    /// Print the current puzzle's seed.
    Seed,
    /// Write the board and tiles to the export directory.
    Export,
    /// Print the command list.
    Help,
    /// Leave the game.
    Quit,
}

pub const HELP: &str = "\
commands:
  swap A B   swap the tiles at positions A and B (or just `A B`)
  show       print the board
  check N    tell whether the tile at position N is home
  new        load a new image and shuffle again
  seed       print the seed that replays this shuffle
  export     write the board and tiles as PNG files
  help       print this list
  quit       leave";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseCommandError {
    #[display("empty command")]
    Empty,
    #[display("unknown command `{_0}`, type `help` for the list")]
    Unknown(#[error(not(source))] String),
    #[display("`{command}` needs {expected} position(s)")]
    ArgumentCount {
        command: &'static str,
        expected: usize,
    },
    #[display("`{_0}` is not a position")]
    InvalidPosition(#[error(not(source))] String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        // A bare pair of numbers is shorthand for `swap`.
        if head.bytes().all(|b| b.is_ascii_digit()) {
            let mut args = vec![head];
            args.extend(rest);
            let [first, second] = positions::<2>("swap", &args)?;
            return Ok(Self::Swap(first, second));
        }

        let command = match head.to_ascii_lowercase().as_str() {
            "swap" | "s" => {
                let [first, second] = positions::<2>("swap", &rest)?;
                Self::Swap(first, second)
            }
            "check" | "c" => {
                let [position] = positions::<1>("check", &rest)?;
                Self::Check(position)
            }
            "show" | "board" | "b" => no_arguments(Self::Show, "show", &rest)?,
            "new" | "n" => no_arguments(Self::New, "new", &rest)?,
            "seed" => no_arguments(Self::Seed, "seed", &rest)?,
            "export" | "e" => no_arguments(Self::Export, "export", &rest)?,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(head.to_owned())),
        };
        Ok(command)
    }
}

fn positions<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[usize; N], ParseCommandError> {
    if args.len() != N {
        return Err(ParseCommandError::ArgumentCount {
            command,
            expected: N,
        });
    }
    let mut parsed = [0; N];
    for (slot, arg) in parsed.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|_| ParseCommandError::InvalidPosition((*arg).to_owned()))?;
    }
    Ok(parsed)
}

fn no_arguments(
    command: Command,
    name: &'static str,
    args: &[&str],
) -> Result<Command, ParseCommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ParseCommandError::ArgumentCount {
            command: name,
            expected: 0,
        })
    }
}
