//! Parsing of player input lines.
use game_core::{Position, UnitId};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    /// `x y` or `x,y`: click a map tile.
    Click(Position),
    /// `u <id>`: select a unit directly.
    Select(UnitId),
    Refresh,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (type `h` for help)")]
    Unknown(String),

    #[error("`{0}` is not a coordinate")]
    BadCoordinate(String),

    #[error("`{0}` is not a unit id")]
    BadUnitId(String),
}

pub const HELP: &str = "\
commands:
  x y      click tile (x, y)
  u <id>   select unit <id>
  r        refresh from the ledger
  s        show map and status
  h        this help
  q        quit";

/// `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<InputCommand>, InputError> {
    let normalized = line.trim().replace(',', " ");
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let command = match words.as_slice() {
        [] => return Ok(None),
        ["q" | "quit" | "exit"] => InputCommand::Quit,
        ["r" | "refresh"] => InputCommand::Refresh,
        ["s" | "status"] => InputCommand::Status,
        ["h" | "help" | "?"] => InputCommand::Help,
        ["u" | "unit", id] => {
            let id = id
                .trim_start_matches('#')
                .parse()
                .map_err(|_| InputError::BadUnitId((*id).to_string()))?;
            InputCommand::Select(UnitId(id))
        }
        [x, y] => InputCommand::Click(Position::new(coordinate(x)?, coordinate(y)?)),
        _ => return Err(InputError::Unknown(line.trim().to_string())),
    };

    Ok(Some(command))
}

fn coordinate(word: &str) -> Result<i32, InputError> {
    word.parse()
        .map_err(|_| InputError::BadCoordinate(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_accept_space_or_comma() {
        let expected = Some(InputCommand::Click(Position::new(3, -1)));
        assert_eq!(parse_line("3 -1"), Ok(expected));
        assert_eq!(parse_line(" 3,-1 "), Ok(expected));
    }

    #[test]
    fn keywords() {
        assert_eq!(parse_line("q"), Ok(Some(InputCommand::Quit)));
        assert_eq!(parse_line("refresh"), Ok(Some(InputCommand::Refresh)));
        assert_eq!(parse_line("s"), Ok(Some(InputCommand::Status)));
        assert_eq!(parse_line("u #4"), Ok(Some(InputCommand::Select(UnitId(4)))));
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn malformed_input_is_reported() {
        assert_eq!(
            parse_line("3 north"),
            Err(InputError::BadCoordinate("north".into()))
        );
        assert_eq!(parse_line("u x"), Err(InputError::BadUnitId("x".into())));
        assert!(matches!(parse_line("fly away now"), Err(InputError::Unknown(_))));
    }
}
