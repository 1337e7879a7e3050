//! Parsing of move lines typed by the player or read from a script.

use anyhow::{anyhow, bail, Context, Result};
use lizard_puzzle_core::{CellCoord, Direction};

const COMMENT_PREFIX: char = '#';

/// Player request to move the segment on `cell` one step in `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MoveRequest {
    pub(crate) cell: CellCoord,
    pub(crate) direction: Direction,
}

/// Parses a single `col row direction` line.
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub(crate) fn parse_line(line: &str) -> Result<Option<MoveRequest>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [column, row, direction] = tokens.as_slice() else {
        bail!("expected 'col row direction', found '{line}'");
    };

    let column = column
        .parse::<u32>()
        .with_context(|| format!("invalid column '{column}'"))?;
    let row = row
        .parse::<u32>()
        .with_context(|| format!("invalid row '{row}'"))?;
    let direction = parse_direction(direction)?;

    Ok(Some(MoveRequest {
        cell: CellCoord::new(column, row),
        direction,
    }))
}

fn parse_direction(token: &str) -> Result<Direction> {
    match token.to_ascii_lowercase().as_str() {
        "u" | "up" => Ok(Direction::Up),
        "d" | "down" => Ok(Direction::Down),
        "l" | "left" => Ok(Direction::Left),
        "r" | "right" => Ok(Direction::Right),
        _ => Err(anyhow!("unknown direction '{token}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_directions() {
        let request = parse_line("3 4 left").expect("valid line").expect("request");
        assert_eq!(request.cell, CellCoord::new(3, 4));
        assert_eq!(request.direction, Direction::Left);

        let request = parse_line("  0 1 U ").expect("valid line").expect("request");
        assert_eq!(request.direction, Direction::Up);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        assert_eq!(parse_line("").expect("blank"), None);
        assert_eq!(parse_line("   ").expect("blank"), None);
        assert_eq!(parse_line("# warm-up").expect("comment"), None);
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["1 2", "1 2 up now", "a 2 up", "1 -2 up", "1 2 sideways"] {
            assert!(parse_line(line).is_err(), "{line:?} should be rejected");
        }
    }
}
