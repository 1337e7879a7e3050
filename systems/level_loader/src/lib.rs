#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loader for plain-text puzzle levels.
//!
//! A level file starts with a `WIDTHxHEIGHT` header, followed by one layout
//! line per grid row where `W` marks a wall and `E` marks an exit. Every later
//! line whose first token is `L` describes one lizard as whitespace-separated
//! `col,row` pairs listed from tail to head:
//!
//! ```text
//! 4x3
//! W..E
//! ....
//! ....
//! L 0,1 1,1 2,1
//! ```
//!
//! Levels are parsed and validated in full before any command reaches the
//! world, so a failed load never leaves a half-built puzzle behind.

use std::{fs, path::Path, path::PathBuf, str::FromStr};

use log::info;
use lizard_puzzle_core::{CellCoord, Command, Event, Exit, PlacementError, Wall};
use lizard_puzzle_world::{self as world, World};
use thiserror::Error;

/// Token that introduces a lizard line.
const LIZARD_TOKEN: &str = "L";
const WALL_SYMBOL: char = 'W';
const EXIT_SYMBOL: char = 'E';

/// Errors that can occur while reading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("could not read level file {}", .path.display())]
    Io {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The level contained no header line.
    #[error("level is missing the grid dimensions")]
    MissingDimensions,
    /// The header line could not be parsed as `WIDTHxHEIGHT`.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The level ended before every layout row was read.
    #[error("layout row {row} is missing")]
    MissingRow {
        /// Zero-based index of the missing row.
        row: u32,
    },
    /// A layout row was narrower than the grid.
    #[error("layout row {row} holds {found} cells, expected {expected}")]
    ShortRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Grid width declared by the header.
        expected: u32,
        /// Number of characters present on the row.
        found: usize,
    },
    /// A lizard line held a token that is not a `col,row` pair.
    #[error("line {line}: could not parse segment '{token}'")]
    InvalidSegment {
        /// One-based line number.
        line: usize,
        /// Token that failed to parse.
        token: String,
    },
    /// A lizard line listed no segments.
    #[error("line {line}: lizard has no segments")]
    EmptyLizard {
        /// One-based line number.
        line: usize,
    },
    /// A lizard could not be laid on the grid.
    #[error("line {line}: lizard cannot be placed ({reason:?})")]
    InvalidLizard {
        /// One-based line number.
        line: usize,
        /// Reason the world refused the body.
        reason: PlacementError,
    },
}

/// Parsed and validated puzzle level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    columns: u32,
    rows: u32,
    walls: Vec<CellCoord>,
    exits: Vec<CellCoord>,
    lizards: Vec<LevelLizard>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct LevelLizard {
    line: usize,
    segments: Vec<CellCoord>,
}

impl Level {
    /// Parses and validates a level description.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut lines = text.lines().enumerate();

        let (_, header) = lines.next().ok_or(LevelError::MissingDimensions)?;
        let (columns, rows) = parse_dimensions(header)?;

        let mut walls = Vec::new();
        let mut exits = Vec::new();
        for row in 0..rows {
            let (_, layout) = lines.next().ok_or(LevelError::MissingRow { row })?;
            let found = layout.chars().count();
            if found < usize::try_from(columns).unwrap_or(usize::MAX) {
                return Err(LevelError::ShortRow {
                    row,
                    expected: columns,
                    found,
                });
            }

            for (column, symbol) in (0..columns).zip(layout.chars()) {
                match symbol {
                    WALL_SYMBOL => walls.push(CellCoord::new(column, row)),
                    EXIT_SYMBOL => exits.push(CellCoord::new(column, row)),
                    _ => {}
                }
            }
        }

        let mut lizards = Vec::new();
        for (index, content) in lines {
            let line = index + 1;
            let mut tokens = content.split_whitespace();
            if tokens.next() != Some(LIZARD_TOKEN) {
                continue;
            }

            let segments = tokens
                .map(|token| {
                    parse_segment(token).ok_or_else(|| LevelError::InvalidSegment {
                        line,
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if segments.is_empty() {
                return Err(LevelError::EmptyLizard { line });
            }
            lizards.push(LevelLizard { line, segments });
        }

        let level = Self {
            columns,
            rows,
            walls,
            exits,
            lizards,
        };
        level.validate()?;
        Ok(level)
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cells holding walls, in reading order.
    #[must_use]
    pub fn walls(&self) -> &[CellCoord] {
        &self.walls
    }

    /// Cells holding exits, in reading order.
    #[must_use]
    pub fn exits(&self) -> &[CellCoord] {
        &self.exits
    }

    /// Lizard bodies in file order, each listed from tail to head.
    pub fn lizards(&self) -> impl Iterator<Item = &[CellCoord]> + '_ {
        self.lizards.iter().map(|lizard| lizard.segments.as_slice())
    }

    /// Command batch that rebuilds the world as described by the level.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = self.layout_commands();
        commands.extend(self.lizards.iter().map(|lizard| Command::AddLizard {
            segments: lizard.segments.clone(),
        }));
        commands
    }

    fn layout_commands(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(1 + self.walls.len() + self.exits.len());
        commands.push(Command::ResetGrid {
            columns: self.columns,
            rows: self.rows,
        });
        commands.extend(self.walls.iter().map(|&cell| Command::PlaceWall {
            wall: Wall::at(cell),
        }));
        commands.extend(self.exits.iter().map(|&cell| Command::PlaceExit {
            exit: Exit::at(cell),
        }));
        commands
    }

    /// Replays the level on a scratch world so that every body the world
    /// would refuse is reported against its line.
    fn validate(&self) -> Result<(), LevelError> {
        let mut scratch = World::new();
        let mut events = Vec::new();
        for command in self.layout_commands() {
            world::apply(&mut scratch, command, &mut events);
        }

        for lizard in &self.lizards {
            events.clear();
            world::apply(
                &mut scratch,
                Command::AddLizard {
                    segments: lizard.segments.clone(),
                },
                &mut events,
            );
            let rejection = events.iter().find_map(|event| match event {
                Event::LizardRejected { reason, .. } => Some(*reason),
                _ => None,
            });
            if let Some(reason) = rejection {
                return Err(LevelError::InvalidLizard {
                    line: lizard.line,
                    reason,
                });
            }
        }

        Ok(())
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

/// Rebuilds `world` from an already validated level.
pub fn load(level: &Level, world: &mut World, out_events: &mut Vec<Event>) {
    for command in level.commands() {
        world::apply(world, command, out_events);
    }
    info!(
        "loaded {}x{} level with {} lizard(s)",
        level.columns,
        level.rows,
        level.lizards.len()
    );
}

/// Parses `text` and loads it into `world`.
///
/// On error the world is left exactly as it was.
pub fn load_str(text: &str, world: &mut World, out_events: &mut Vec<Event>) -> Result<(), LevelError> {
    let level = Level::parse(text)?;
    load(&level, world, out_events);
    Ok(())
}

/// Reads the level file at `path` and loads it into `world`.
///
/// On error the world is left exactly as it was.
pub fn load_file(
    path: impl AsRef<Path>,
    world: &mut World,
    out_events: &mut Vec<Event>,
) -> Result<(), LevelError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&text, world, out_events)
}

fn parse_dimensions(header: &str) -> Result<(u32, u32), LevelError> {
    let (columns, rows) = header
        .split_once(['x', 'X'])
        .ok_or_else(|| LevelError::InvalidDimensions(header.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| LevelError::InvalidDimensions(header.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| LevelError::InvalidDimensions(header.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(LevelError::InvalidDimensions(header.to_owned()));
    }

    Ok((columns, rows))
}

fn parse_segment(token: &str) -> Option<CellCoord> {
    let (column, row) = token.split_once(',')?;
    let column = column.trim().parse().ok()?;
    let row = row.trim().parse().ok()?;
    Some(CellCoord::new(column, row))
}
