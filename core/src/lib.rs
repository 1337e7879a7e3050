#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the lizard puzzle engine.
//!
//! This crate defines the message surface that connects the host application,
//! the level loader, and the authoritative world. Callers submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values that systems
//! such as the listener notifier react to. Illegal requests never fault: they
//! leave the world untouched.

use serde::{Deserialize, Serialize};

/// Message shown to the player once the last lizard has left the grid.
pub const WIN_MESSAGE: &str = "You win!";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards every cell and lizard, replacing the grid with empty cells.
    ResetGrid {
        /// Number of columns laid out in the new grid.
        columns: u32,
        /// Number of rows laid out in the new grid.
        rows: u32,
    },
    /// Attaches a wall marker to the cell it names.
    PlaceWall {
        /// Wall to attach.
        wall: Wall,
    },
    /// Attaches an exit marker to the cell it names.
    PlaceExit {
        /// Exit to attach.
        exit: Exit,
    },
    /// Introduces a new lizard whose body covers the provided cells.
    AddLizard {
        /// Cells occupied by the body, ordered from tail to head.
        segments: Vec<CellCoord>,
    },
    /// Removes a lizard from the grid, vacating every cell it covered.
    RemoveLizard {
        /// Identifier of the lizard to remove.
        lizard: LizardId,
    },
    /// Requests that the lizard covering `cell` moves one step in `direction`.
    MoveLizard {
        /// Cell holding the segment the player selected.
        cell: CellCoord,
        /// Direction requested for the selected segment.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the grid was rebuilt with the provided dimensions.
    GridReset {
        /// Number of columns in the new grid.
        columns: u32,
        /// Number of rows in the new grid.
        rows: u32,
    },
    /// Confirms that a wall now blocks a cell.
    WallPlaced {
        /// Cell holding the wall.
        cell: CellCoord,
    },
    /// Reports that a wall could not be attached.
    WallRejected {
        /// Cell named by the rejected wall.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that an exit now marks a cell.
    ExitPlaced {
        /// Cell holding the exit.
        cell: CellCoord,
    },
    /// Reports that an exit could not be attached.
    ExitRejected {
        /// Cell named by the rejected exit.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a lizard joined the grid.
    LizardAdded {
        /// Identifier allocated to the lizard by the world.
        lizard: LizardId,
        /// Cells covered by the body, ordered from tail to head.
        segments: Vec<CellCoord>,
    },
    /// Reports that a lizard could not be placed on the grid.
    LizardRejected {
        /// Cells provided in the rejected request.
        segments: Vec<CellCoord>,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a lizard shifted its whole body by one cell.
    LizardMoved {
        /// Identifier of the lizard that moved.
        lizard: LizardId,
        /// End of the body that led the shift.
        leading: BodyEnd,
        /// Cell released by the trailing end.
        vacated: CellCoord,
        /// Cell newly covered by the leading end.
        entered: CellCoord,
    },
    /// Announces that a lizard reached an exit.
    LizardExited {
        /// Identifier of the lizard that left.
        lizard: LizardId,
        /// Cell holding the exit that was reached.
        exit: CellCoord,
    },
    /// Confirms that a lizard no longer occupies the grid.
    LizardRemoved {
        /// Identifier of the removed lizard.
        lizard: LizardId,
    },
    /// Reports the number of lizards still on the grid after it changed.
    LizardCountChanged {
        /// Live lizard count.
        count: usize,
    },
    /// Announces that the final lizard left through an exit.
    PuzzleSolved,
}

/// End of a lizard body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyEnd {
    /// Last segment of the body.
    Head,
    /// First segment of the body.
    Tail,
}

/// Cardinal grid directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Unique identifier assigned to a lizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LizardId(u32);

impl LizardId {
    /// Creates a new lizard identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Returns the coordinate one step away in `direction`.
    ///
    /// Steps that would leave the non-negative quadrant yield `None`; the
    /// upper grid bounds are the grid's concern.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::Up => (Some(self.column), self.row.checked_sub(1)),
            Direction::Down => (Some(self.column), self.row.checked_add(1)),
            Direction::Left => (self.column.checked_sub(1), Some(self.row)),
            Direction::Right => (self.column.checked_add(1), Some(self.row)),
        };
        Some(CellCoord::new(column?, row?))
    }

    /// Direction leading from this cell to `other`, if the two cells are
    /// grid-adjacent.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        if self.manhattan_distance(other) != 1 {
            return None;
        }

        if other.row() > self.row() {
            Some(Direction::Down)
        } else if other.row() < self.row() {
            Some(Direction::Up)
        } else if other.column() > self.column() {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    }
}

/// Marker that blocks a cell for every lizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    cell: CellCoord,
}

impl Wall {
    /// Creates a wall attached to the provided cell.
    #[must_use]
    pub const fn at(cell: CellCoord) -> Self {
        Self { cell }
    }

    /// Cell the wall is attached to.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }
}

/// Marker that removes any lizard stepping onto its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exit {
    cell: CellCoord,
}

impl Exit {
    /// Creates an exit attached to the provided cell.
    #[must_use]
    pub const fn at(cell: CellCoord) -> Self {
        Self { cell }
    }

    /// Cell the exit is attached to.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }
}

/// Reasons a wall, exit, or lizard placement may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// The requested cell holds a wall.
    Walled,
    /// The requested cell is covered by a lizard segment.
    Occupied,
    /// Two consecutive body cells are not grid-adjacent.
    Detached,
    /// The lizard body contains no segments.
    Empty,
}

/// Immutable representation of a single cell used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Location of the cell.
    pub cell: CellCoord,
    /// Wall attached to the cell, if any.
    pub wall: Option<Wall>,
    /// Exit attached to the cell, if any.
    pub exit: Option<Exit>,
    /// Lizard whose body covers the cell, if any.
    pub lizard: Option<LizardId>,
}

impl CellSnapshot {
    /// Reports whether a lizard could move into the cell.
    ///
    /// Exit cells stay available; walls and lizard segments do not.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.wall.is_none() && self.lizard.is_none()
    }
}

/// Immutable representation of a single lizard used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LizardSnapshot {
    /// Identifier allocated to the lizard by the world.
    pub id: LizardId,
    /// Cells covered by the body, ordered from tail to head.
    pub segments: Vec<CellCoord>,
}

/// Host-side collaborator that presents dialog messages to the player.
pub trait ShowDialogListener {
    /// Displays `message` to the player.
    fn show_dialog(&mut self, message: &str);
}

/// Host-side collaborator that tracks the number of lizards left.
pub trait ScoreUpdateListener {
    /// Records the live lizard count.
    fn update_score(&mut self, count: usize);
}

impl<F> ShowDialogListener for F
where
    F: FnMut(&str),
{
    fn show_dialog(&mut self, message: &str) {
        self(message);
    }
}

impl<F> ScoreUpdateListener for F
where
    F: FnMut(usize),
{
    fn update_score(&mut self, count: usize) {
        self(count);
    }
}
