//! Dense cell arena addressed by grid index.

use lizard_puzzle_core::{
    CellCoord, CellSnapshot, Direction, Exit, LizardId, PlacementError, Wall,
};

/// Single grid location together with its markers and occupant.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cell {
    coord: CellCoord,
    wall: Option<Wall>,
    exit: Option<Exit>,
    occupant: Option<LizardId>,
}

impl Cell {
    const fn empty(coord: CellCoord) -> Self {
        Self {
            coord,
            wall: None,
            exit: None,
            occupant: None,
        }
    }

    pub(crate) const fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            cell: self.coord,
            wall: self.wall,
            exit: self.exit,
            lizard: self.occupant,
        }
    }
}

/// Owns every cell of the puzzle, stored row-major.
///
/// Lizard segments refer to cells by coordinate only, and each cell records
/// the lizard covering it, so no reference cycle exists between the two.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::empty(CellCoord::new(column, row)));
            }
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    pub(crate) const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub(crate) fn contains(&self, coord: CellCoord) -> bool {
        coord.column() < self.columns && coord.row() < self.rows
    }

    pub(crate) fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Neighbour of `coord` in `direction`, provided it lies inside the grid.
    pub(crate) fn adjacent(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        coord
            .neighbor(direction)
            .filter(|neighbor| self.contains(*neighbor))
    }

    /// Out-of-bounds cells, walls and lizard segments are unavailable; exits are not.
    pub(crate) fn is_available(&self, coord: CellCoord) -> bool {
        self.cell(coord)
            .is_some_and(|cell| cell.wall.is_none() && cell.occupant.is_none())
    }

    pub(crate) fn occupant(&self, coord: CellCoord) -> Option<LizardId> {
        self.cell(coord).and_then(|cell| cell.occupant)
    }

    pub(crate) fn exit_at(&self, coord: CellCoord) -> Option<Exit> {
        self.cell(coord).and_then(|cell| cell.exit)
    }

    pub(crate) fn place_wall(&mut self, wall: Wall) -> Result<(), PlacementError> {
        let cell = self
            .cell_mut(wall.cell())
            .ok_or(PlacementError::OutOfBounds)?;
        if cell.occupant.is_some() {
            return Err(PlacementError::Occupied);
        }
        cell.wall = Some(wall);
        Ok(())
    }

    pub(crate) fn place_exit(&mut self, exit: Exit) -> Result<(), PlacementError> {
        let cell = self
            .cell_mut(exit.cell())
            .ok_or(PlacementError::OutOfBounds)?;
        cell.exit = Some(exit);
        Ok(())
    }

    /// Checks that `body` could be laid on the grid as a single lizard.
    pub(crate) fn check_body(&self, body: &[CellCoord]) -> Result<(), PlacementError> {
        if body.is_empty() {
            return Err(PlacementError::Empty);
        }

        for (index, &coord) in body.iter().enumerate() {
            let cell = self.cell(coord).ok_or(PlacementError::OutOfBounds)?;
            if cell.wall.is_some() {
                return Err(PlacementError::Walled);
            }
            if cell.occupant.is_some() || body[..index].contains(&coord) {
                return Err(PlacementError::Occupied);
            }
            if index > 0 && body[index - 1].manhattan_distance(coord) != 1 {
                return Err(PlacementError::Detached);
            }
        }

        Ok(())
    }

    pub(crate) fn occupy(&mut self, lizard: LizardId, coord: CellCoord) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.occupant = Some(lizard);
        }
    }

    pub(crate) fn vacate(&mut self, coord: CellCoord) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.occupant = None;
        }
    }

    fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.index(coord).and_then(|index| self.cells.get_mut(index))
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
