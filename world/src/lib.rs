#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the lizard puzzle.

mod grid;
mod lizard;
mod moves;

use log::{debug, info, warn};
use lizard_puzzle_core::{BodyEnd, CellCoord, Command, Direction, Event, LizardId};

use crate::grid::Grid;
pub use crate::lizard::{BodySegment, Lizard};

/// Represents the authoritative lizard puzzle state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    lizards: Vec<Lizard>,
    next_lizard_id: u32,
}

impl World {
    /// Creates a world without any cells; a level is expected to reset the grid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimensions(0, 0)
    }

    /// Creates a world whose grid holds `columns` × `rows` empty cells.
    #[must_use]
    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        Self {
            grid: Grid::new(columns, rows),
            lizards: Vec::new(),
            next_lizard_id: 0,
        }
    }

    fn lizard_index(&self, lizard: LizardId) -> Option<usize> {
        self.lizards.iter().position(|candidate| candidate.id() == lizard)
    }

    fn reset_grid(&mut self, columns: u32, rows: u32, out_events: &mut Vec<Event>) {
        let discarded = self.lizards.len();
        self.grid = Grid::new(columns, rows);
        self.lizards.clear();
        info!("grid reset to {columns}x{rows}, {discarded} lizard(s) discarded");

        out_events.push(Event::GridReset { columns, rows });
        if discarded > 0 {
            out_events.push(Event::LizardCountChanged { count: 0 });
        }
    }

    fn add_lizard(&mut self, segments: Vec<CellCoord>, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.grid.check_body(&segments) {
            warn!("lizard rejected ({reason:?}): {segments:?}");
            out_events.push(Event::LizardRejected { segments, reason });
            return;
        }

        let id = LizardId::new(self.next_lizard_id);
        self.next_lizard_id = self.next_lizard_id.saturating_add(1);
        for &cell in &segments {
            self.grid.occupy(id, cell);
        }
        self.lizards.push(Lizard::new(id, &segments));

        out_events.push(Event::LizardAdded {
            lizard: id,
            segments,
        });
        out_events.push(Event::LizardCountChanged {
            count: self.lizards.len(),
        });
    }

    fn remove_lizard(&mut self, lizard: LizardId, out_events: &mut Vec<Event>) {
        let Some(index) = self.lizard_index(lizard) else {
            debug!("no lizard {} to remove", lizard.get());
            return;
        };

        let removed = self.lizards.remove(index);
        for segment in removed.segments() {
            self.grid.vacate(segment.cell());
        }

        out_events.push(Event::LizardRemoved { lizard });
        out_events.push(Event::LizardCountChanged {
            count: self.lizards.len(),
        });
    }

    fn move_lizard(&mut self, cell: CellCoord, direction: Direction, out_events: &mut Vec<Event>) {
        if !self.grid.contains(cell) {
            debug!("move {direction:?} from {cell:?} ignored: outside grid");
            return;
        }

        let Some(lizard_id) = self.grid.occupant(cell) else {
            debug!("move {direction:?} from {cell:?} ignored: no lizard");
            return;
        };
        let Some(index) = self.lizard_index(lizard_id) else {
            return;
        };

        let plan = match moves::resolve(&self.grid, &self.lizards[index], cell, direction) {
            Ok(plan) => plan,
            Err(rejection) => {
                debug!("move {direction:?} from {cell:?} ignored: {rejection:?}");
                return;
            }
        };

        let lizard = &mut self.lizards[index];
        let vacated = match plan.leading {
            BodyEnd::Head => lizard.advance_head(plan.destination),
            BodyEnd::Tail => lizard.advance_tail(plan.destination),
        };
        let Some(vacated) = vacated else {
            return;
        };
        self.grid.vacate(vacated);
        self.grid.occupy(lizard_id, plan.destination);

        out_events.push(Event::LizardMoved {
            lizard: lizard_id,
            leading: plan.leading,
            vacated,
            entered: plan.destination,
        });

        if let Some(exit) = self.grid.exit_at(plan.destination) {
            out_events.push(Event::LizardExited {
                lizard: lizard_id,
                exit: exit.cell(),
            });
            self.remove_lizard(lizard_id, out_events);

            if self.lizards.is_empty() {
                info!("last lizard left through {:?}", exit.cell());
                out_events.push(Event::PuzzleSolved);
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResetGrid { columns, rows } => world.reset_grid(columns, rows, out_events),
        Command::PlaceWall { wall } => match world.grid.place_wall(wall) {
            Ok(()) => out_events.push(Event::WallPlaced { cell: wall.cell() }),
            Err(reason) => {
                warn!("wall at {:?} rejected: {reason:?}", wall.cell());
                out_events.push(Event::WallRejected {
                    cell: wall.cell(),
                    reason,
                });
            }
        },
        Command::PlaceExit { exit } => match world.grid.place_exit(exit) {
            Ok(()) => out_events.push(Event::ExitPlaced { cell: exit.cell() }),
            Err(reason) => {
                warn!("exit at {:?} rejected: {reason:?}", exit.cell());
                out_events.push(Event::ExitRejected {
                    cell: exit.cell(),
                    reason,
                });
            }
        },
        Command::AddLizard { segments } => world.add_lizard(segments, out_events),
        Command::RemoveLizard { lizard } => world.remove_lizard(lizard, out_events),
        Command::MoveLizard { cell, direction } => world.move_lizard(cell, direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lizard_puzzle_core::{CellCoord, CellSnapshot, Direction, LizardId};

    use super::{Lizard, World};

    /// Number of columns and rows in the grid.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Captures the cell at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn cell(world: &World, coord: CellCoord) -> Option<CellSnapshot> {
        world.grid.cell(coord).map(|cell| cell.snapshot())
    }

    /// Captures the cell one step away from `coord` in `direction`.
    ///
    /// `coord` itself need not lie inside the grid.
    #[must_use]
    pub fn adjacent_cell(
        world: &World,
        coord: CellCoord,
        direction: Direction,
    ) -> Option<CellSnapshot> {
        coord
            .neighbor(direction)
            .and_then(|neighbor| cell(world, neighbor))
    }

    /// Reports whether a lizard could move into `coord`.
    #[must_use]
    pub fn is_available(world: &World, coord: CellCoord) -> bool {
        world.grid.is_available(coord)
    }

    /// Lizards still on the grid, in the order they were added.
    #[must_use]
    pub fn lizards(world: &World) -> &[Lizard] {
        &world.lizards
    }

    /// Looks up a lizard by identifier.
    #[must_use]
    pub fn lizard(world: &World, id: LizardId) -> Option<&Lizard> {
        world.lizards.iter().find(|lizard| lizard.id() == id)
    }

    /// Lizard whose body covers `coord`, if any.
    #[must_use]
    pub fn lizard_at(world: &World, coord: CellCoord) -> Option<&Lizard> {
        world
            .grid
            .occupant(coord)
            .and_then(|id| lizard(world, id))
    }
}

#[cfg(test)]
mod tests {
    use lizard_puzzle_core::{Exit, PlacementError, Wall};

    use super::*;

    fn body(cells: &[(u32, u32)]) -> Vec<CellCoord> {
        cells
            .iter()
            .map(|&(column, row)| CellCoord::new(column, row))
            .collect()
    }

    #[test]
    fn reset_grid_discards_lizards_and_markers() {
        let mut world = World::with_dimensions(3, 3);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceWall {
                wall: Wall::at(CellCoord::new(0, 0)),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::AddLizard {
                segments: body(&[(1, 1), (2, 1)]),
            },
            &mut events,
        );

        events.clear();
        apply(
            &mut world,
            Command::ResetGrid {
                columns: 5,
                rows: 4,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::GridReset {
                    columns: 5,
                    rows: 4
                },
                Event::LizardCountChanged { count: 0 },
            ]
        );
        assert_eq!(query::dimensions(&world), (5, 4));
        assert!(query::lizards(&world).is_empty());
        assert!(query::is_available(&world, CellCoord::new(0, 0)));
        assert!(query::is_available(&world, CellCoord::new(1, 1)));
    }

    #[test]
    fn reset_of_empty_world_reports_no_count_change() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ResetGrid {
                columns: 2,
                rows: 2,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::GridReset {
                columns: 2,
                rows: 2
            }]
        );
    }

    #[test]
    fn add_lizard_occupies_cells_and_reports_count() {
        let mut world = World::with_dimensions(4, 4);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AddLizard {
                segments: body(&[(0, 0), (0, 1)]),
            },
            &mut events,
        );

        let id = LizardId::new(0);
        assert_eq!(
            events,
            vec![
                Event::LizardAdded {
                    lizard: id,
                    segments: body(&[(0, 0), (0, 1)]),
                },
                Event::LizardCountChanged { count: 1 },
            ]
        );
        let cell = query::cell(&world, CellCoord::new(0, 1)).expect("cell");
        assert_eq!(cell.lizard, Some(id));
        assert_eq!(
            query::lizard_at(&world, CellCoord::new(0, 0)).map(Lizard::id),
            Some(id)
        );
    }

    #[test]
    fn add_lizard_refuses_walls() {
        let mut world = World::with_dimensions(4, 4);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceWall {
                wall: Wall::at(CellCoord::new(1, 0)),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::AddLizard {
                segments: body(&[(0, 0), (1, 0)]),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::LizardRejected {
                segments: body(&[(0, 0), (1, 0)]),
                reason: PlacementError::Walled,
            }]
        );
        assert!(query::lizards(&world).is_empty());
        assert!(query::is_available(&world, CellCoord::new(0, 0)));
    }

    #[test]
    fn walls_and_exits_outside_grid_are_rejected() {
        let mut world = World::with_dimensions(2, 2);
        let mut events = Vec::new();
        let outside = CellCoord::new(2, 0);
        apply(
            &mut world,
            Command::PlaceWall {
                wall: Wall::at(outside),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::PlaceExit {
                exit: Exit::at(outside),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::WallRejected {
                    cell: outside,
                    reason: PlacementError::OutOfBounds,
                },
                Event::ExitRejected {
                    cell: outside,
                    reason: PlacementError::OutOfBounds,
                },
            ]
        );
    }

    #[test]
    fn remove_lizard_vacates_every_cell() {
        let mut world = World::with_dimensions(4, 4);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::AddLizard {
                segments: body(&[(0, 0), (1, 0), (1, 1)]),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::RemoveLizard {
                lizard: LizardId::new(0),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::LizardRemoved {
                    lizard: LizardId::new(0)
                },
                Event::LizardCountChanged { count: 0 },
            ]
        );
        for cell in body(&[(0, 0), (1, 0), (1, 1)]) {
            assert!(query::is_available(&world, cell));
        }
    }

    #[test]
    fn removing_unknown_lizard_is_silent() {
        let mut world = World::with_dimensions(4, 4);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RemoveLizard {
                lizard: LizardId::new(12),
            },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn adjacent_cell_accepts_origin_past_the_edge() {
        let world = World::with_dimensions(3, 3);
        let past_edge = CellCoord::new(3, 1);
        let inside = query::adjacent_cell(&world, past_edge, Direction::Left).expect("cell");
        assert_eq!(inside.cell, CellCoord::new(2, 1));
        assert!(query::adjacent_cell(&world, past_edge, Direction::Right).is_none());
        assert!(query::adjacent_cell(&world, CellCoord::new(0, 0), Direction::Up).is_none());
    }
}
