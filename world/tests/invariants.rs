use std::collections::HashSet;

use lizard_puzzle_core::{CellCoord, Command, Direction, Event, Exit, Wall};
use lizard_puzzle_world::{self as world, query, World};
use proptest::prelude::*;

const COLUMNS: u32 = 6;
const ROWS: u32 = 6;

fn seeded_world() -> World {
    let mut world = World::with_dimensions(COLUMNS, ROWS);
    let mut events = Vec::new();
    let mut commands = vec![
        Command::PlaceWall {
            wall: Wall::at(CellCoord::new(3, 3)),
        },
        Command::PlaceWall {
            wall: Wall::at(CellCoord::new(0, 5)),
        },
        Command::PlaceExit {
            exit: Exit::at(CellCoord::new(5, 0)),
        },
    ];
    for body in [
        &[(0, 0), (1, 0), (2, 0), (2, 1)][..],
        &[(5, 5), (4, 5), (4, 4)][..],
        &[(0, 2)][..],
    ] {
        commands.push(Command::AddLizard {
            segments: body
                .iter()
                .map(|&(column, row)| CellCoord::new(column, row))
                .collect(),
        });
    }
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(query::lizards(&world).len(), 3);
    world
}

fn direction_from(index: usize) -> Direction {
    Direction::ALL[index % Direction::ALL.len()]
}

fn occupancy(world: &World) -> Vec<Option<u32>> {
    let mut cells = Vec::new();
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            let cell = query::cell(world, CellCoord::new(column, row)).expect("inside grid");
            cells.push(cell.lizard.map(|id| id.get()));
        }
    }
    cells
}

fn assert_invariants(world: &World) -> Result<(), TestCaseError> {
    let mut covered = HashSet::new();
    for lizard in query::lizards(world) {
        let body = lizard.snapshot().segments;
        prop_assert!(!body.is_empty());
        for pair in body.windows(2) {
            prop_assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
        }
        for cell in body {
            prop_assert!(covered.insert(cell), "cell {:?} covered twice", cell);
            let snapshot = query::cell(world, cell).expect("segment inside grid");
            prop_assert_eq!(snapshot.lizard, Some(lizard.id()));
            prop_assert!(snapshot.wall.is_none());
        }
    }

    let occupied = occupancy(world).into_iter().flatten().count();
    prop_assert_eq!(occupied, covered.len());
    Ok(())
}

proptest! {
    #[test]
    fn reachable_states_keep_bodies_connected(
        requests in prop::collection::vec((0u32..COLUMNS + 1, 0u32..ROWS + 1, 0usize..4), 0..80)
    ) {
        let mut world = seeded_world();
        assert_invariants(&world)?;

        for (column, row, direction) in requests {
            let before_lizards: Vec<_> = query::lizards(&world)
                .iter()
                .map(|lizard| lizard.snapshot())
                .collect();
            let before_cells = occupancy(&world);

            let mut events = Vec::new();
            world::apply(
                &mut world,
                Command::MoveLizard {
                    cell: CellCoord::new(column, row),
                    direction: direction_from(direction),
                },
                &mut events,
            );

            assert_invariants(&world)?;

            let moved = events
                .iter()
                .any(|event| matches!(event, Event::LizardMoved { .. }));
            if !moved {
                prop_assert!(events.is_empty());
                let after_lizards: Vec<_> = query::lizards(&world)
                    .iter()
                    .map(|lizard| lizard.snapshot())
                    .collect();
                prop_assert_eq!(after_lizards, before_lizards);
                prop_assert_eq!(occupancy(&world), before_cells);
            }
        }
    }

    #[test]
    fn moves_change_at_most_two_cells(
        requests in prop::collection::vec((0u32..COLUMNS, 0u32..ROWS, 0usize..4), 1..40)
    ) {
        let mut world = seeded_world();

        for (column, row, direction) in requests {
            let before = occupancy(&world);
            let mut events = Vec::new();
            world::apply(
                &mut world,
                Command::MoveLizard {
                    cell: CellCoord::new(column, row),
                    direction: direction_from(direction),
                },
                &mut events,
            );

            let exited = events
                .iter()
                .any(|event| matches!(event, Event::LizardExited { .. }));
            if !exited {
                let changed = before
                    .iter()
                    .zip(occupancy(&world))
                    .filter(|(before, after)| **before != *after)
                    .count();
                prop_assert!(changed <= 2);
            }
        }
    }
}
