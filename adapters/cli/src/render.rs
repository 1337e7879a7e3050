//! Text and JSON presentations of the puzzle board.

use std::fmt::Write as _;

use lizard_puzzle_core::{CellCoord, CellSnapshot, LizardSnapshot};
use lizard_puzzle_world::{query, World};
use serde::Serialize;

const HEADER: &str = "---------- GRID ----------";
const FOOTER: &str = "--------------------------";

/// Serializable view of the entire board.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct BoardSnapshot {
    columns: u32,
    rows: u32,
    cells: Vec<CellSnapshot>,
    lizards: Vec<LizardSnapshot>,
}

impl BoardSnapshot {
    /// Captures the current state of `world` in reading order.
    pub(crate) fn capture(world: &World) -> Self {
        let (columns, rows) = query::dimensions(world);
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .filter_map(|coord| query::cell(world, coord))
            .collect();
        let lizards = query::lizards(world)
            .iter()
            .map(|lizard| lizard.snapshot())
            .collect();

        Self {
            columns,
            rows,
            cells,
            lizards,
        }
    }
}

/// Renders the board as a block of text, one line per grid row.
pub(crate) fn render(world: &World) -> String {
    let (columns, rows) = query::dimensions(world);
    let mut out = String::new();

    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out, "Dimensions:");
    let _ = writeln!(out, "{columns} {rows}");
    let _ = writeln!(out, "Layout:");
    for row in 0..rows {
        let line: String = (0..columns)
            .map(|column| symbol(world, CellCoord::new(column, row)))
            .collect();
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "Lizards:");
    for lizard in query::lizards(world) {
        let body: Vec<String> = lizard
            .segments()
            .iter()
            .map(|segment| format!("{},{}", segment.cell().column(), segment.cell().row()))
            .collect();
        let _ = writeln!(out, "{}", body.join(" "));
    }
    let _ = writeln!(out, "{FOOTER}");

    out
}

fn symbol(world: &World, coord: CellCoord) -> char {
    let Some(cell) = query::cell(world, coord) else {
        return ' ';
    };

    if cell.wall.is_some() {
        return 'W';
    }
    if let Some(lizard) = query::lizard_at(world, coord) {
        let is_head = lizard.head_segment().map(|segment| segment.cell()) == Some(coord);
        let is_tail = lizard.tail_segment().map(|segment| segment.cell()) == Some(coord);
        return match (is_head, is_tail) {
            (true, _) => 'H',
            (false, true) => 'T',
            (false, false) => 'o',
        };
    }
    if cell.exit.is_some() {
        return 'E';
    }
    '.'
}
