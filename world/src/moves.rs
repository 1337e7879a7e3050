//! Resolution of a player's move request into a single body shift.
//!
//! A request names a selected cell and a direction. Whatever segment was
//! selected, the lizard only ever moves by one of two primitive shifts: the
//! head leads into a fresh cell and the tail follows, or the tail leads and
//! the head follows. Resolution decides which end leads and which cell it
//! enters.

use lizard_puzzle_core::{BodyEnd, CellCoord, Direction};

use crate::{grid::Grid, lizard::BodySegment, Lizard};

/// Shift chosen for a legal move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MovePlan {
    pub(crate) leading: BodyEnd,
    pub(crate) destination: CellCoord,
}

/// Reasons a move request resolves to a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveRejection {
    /// The selected cell is not part of the lizard.
    NotSelected,
    /// A middle segment was pushed across the body.
    NotInline,
    /// The leading end would leave the grid.
    OffGrid,
    /// The leading end would enter a wall or another segment.
    Blocked,
}

/// Decides how `lizard` reacts when the segment on `selected` is pushed in
/// `direction`.
///
/// Pushing an end onto its own neighbour reverses the body: the opposite end
/// leads, continuing the line the body already forms there. A middle segment
/// only moves the body when the push is aligned with the head or the tail,
/// in which case that end leads.
pub(crate) fn resolve(
    grid: &Grid,
    lizard: &Lizard,
    selected: CellCoord,
    direction: Direction,
) -> Result<MovePlan, MoveRejection> {
    let segment = lizard
        .segment_at(selected)
        .ok_or(MoveRejection::NotSelected)?;
    let head = lizard.head_segment().ok_or(MoveRejection::NotSelected)?;
    let tail = lizard.tail_segment().ok_or(MoveRejection::NotSelected)?;

    let (leading, from, heading) = if segment == head {
        if pushes_onto(lizard.segment_behind(segment), selected, direction) {
            let heading = lizard.tail_direction().ok_or(MoveRejection::NotInline)?;
            (BodyEnd::Tail, tail.cell(), heading)
        } else {
            (BodyEnd::Head, head.cell(), direction)
        }
    } else if segment == tail {
        if pushes_onto(lizard.segment_ahead(segment), selected, direction) {
            let heading = lizard.head_direction().ok_or(MoveRejection::NotInline)?;
            (BodyEnd::Head, head.cell(), heading)
        } else {
            (BodyEnd::Tail, tail.cell(), direction)
        }
    } else if lizard.head_direction() == Some(direction) {
        (BodyEnd::Head, head.cell(), direction)
    } else if lizard.tail_direction() == Some(direction) {
        (BodyEnd::Tail, tail.cell(), direction)
    } else {
        return Err(MoveRejection::NotInline);
    };

    let destination = grid
        .adjacent(from, heading)
        .ok_or(MoveRejection::OffGrid)?;
    if !grid.is_available(destination) {
        return Err(MoveRejection::Blocked);
    }

    Ok(MovePlan {
        leading,
        destination,
    })
}

fn pushes_onto(neighbor: Option<&BodySegment>, selected: CellCoord, direction: Direction) -> bool {
    match (neighbor, selected.neighbor(direction)) {
        (Some(neighbor), Some(target)) => neighbor.cell() == target,
        _ => false,
    }
}
