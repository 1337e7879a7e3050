//! Articulated lizard bodies.

use lizard_puzzle_core::{CellCoord, Direction, LizardId, LizardSnapshot};

/// One unit of a lizard's body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodySegment {
    lizard: LizardId,
    cell: CellCoord,
}

impl BodySegment {
    /// Lizard the segment belongs to.
    #[must_use]
    pub const fn lizard(&self) -> LizardId {
        self.lizard
    }

    /// Cell the segment currently covers.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }
}

/// Ordered chain of body segments, tail first and head last.
///
/// Consecutive segments always cover grid-adjacent cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lizard {
    id: LizardId,
    segments: Vec<BodySegment>,
}

impl Lizard {
    pub(crate) fn new(id: LizardId, body: &[CellCoord]) -> Self {
        Self {
            id,
            segments: body
                .iter()
                .map(|&cell| BodySegment { lizard: id, cell })
                .collect(),
        }
    }

    /// Identifier allocated to the lizard by the world.
    #[must_use]
    pub const fn id(&self) -> LizardId {
        self.id
    }

    /// Body segments ordered from tail to head.
    #[must_use]
    pub fn segments(&self) -> &[BodySegment] {
        &self.segments
    }

    /// Last segment of the body.
    #[must_use]
    pub fn head_segment(&self) -> Option<&BodySegment> {
        self.segments.last()
    }

    /// First segment of the body.
    #[must_use]
    pub fn tail_segment(&self) -> Option<&BodySegment> {
        self.segments.first()
    }

    /// Segment covering `cell`, if any.
    #[must_use]
    pub fn segment_at(&self, cell: CellCoord) -> Option<&BodySegment> {
        self.segments.iter().find(|segment| segment.cell == cell)
    }

    /// Neighbour of `segment` one step closer to the head.
    ///
    /// Returns `None` for the head itself and for segments of other lizards.
    #[must_use]
    pub fn segment_ahead(&self, segment: &BodySegment) -> Option<&BodySegment> {
        let index = self.position(segment)?;
        self.segments.get(index + 1)
    }

    /// Neighbour of `segment` one step closer to the tail.
    ///
    /// Returns `None` for the tail itself and for segments of other lizards.
    #[must_use]
    pub fn segment_behind(&self, segment: &BodySegment) -> Option<&BodySegment> {
        let index = self.position(segment)?;
        index.checked_sub(1).and_then(|behind| self.segments.get(behind))
    }

    /// Direction from `segment` to the segment ahead of it.
    #[must_use]
    pub fn direction_to_segment_ahead(&self, segment: &BodySegment) -> Option<Direction> {
        let ahead = self.segment_ahead(segment)?;
        segment.cell.direction_to(ahead.cell)
    }

    /// Direction from `segment` to the segment behind it.
    #[must_use]
    pub fn direction_to_segment_behind(&self, segment: &BodySegment) -> Option<Direction> {
        let behind = self.segment_behind(segment)?;
        segment.cell.direction_to(behind.cell)
    }

    /// Direction the head points in, seen from the segment behind it.
    ///
    /// Single-segment lizards have no orientation.
    #[must_use]
    pub fn head_direction(&self) -> Option<Direction> {
        let head = self.head_segment()?;
        let neck = self.segment_behind(head)?;
        neck.cell.direction_to(head.cell)
    }

    /// Direction the tail points in, seen from the segment ahead of it.
    ///
    /// Single-segment lizards have no orientation.
    #[must_use]
    pub fn tail_direction(&self) -> Option<Direction> {
        let tail = self.tail_segment()?;
        let ahead = self.segment_ahead(tail)?;
        ahead.cell.direction_to(tail.cell)
    }

    /// Captures the body as plain coordinates.
    #[must_use]
    pub fn snapshot(&self) -> LizardSnapshot {
        LizardSnapshot {
            id: self.id,
            segments: self.segments.iter().map(|segment| segment.cell).collect(),
        }
    }

    /// Shifts every segment onto its neighbour ahead and puts the head on
    /// `cell`. Returns the cell released by the old tail.
    pub(crate) fn advance_head(&mut self, cell: CellCoord) -> Option<CellCoord> {
        let vacated = self.tail_segment()?.cell;
        let last = self.segments.len() - 1;
        for index in 0..last {
            self.segments[index].cell = self.segments[index + 1].cell;
        }
        self.segments[last].cell = cell;
        Some(vacated)
    }

    /// Shifts every segment onto its neighbour behind and puts the tail on
    /// `cell`. Returns the cell released by the old head.
    pub(crate) fn advance_tail(&mut self, cell: CellCoord) -> Option<CellCoord> {
        let vacated = self.head_segment()?.cell;
        for index in (1..self.segments.len()).rev() {
            self.segments[index].cell = self.segments[index - 1].cell;
        }
        self.segments[0].cell = cell;
        Some(vacated)
    }

    fn position(&self, segment: &BodySegment) -> Option<usize> {
        self.segments.iter().position(|candidate| candidate == segment)
    }
}
