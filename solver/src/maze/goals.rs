use std::collections::BTreeSet;

use super::position::Position;

/// non-empty set of cells that end a run when entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSet {
    cells: BTreeSet<Position>,
}

impl GoalSet {
    pub fn new(cells: impl IntoIterator<Item = Position>) -> eyre::Result<Self> {
        let cells: BTreeSet<_> = cells.into_iter().collect();
        if cells.is_empty() {
            eyre::bail!("goal set must contain at least one cell");
        }
        Ok(Self { cells })
    }

    /// centre 2x2 block of an NxN maze (a single cell for 1x1)
    pub fn center(size: usize) -> Self {
        let hi = (size / 2) as isize;
        let lo = (hi - 1).max(0);
        let cells = [
            Position::new(lo, lo),
            Position::new(lo, hi),
            Position::new(hi, lo),
            Position::new(hi, hi),
        ]
        .into_iter()
        .filter(|cell| cell.in_bounds(size.max(1)))
        .collect();
        Self { cells }
    }

    pub fn contains(&self, cell: Position) -> bool {
        self.cells.contains(&cell)
    }

    /// manhattan distance to the nearest goal cell
    pub fn distance(&self, cell: Position) -> usize {
        self.cells
            .iter()
            .map(|goal| goal.manhattan_distance(cell))
            .min()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
