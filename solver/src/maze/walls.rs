use std::collections::HashMap;

use super::{direction::Cardinal, position::Position};
use crate::api::Surroundings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallState {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl WallState {
    pub fn from_reading(walled: bool) -> Self {
        if walled { Self::Closed } else { Self::Open }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// sparse, write-once knowledge of the walls discovered so far.
///
/// every write is mirrored onto the neighbour's opposing wall, so the two
/// sides of an edge always agree. the map has no notion of the maze size and
/// will hold entries for cells past the border; consumers bound-check.
#[derive(Debug, Clone, Default)]
pub struct WallMap {
    cells: HashMap<Position, [WallState; 4]>,
}

impl WallMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Position, direction: Cardinal) -> WallState {
        self.cells
            .get(&cell)
            .map(|walls| walls[direction.index()])
            .unwrap_or_default()
    }

    /// stores one sensor snapshot taken at `cell` while facing `facing`;
    /// a snapshot that contradicts the map is rejected as a whole
    pub fn record(
        &mut self,
        cell: Position,
        facing: Cardinal,
        readings: &Surroundings,
    ) -> eyre::Result<()> {
        let updates = readings
            .readings()
            .map(|(relative, walled)| (facing.apply(relative), WallState::from_reading(walled)));

        for (direction, state) in updates {
            self.check_edge(cell, direction, state)?;
        }
        for (direction, state) in updates {
            self.set(cell, direction, state)?;
        }
        Ok(())
    }

    /// confirms one edge from both sides
    pub fn set(
        &mut self,
        cell: Position,
        direction: Cardinal,
        state: WallState,
    ) -> eyre::Result<()> {
        if !state.is_known() {
            return Ok(());
        }
        self.check_edge(cell, direction, state)?;
        self.write(cell, direction, state);
        self.write(cell.step(direction), direction.opposite(), state);
        Ok(())
    }

    fn check_edge(&self, cell: Position, direction: Cardinal, state: WallState) -> eyre::Result<()> {
        self.check(cell, direction, state)?;
        self.check(cell.step(direction), direction.opposite(), state)
    }

    fn check(&self, cell: Position, direction: Cardinal, state: WallState) -> eyre::Result<()> {
        let existing = self.get(cell, direction);
        if existing.is_known() && existing != state {
            eyre::bail!(
                "contradictory wall reading at {} {}: recorded {:?}, sensed {:?}",
                cell,
                direction,
                existing,
                state
            );
        }
        Ok(())
    }

    fn write(&mut self, cell: Position, direction: Cardinal, state: WallState) {
        self.cells.entry(cell).or_default()[direction.index()] = state;
    }

    pub fn confirmed_open_neighbors(&self, cell: Position) -> Vec<(Position, Cardinal)> {
        cell.neighbors()
            .filter(|(_, dir)| self.get(cell, *dir) == WallState::Open)
            .collect()
    }

    /// neighbours not yet proven walled off, restricted to an NxN maze
    pub fn possibly_open_neighbors(
        &self,
        cell: Position,
        size: usize,
    ) -> Vec<(Position, Cardinal)> {
        cell.neighbors()
            .filter(|(neighbor, dir)| {
                self.get(cell, *dir) != WallState::Closed && neighbor.in_bounds(size)
            })
            .collect()
    }

    pub fn known_directions(&self, cell: Position) -> usize {
        self.cells
            .get(&cell)
            .map_or(0, |walls| walls.iter().filter(|w| w.is_known()).count())
    }

    pub fn is_frontier(&self, cell: Position) -> bool {
        self.known_directions(cell) < 4
    }

    /// cells inside an NxN maze whose four walls are all known
    pub fn fully_known_cells(&self, size: usize) -> usize {
        self.cells
            .iter()
            .filter(|(cell, walls)| cell.in_bounds(size) && walls.iter().all(|w| w.is_known()))
            .count()
    }
}
