use std::collections::HashMap;

use crate::maze::{Cardinal, Position, WallMap};

/// one hop of a planned route: the cell entered and the heading used to enter it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub cell: Position,
    pub direction: Cardinal,
}

pub type Path = Vec<Step>;

pub trait PathfindingAlgorithm {
    /// `None` is an ordinary outcome, not a failure
    fn find_path(&self, walls: &WallMap, start: Position) -> Option<Path>;

    fn name(&self) -> &'static str;
}

pub(super) fn reconstruct_path(
    came_from: &HashMap<Position, (Position, Cardinal)>,
    start: Position,
    target: Position,
) -> Path {
    let mut path = Vec::new();
    let mut current = target;

    while current != start {
        if let Some(&(prev, direction)) = came_from.get(&current) {
            path.push(Step {
                cell: current,
                direction,
            });
            current = prev;
        } else {
            break;
        }
    }

    path.reverse();
    path
}
