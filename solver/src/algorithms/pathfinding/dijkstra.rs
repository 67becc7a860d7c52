use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::maze::{Position, WallMap};

use super::traits::{Path, PathfindingAlgorithm, reconstruct_path};

/// heap entry ordered by lowest cost, then earliest insertion
#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: usize,
    seq: usize,
    position: Position,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// frontier search: nearest cell with an unknown wall, optimistically
/// treating every wall not yet seen as passable
pub struct Dijkstra {
    size: usize,
}

impl Dijkstra {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl PathfindingAlgorithm for Dijkstra {
    fn find_path(&self, walls: &WallMap, start: Position) -> Option<Path> {
        let mut heap = BinaryHeap::new();
        let mut distances: HashMap<Position, usize> = HashMap::new();
        let mut came_from = HashMap::new();
        let mut seq = 0;

        heap.push(State {
            cost: 0,
            seq,
            position: start,
        });
        distances.insert(start, 0);

        while let Some(State { cost, position, .. }) = heap.pop() {
            if cost > *distances.get(&position).unwrap_or(&usize::MAX) {
                continue;
            }

            if walls.is_frontier(position) {
                return Some(reconstruct_path(&came_from, start, position));
            }

            for (neighbor, direction) in walls.possibly_open_neighbors(position, self.size) {
                let new_cost = cost + 1;
                let current_dist = distances.get(&neighbor).copied().unwrap_or(usize::MAX);

                if new_cost < current_dist {
                    distances.insert(neighbor, new_cost);
                    came_from.insert(neighbor, (position, direction));
                    seq += 1;
                    heap.push(State {
                        cost: new_cost,
                        seq,
                        position: neighbor,
                    });
                }
            }
        }

        None
    }

    fn name(&self) -> &'static str {
        "Dijkstra"
    }
}
