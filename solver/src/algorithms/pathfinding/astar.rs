use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::maze::{GoalSet, Position, WallMap};

use super::traits::{Path, PathfindingAlgorithm, reconstruct_path};

/// heap entry ordered by lowest f-score, then earliest insertion
#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    f_score: usize,
    seq: usize,
    g_score: usize,
    position: Position,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// goal-directed search over confirmed-open edges only.
///
/// unit edge costs with the manhattan distance to the nearest goal as the
/// heuristic, which never overestimates on a 4-connected grid, so the first
/// goal dequeued is a nearest one.
pub struct AStar {
    goals: GoalSet,
}

impl AStar {
    pub fn new(goals: GoalSet) -> Self {
        Self { goals }
    }
}

impl PathfindingAlgorithm for AStar {
    fn find_path(&self, walls: &WallMap, start: Position) -> Option<Path> {
        let mut open_set = BinaryHeap::new();
        let mut came_from = HashMap::new();
        let mut g_scores: HashMap<Position, usize> = HashMap::new();
        let mut closed_set: HashSet<Position> = HashSet::new();
        let mut seq = 0;

        g_scores.insert(start, 0);
        open_set.push(State {
            f_score: self.goals.distance(start),
            seq,
            g_score: 0,
            position: start,
        });

        while let Some(State {
            position, g_score, ..
        }) = open_set.pop()
        {
            if self.goals.contains(position) {
                return Some(reconstruct_path(&came_from, start, position));
            }

            if !closed_set.insert(position) {
                continue;
            }

            for (neighbor, direction) in walls.confirmed_open_neighbors(position) {
                if closed_set.contains(&neighbor) {
                    continue;
                }

                let tentative_g = g_score + 1;
                let current_g = g_scores.get(&neighbor).copied().unwrap_or(usize::MAX);

                if tentative_g < current_g {
                    g_scores.insert(neighbor, tentative_g);
                    came_from.insert(neighbor, (position, direction));

                    seq += 1;
                    open_set.push(State {
                        f_score: tentative_g + self.goals.distance(neighbor),
                        seq,
                        g_score: tentative_g,
                        position: neighbor,
                    });
                }
            }
        }

        None
    }

    fn name(&self) -> &'static str {
        "A*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cardinal, GoalSet, Layout, WallState};

    fn goal(x: isize, y: isize) -> GoalSet {
        GoalSet::new([Position::new(x, y)]).unwrap()
    }

    #[test]
    fn finds_shortest_route_on_a_known_maze() {
        let layout = Layout::open(5, goal(3, 2));
        let map = layout.to_wall_map().unwrap();

        let path = AStar::new(goal(3, 2)).find_path(&map, Position::ORIGIN).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.last().unwrap().cell, Position::new(3, 2));

        let mut cell = Position::ORIGIN;
        for step in &path {
            cell = cell.step(step.direction);
            assert_eq!(cell, step.cell);
        }
    }

    #[test]
    fn picks_the_nearest_goal() {
        let layout = Layout::open(6, GoalSet::center(6));
        let map = layout.to_wall_map().unwrap();
        let goals = GoalSet::new([Position::new(5, 5), Position::new(0, 2)]).unwrap();

        let path = AStar::new(goals).find_path(&map, Position::ORIGIN).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.last().unwrap().cell, Position::new(0, 2));
    }

    #[test]
    fn ignores_edges_that_are_not_confirmed() {
        let mut map = WallMap::new();
        map.set(Position::ORIGIN, Cardinal::North, WallState::Open).unwrap();
        // (0,1) -> (0,2) unknown: a route may exist but is not confirmed
        let search = AStar::new(goal(0, 2));
        assert_eq!(search.find_path(&map, Position::ORIGIN), None);

        map.set(Position::new(0, 1), Cardinal::North, WallState::Open)
            .unwrap();
        assert_eq!(search.find_path(&map, Position::ORIGIN).map(|p| p.len()), Some(2));
    }

    #[test]
    fn walks_around_known_walls() {
        let mut layout = Layout::sealed(3, goal(2, 0));
        // only route: up, across, down
        layout.remove_wall(Position::new(0, 0), Cardinal::North);
        layout.remove_wall(Position::new(0, 1), Cardinal::East);
        layout.remove_wall(Position::new(1, 1), Cardinal::East);
        layout.remove_wall(Position::new(2, 1), Cardinal::South);
        let map = layout.to_wall_map().unwrap();

        let path = AStar::new(goal(2, 0)).find_path(&map, Position::ORIGIN).unwrap();
        let directions: Vec<_> = path.iter().map(|step| step.direction).collect();
        assert_eq!(
            directions,
            vec![Cardinal::North, Cardinal::East, Cardinal::East, Cardinal::South]
        );
    }

    #[test]
    fn standing_on_a_goal_yields_an_empty_path() {
        let path = AStar::new(goal(0, 0)).find_path(&WallMap::new(), Position::ORIGIN);
        assert_eq!(path, Some(Vec::new()));
    }
}
