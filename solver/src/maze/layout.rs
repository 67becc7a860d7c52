use rand::Rng;
use rand::seq::SliceRandom;

use super::{
    direction::Cardinal,
    goals::GoalSet,
    position::Position,
    walls::{WallMap, WallState},
};

/// ground-truth NxN maze, `true` marks a wall
#[derive(Debug, Clone)]
pub struct Layout {
    size: usize,
    walls: Vec<[bool; 4]>,
    goals: GoalSet,
}

impl Layout {
    /// every wall present
    pub fn sealed(size: usize, goals: GoalSet) -> Self {
        Self {
            size,
            walls: vec![[true; 4]; size * size],
            goals,
        }
    }

    /// interior walls removed, boundary kept
    pub fn open(size: usize, goals: GoalSet) -> Self {
        let mut layout = Self::sealed(size, goals);
        for cell in layout.cells() {
            for dir in [Cardinal::North, Cardinal::East] {
                if cell.step(dir).in_bounds(size) {
                    layout.remove_wall(cell, dir);
                }
            }
        }
        layout
    }

    /// perfect maze carved by a randomized depth-first backtracker from (0, 0)
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut layout = Self::sealed(size, GoalSet::center(size));
        if size == 0 {
            return layout;
        }

        let mut visited = vec![false; size * size];
        let mut stack = vec![Position::ORIGIN];
        visited[0] = true;

        while let Some(&current) = stack.last() {
            let unvisited: Vec<_> = current
                .neighbors()
                .filter(|(next, _)| {
                    next.to_index(size)
                        .is_some_and(|index| !visited[index])
                })
                .collect();

            match unvisited.choose(rng) {
                Some(&(next, dir)) => {
                    layout.remove_wall(current, dir);
                    if let Some(index) = next.to_index(size) {
                        visited[index] = true;
                    }
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        log::debug!("generated {}x{} maze", size, size);
        layout
    }

    pub fn with_goals(mut self, goals: GoalSet) -> Self {
        self.goals = goals;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    pub fn is_goal(&self, cell: Position) -> bool {
        self.goals.contains(cell)
    }

    /// cells outside the grid are walled on every side
    pub fn has_wall(&self, cell: Position, direction: Cardinal) -> bool {
        cell.to_index(self.size)
            .is_none_or(|index| self.walls[index][direction.index()])
    }

    /// removes the wall on both sides of the edge
    pub fn remove_wall(&mut self, cell: Position, direction: Cardinal) {
        if let Some(index) = cell.to_index(self.size) {
            self.walls[index][direction.index()] = false;
        }
        if let Some(index) = cell.step(direction).to_index(self.size) {
            self.walls[index][direction.opposite().index()] = false;
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size as isize;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// the complete wall map an all-seeing observer would hold
    pub fn to_wall_map(&self) -> eyre::Result<WallMap> {
        let mut map = WallMap::new();
        for cell in self.cells() {
            for dir in Cardinal::ALL {
                map.set(cell, dir, WallState::from_reading(self.has_wall(cell, dir)))?;
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn reachable(layout: &Layout) -> HashSet<Position> {
        let mut seen = HashSet::from([Position::ORIGIN]);
        let mut queue = VecDeque::from([Position::ORIGIN]);
        while let Some(cell) = queue.pop_front() {
            for (next, dir) in cell.neighbors() {
                if !layout.has_wall(cell, dir) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn generated_maze_is_connected_and_closed() {
        let mut rng = StdRng::seed_from_u64(7);
        let layout = Layout::generate(8, &mut rng);

        assert_eq!(reachable(&layout).len(), 64);
        for cell in layout.cells() {
            for (next, dir) in cell.neighbors() {
                if !next.in_bounds(8) {
                    assert!(layout.has_wall(cell, dir), "border open at {} {}", cell, dir);
                } else {
                    assert_eq!(layout.has_wall(cell, dir), layout.has_wall(next, dir.opposite()));
                }
            }
        }
    }

    #[test]
    fn generated_maze_is_a_tree() {
        let mut rng = StdRng::seed_from_u64(42);
        let layout = Layout::generate(6, &mut rng);
        let open_edges = layout
            .cells()
            .flat_map(|cell| [(cell, Cardinal::North), (cell, Cardinal::East)])
            .filter(|(cell, dir)| !layout.has_wall(*cell, *dir))
            .count();
        assert_eq!(open_edges, 35);
        assert!(layout.is_goal(Position::new(3, 3)));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Layout::generate(5, &mut StdRng::seed_from_u64(3));
        let b = Layout::generate(5, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.walls, b.walls);
    }

    #[test]
    fn open_layout_keeps_only_the_border() {
        let layout = Layout::open(4, GoalSet::center(4));
        assert_eq!(layout.size(), 4);
        assert!(!layout.has_wall(Position::new(1, 1), Cardinal::North));
        assert!(layout.has_wall(Position::new(0, 0), Cardinal::South));
        assert!(layout.has_wall(Position::new(3, 2), Cardinal::East));
        assert!(layout.has_wall(Position::new(9, 9), Cardinal::West));
    }

    #[test]
    fn full_wall_map_knows_every_cell() {
        let layout = Layout::open(3, GoalSet::center(3));
        let map = layout.to_wall_map().unwrap();
        assert!(layout.cells().all(|cell| !map.is_frontier(cell)));
    }
}
