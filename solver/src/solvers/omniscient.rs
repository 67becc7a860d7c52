use crate::algorithms::pathfinding::{AStar, PathfindingAlgorithm};
use crate::maze::{Layout, Position};

/// moves an all-seeing mouse needs from the start cell to the nearest goal,
/// `None` when no goal is reachable
pub fn optimal_moves(layout: &Layout) -> eyre::Result<Option<usize>> {
    let walls = layout.to_wall_map()?;
    let path = AStar::new(layout.goals().clone()).find_path(&walls, Position::ORIGIN);
    Ok(path.map(|path| path.len()))
}
