mod astar;
mod dijkstra;
pub mod traits;

pub use astar::AStar;
pub use dijkstra::Dijkstra;
pub use traits::{Path, PathfindingAlgorithm, Step};
