pub mod pathfinding;
