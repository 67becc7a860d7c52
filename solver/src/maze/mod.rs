mod direction;
mod goals;
mod layout;
mod position;
pub mod render;
mod simulator;
mod walls;

pub use direction::{Cardinal, Relative};
pub use goals::GoalSet;
pub use layout::Layout;
pub use position::Position;
pub use simulator::{SimulatedMaze, SimulatedMouse};
pub use walls::{WallMap, WallState};
