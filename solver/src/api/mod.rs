mod interface;
pub mod types;

pub use interface::{HttpMouse, MouseApi};
pub use types::{MoveOutcome, Surroundings};
