use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{
    direction::{Cardinal, Relative},
    layout::Layout,
    position::Position,
};
use crate::api::{MouseApi, MoveOutcome, Surroundings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MouseState {
    position: Position,
    facing: Cardinal,
    moves: usize,
    sensor_reads: usize,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            position: Position::ORIGIN,
            facing: Cardinal::North,
            moves: 0,
            sensor_reads: 0,
        }
    }
}

/// in-process maze server holding the true state of every named mouse
pub struct SimulatedMaze {
    layout: Layout,
    flag: Option<String>,
    mice: Mutex<HashMap<String, MouseState>>,
}

impl SimulatedMaze {
    pub fn new(layout: Layout, flag: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            layout,
            flag,
            mice: Mutex::new(HashMap::new()),
        })
    }

    pub fn mouse(self: &Arc<Self>, name: &str) -> SimulatedMouse {
        SimulatedMouse {
            maze: Arc::clone(self),
            name: name.to_string(),
        }
    }

    /// true position and facing, `None` for a mouse that never acted
    pub fn true_state(&self, name: &str) -> Option<(Position, Cardinal)> {
        self.lock()
            .get(name)
            .map(|state| (state.position, state.facing))
    }

    /// moves issued, successful or not
    pub fn moves(&self, name: &str) -> usize {
        self.lock().get(name).map_or(0, |state| state.moves)
    }

    pub fn sensor_reads(&self, name: &str) -> usize {
        self.lock().get(name).map_or(0, |state| state.sensor_reads)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, MouseState>> {
        // state stays consistent even if a holder panicked
        self.mice.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn surroundings(&self, name: &str) -> Surroundings {
        let mut mice = self.lock();
        let state = mice.entry(name.to_string()).or_default();
        state.sensor_reads += 1;

        let walled = |relative| {
            self.layout
                .has_wall(state.position, state.facing.apply(relative))
        };
        Surroundings {
            forward: walled(Relative::Forward),
            back: walled(Relative::Back),
            left: walled(Relative::Left),
            right: walled(Relative::Right),
        }
    }

    fn move_mouse(&self, name: &str, direction: Relative) -> MoveOutcome {
        let mut mice = self.lock();
        let state = mice.entry(name.to_string()).or_default();
        state.moves += 1;

        let heading = state.facing.apply(direction);
        if self.layout.has_wall(state.position, heading) {
            return MoveOutcome {
                success: false,
                goal_reached: self.layout.is_goal(state.position),
                flag: None,
            };
        }

        state.position = state.position.step(heading);
        state.facing = heading;

        let goal_reached = self.layout.is_goal(state.position);
        MoveOutcome {
            success: true,
            goal_reached,
            flag: if goal_reached { self.flag.clone() } else { None },
        }
    }

    fn reset(&self, name: &str) {
        let mut mice = self.lock();
        let state = mice.entry(name.to_string()).or_default();
        state.position = Position::ORIGIN;
        state.facing = Cardinal::North;
    }
}

/// handle for one named mouse, cheap to clone
#[derive(Clone)]
pub struct SimulatedMouse {
    maze: Arc<SimulatedMaze>,
    name: String,
}

impl MouseApi for SimulatedMouse {
    async fn surroundings(&self) -> eyre::Result<Surroundings> {
        Ok(self.maze.surroundings(&self.name))
    }

    async fn move_mouse(&self, direction: Relative) -> eyre::Result<MoveOutcome> {
        Ok(self.maze.move_mouse(&self.name, direction))
    }

    async fn reset(&self) -> eyre::Result<()> {
        self.maze.reset(&self.name);
        Ok(())
    }
}
