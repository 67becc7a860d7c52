use crate::maze::{Cardinal, Position, Relative};

/// the mouse's own belief about where it stands and which way it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tracker {
    position: Position,
    facing: Cardinal,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            position: Position::ORIGIN,
            facing: Cardinal::North,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Cardinal {
        self.facing
    }

    /// only a confirmed move changes belief; a rejected one leaves it untouched
    pub fn on_move_result(&mut self, direction: Relative, success: bool) {
        if !success {
            return;
        }
        self.facing = self.facing.apply(direction);
        self.position = self.position.step(self.facing);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_facing_north() {
        let tracker = Tracker::new();
        assert_eq!(tracker.position(), Position::ORIGIN);
        assert_eq!(tracker.facing(), Cardinal::North);
    }

    #[test]
    fn successful_moves_turn_then_advance() {
        let mut tracker = Tracker::new();
        tracker.on_move_result(Relative::Forward, true);
        tracker.on_move_result(Relative::Right, true);
        assert_eq!(tracker.position(), Position::new(1, 1));
        assert_eq!(tracker.facing(), Cardinal::East);

        tracker.on_move_result(Relative::Back, true);
        assert_eq!(tracker.position(), Position::new(0, 1));
        assert_eq!(tracker.facing(), Cardinal::West);
    }

    #[test]
    fn failed_moves_change_nothing() {
        let mut tracker = Tracker::new();
        tracker.on_move_result(Relative::Left, false);
        assert_eq!(tracker, Tracker::new());
    }

    #[test]
    fn reset_returns_to_start() {
        let mut tracker = Tracker::new();
        tracker.on_move_result(Relative::Right, true);
        tracker.reset();
        assert_eq!(tracker, Tracker::new());
    }
}
