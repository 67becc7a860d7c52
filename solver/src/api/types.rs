use serde::{Deserialize, Serialize};

use crate::maze::Relative;

/// one sensor snapshot, `true` means a wall in that relative direction
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Surroundings {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl Surroundings {
    pub const WALLED: Surroundings = Surroundings {
        forward: true,
        back: true,
        left: true,
        right: true,
    };

    pub fn is_walled(&self, direction: Relative) -> bool {
        match direction {
            Relative::Forward => self.forward,
            Relative::Back => self.back,
            Relative::Left => self.left,
            Relative::Right => self.right,
        }
    }

    pub fn readings(&self) -> [(Relative, bool); 4] {
        [
            (Relative::Forward, self.forward),
            (Relative::Back, self.back),
            (Relative::Left, self.left),
            (Relative::Right, self.right),
        ]
    }

    /// first direction of `order` that is not walled
    pub fn first_open(&self, order: &[Relative]) -> Option<Relative> {
        order.iter().copied().find(|dir| !self.is_walled(*dir))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct MoveRequest {
    pub direction: Relative,
}

/// result of a move request; servers may send extra fields, they are ignored
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub success: bool,
    pub goal_reached: bool,
    #[serde(default)]
    pub flag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_payloads() {
        let walls: Surroundings =
            serde_json::from_str(r#"{"forward":false,"back":true,"left":true,"right":false}"#)
                .unwrap();
        assert!(!walls.is_walled(Relative::Forward));
        assert!(walls.is_walled(Relative::Left));
        assert_eq!(
            walls.first_open(&Relative::FALLBACK_ORDER),
            Some(Relative::Forward)
        );

        let outcome: MoveOutcome = serde_json::from_str(
            r#"{"success":true,"position":{"x":0,"y":1},"goal_reached":false}"#,
        )
        .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.flag, None);
    }

    #[test]
    fn encodes_relative_directions_in_lowercase() {
        let body = serde_json::to_string(&MoveRequest {
            direction: Relative::Left,
        })
        .unwrap();
        assert_eq!(body, r#"{"direction":"left"}"#);
    }

    #[test]
    fn enclosed_cell_has_no_open_direction() {
        assert_eq!(Surroundings::WALLED.first_open(&Relative::FALLBACK_ORDER), None);
    }
}
