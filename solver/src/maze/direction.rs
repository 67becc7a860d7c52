use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// compass direction in the map's frame, north is +y and east is +x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    /// expansion order used by every search
    pub const ALL: [Cardinal; 4] = [Self::North, Self::East, Self::South, Self::West];

    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    pub fn displacement(self) -> (isize, isize) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    pub fn rotate_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub fn rotate_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// cardinal direction reached by moving `relative` while facing `self`
    pub fn apply(self, relative: Relative) -> Self {
        match relative {
            Relative::Forward => self,
            Relative::Back => self.opposite(),
            Relative::Left => self.rotate_left(),
            Relative::Right => self.rotate_right(),
        }
    }

    /// inverse of [`Cardinal::apply`]: the relative move that heads towards `target`
    pub fn relative_to_reach(self, target: Cardinal) -> Relative {
        if target == self {
            Relative::Forward
        } else if target == self.opposite() {
            Relative::Back
        } else if target == self.rotate_left() {
            Relative::Left
        } else {
            Relative::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// direction relative to the mouse's current facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relative {
    Forward,
    Back,
    Left,
    Right,
}

impl Relative {
    /// try order of the single-step fallback
    pub const FALLBACK_ORDER: [Relative; 4] =
        [Self::Forward, Self::Left, Self::Right, Self::Back];

    /// left-hand rule preference
    pub const LEFT_HAND_ORDER: [Relative; 4] =
        [Self::Left, Self::Forward, Self::Right, Self::Back];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Relative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relative {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "back" => Ok(Self::Back),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => eyre::bail!("invalid relative direction: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELATIVES: [Relative; 4] = [
        Relative::Forward,
        Relative::Back,
        Relative::Left,
        Relative::Right,
    ];

    #[test]
    fn rotations_form_a_four_cycle() {
        for dir in Cardinal::ALL {
            assert_eq!(dir.rotate_left().rotate_right(), dir);
            assert_eq!(dir.rotate_left().rotate_left(), dir.opposite());
            assert_eq!(
                dir.rotate_right()
                    .rotate_right()
                    .rotate_right()
                    .rotate_right(),
                dir
            );
        }
    }

    #[test]
    fn opposite_displacements_cancel() {
        for dir in Cardinal::ALL {
            let (dx, dy) = dir.displacement();
            let (ox, oy) = dir.opposite().displacement();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn apply_matches_rotation_tables() {
        assert_eq!(Cardinal::North.apply(Relative::Left), Cardinal::West);
        assert_eq!(Cardinal::North.apply(Relative::Right), Cardinal::East);
        assert_eq!(Cardinal::East.apply(Relative::Back), Cardinal::West);
        assert_eq!(Cardinal::South.apply(Relative::Forward), Cardinal::South);
        assert_eq!(Cardinal::West.apply(Relative::Right), Cardinal::North);
    }

    #[test]
    fn relative_to_reach_inverts_apply() {
        for facing in Cardinal::ALL {
            for relative in RELATIVES {
                let target = facing.apply(relative);
                assert_eq!(facing.relative_to_reach(target), relative);
            }
        }
    }

    #[test]
    fn parses_relative_names() {
        assert_eq!("Forward".parse::<Relative>().unwrap(), Relative::Forward);
        assert_eq!("back".parse::<Relative>().unwrap(), Relative::Back);
        assert!("up".parse::<Relative>().is_err());
    }
}
