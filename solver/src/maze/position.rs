use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::direction::Cardinal;

/// cell coordinate, signed so mirrored writes past the border stay representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0, 0);

    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn step(self, direction: Cardinal) -> Self {
        self + direction.displacement()
    }

    pub fn in_bounds(self, size: usize) -> bool {
        let size = size as isize;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// all four neighbours, including ones outside any maze
    pub fn neighbors(self) -> impl Iterator<Item = (Position, Cardinal)> {
        Cardinal::ALL.into_iter().map(move |dir| (self.step(dir), dir))
    }

    pub fn to_index(self, size: usize) -> Option<usize> {
        self.in_bounds(size)
            .then(|| self.y as usize * size + self.x as usize)
    }
}

impl Add<(isize, isize)> for Position {
    type Output = Self;

    fn add(self, (dx, dy): (isize, isize)) -> Self::Output {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Position {
    type Err = eyre::Report;

    /// parses `x,y`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| eyre::eyre!("invalid cell {:?}: expected x,y", s))?;
        Ok(Self::new(x.trim().parse()?, y.trim().parse()?))
    }
}
