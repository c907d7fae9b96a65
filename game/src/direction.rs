use serde::{Deserialize, Serialize};

use crate::position::PositionDelta;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Stable enumeration order. Ties between headings resolve to the earliest entry.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub fn delta(self) -> PositionDelta {
        match self {
            Direction::Up => PositionDelta::new(0, -1),
            Direction::Down => PositionDelta::new(0, 1),
            Direction::Left => PositionDelta::new(-1, 0),
            Direction::Right => PositionDelta::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The three headings reachable from `self` in one step, in `ALL` order.
    pub fn turns(self) -> impl Iterator<Item = Direction> {
        Self::ALL
            .into_iter()
            .filter(move |&dir| !dir.is_reverse_of(self))
    }
}
