use std::ops::{Add, Mul, Sub};

use serde::Serialize;

/// A grid cell, `x` being the column and `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub(crate) fn from_index(x: usize, y: usize) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    pub fn manhattan(self, to: Position) -> i32 {
        (to - self).magnitude_l1()
    }

    pub fn in_bounds(self, bounds: (usize, usize)) -> bool {
        let (width, height) = bounds;
        let x_in_bounds = self.x >= 0 && (self.x as usize) < width;
        let y_in_bounds = self.y >= 0 && (self.y as usize) < height;
        x_in_bounds && y_in_bounds
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionDelta {
    pub dx: i32,
    pub dy: i32,
}

impl PositionDelta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn magnitude_l1(self) -> i32 {
        self.dx.abs() + self.dy.abs()
    }
}

impl Mul<i32> for PositionDelta {
    type Output = PositionDelta;

    fn mul(self, n: i32) -> PositionDelta {
        PositionDelta::new(self.dx * n, self.dy * n)
    }
}

impl Add<PositionDelta> for Position {
    type Output = Position;

    fn add(self, delta: PositionDelta) -> Position {
        let x = self.x + delta.dx;
        let y = self.y + delta.dy;
        Position { x, y }
    }
}

impl Sub for Position {
    type Output = PositionDelta;

    fn sub(self, other: Position) -> PositionDelta {
        PositionDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}
