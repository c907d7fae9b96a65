use crate::duel::AgentId;
use crate::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Trail(AgentId),
}

/// How a prospective move target relates to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    OutOfBounds,
    Occupied,
    Free,
}

/// Occupancy grid for one match. Cells only ever go from `Empty` to a trail.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![vec![Cell::Empty; width]; height];
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.bounds())
    }

    /// Callers must bounds-check first.
    pub fn get(&self, pos: Position) -> Cell {
        debug_assert!(self.in_bounds(pos), "grid read out of bounds at {pos:?}");
        self.cells[pos.y as usize][pos.x as usize]
    }

    /// Callers must bounds-check first.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(self.in_bounds(pos), "grid write out of bounds at {pos:?}");
        let slot = &mut self.cells[pos.y as usize][pos.x as usize];
        debug_assert!(
            cell != Cell::Empty || *slot == Cell::Empty,
            "trail at {pos:?} cleared mid-match"
        );
        *slot = cell;
    }

    pub fn classify(&self, pos: Position) -> Occupancy {
        if !self.in_bounds(pos) {
            Occupancy::OutOfBounds
        } else if self.get(pos) == Cell::Empty {
            Occupancy::Free
        } else {
            Occupancy::Occupied
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (Position, Cell)> {
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &cell)| (Position::from_index(x, y), cell))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.entries()
            .filter(|&(_, cell)| cell != Cell::Empty)
            .count()
    }
}
