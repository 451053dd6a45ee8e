use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use std::collections::HashSet;
use thiserror::Error;

/// A cell on the playing field.  Coordinates of cells inside the grid lie in
/// `0..size`; a freshly-advanced head may briefly lie outside it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell one step away from `self` in direction `dir`, without
    /// regard to the grid's edges
    pub(crate) fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One of the four axis-aligned unit vectors along which the snake moves.
/// North is towards `y = 0`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// The square playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: i32,
}

impl Grid {
    pub(crate) fn new(size: i32) -> Grid {
        Grid { size }
    }

    pub(crate) fn size(self) -> i32 {
        self.size
    }

    /// Reduce each coordinate of `cell` modulo the grid size.  Only used while
    /// ghost-mode is active.
    pub(crate) fn wrap(self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(self.size),
            y: cell.y.rem_euclid(self.size),
        }
    }

    pub(crate) fn in_bounds(self, cell: Cell) -> bool {
        (0..self.size).contains(&cell.x) && (0..self.size).contains(&cell.y)
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell { x, y }))
    }

    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        Cell {
            x: rng.random_range(0..self.size),
            y: rng.random_range(0..self.size),
        }
    }

    /// Pick a random cell not in `occupied`.
    ///
    /// Cells are rejection-sampled up to
    /// [`SPAWN_ATTEMPTS`][consts::SPAWN_ATTEMPTS] times, after which the free
    /// cells are enumerated and one of them is chosen.
    ///
    /// # Errors
    ///
    /// Returns [`GridFull`] if every cell is occupied.
    pub(crate) fn random_valid_cell<R: Rng>(
        self,
        rng: &mut R,
        occupied: &HashSet<Cell>,
    ) -> Result<Cell, GridFull> {
        for _ in 0..consts::SPAWN_ATTEMPTS {
            let cell = self.random_cell(rng);
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }
        log::debug!(
            "No free cell found after {} attempts; scanning grid",
            consts::SPAWN_ATTEMPTS
        );
        self.cells()
            .filter(|c| !occupied.contains(c))
            .choose(rng)
            .ok_or(GridFull)
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(consts::GRID_SIZE)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no free cell left on the grid")]
pub(crate) struct GridFull;
