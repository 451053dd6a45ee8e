use super::grid::{Cell, Direction};
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first.  Never empty.
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake moved on the most recent tick
    pub(super) direction: Direction,

    /// The direction in which the snake will move on the next tick
    pub(super) heading: Direction,
}

impl Snake {
    /// Create a new one-segment snake at `head` facing in `direction`
    pub(crate) fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            direction,
            heading: direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Cell {
        self.body[0]
    }

    /// Return the cells of the snake, head first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Return the direction the snake will move in on the next tick
    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    /// Queue a turn towards `direction` for the next tick.  Turning straight
    /// back the way the snake last moved is refused; returns `false` in that
    /// case.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.heading = direction;
            true
        }
    }

    /// Return the cell the head would move to on the next tick, before any
    /// wrapping or bounds checks
    pub(crate) fn next_head(&self) -> Cell {
        self.head().step(self.heading)
    }

    /// Does `cell` lie on the snake's body, excluding the head?
    pub(crate) fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == cell)
    }

    /// Move the head to `head`.  If `grow` is false, the tail segment is
    /// dropped so that the length stays constant.
    pub(crate) fn advance(&mut self, head: Cell, grow: bool) {
        self.direction = self.heading;
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}
