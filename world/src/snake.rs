//! Authoritative snake body state management utilities.

use std::collections::VecDeque;

use snake_arcade_core::{CellCoord, GridSize, Heading};

/// Number of body segments the snake starts a run with.
pub(crate) const INITIAL_LENGTH: usize = 3;

/// Ordered body of the snake, head at the front of the deque.
#[derive(Clone, Debug)]
pub(crate) struct Snake {
    body: VecDeque<CellCoord>,
}

impl Snake {
    /// Spawns a snake of [`INITIAL_LENGTH`] centered on the grid, heading
    /// right, with the trailing segments extending toward decreasing columns.
    ///
    /// Returns `None` when the grid is too small to hold the starting body.
    pub(crate) fn spawn_centered(grid: GridSize) -> Option<Self> {
        let head = grid.center();
        if head.column() + 1 < INITIAL_LENGTH as u32 || !grid.contains(head) {
            return None;
        }

        let mut body = VecDeque::with_capacity(INITIAL_LENGTH);
        for offset in 0..INITIAL_LENGTH as u32 {
            body.push_back(CellCoord::new(head.column() - offset, head.row()));
        }
        Some(Self { body })
    }

    pub(crate) fn head(&self) -> CellCoord {
        *self.body.front().expect("snake body is never empty")
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.body.contains(&cell)
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.body.iter().copied()
    }

    /// Reports whether stepping onto `next` would hit the body.
    ///
    /// In the no-growth path the tail cell is vacated by the same step, so it
    /// is excluded from the check; a growth step keeps the tail in place and
    /// checks the full body.
    pub(crate) fn would_collide(&self, next: CellCoord, growing: bool) -> bool {
        let occupied = if growing {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(occupied).any(|cell| *cell == next)
    }

    /// Moves the head onto `next`, keeping the tail when `grow` is set.
    pub(crate) fn advance(&mut self, next: CellCoord, grow: bool) {
        self.body.push_front(next);
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}

/// Initial heading applied to a freshly spawned snake.
pub(crate) const INITIAL_HEADING: Heading = Heading::Right;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_extends_left_of_the_centered_head() {
        let snake = Snake::spawn_centered(GridSize::new(10, 10)).expect("grid fits snake");
        let cells: Vec<_> = snake.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(5, 5),
                CellCoord::new(4, 5),
                CellCoord::new(3, 5),
            ]
        );
    }

    #[test]
    fn spawn_rejects_grids_too_narrow_for_the_body() {
        assert!(Snake::spawn_centered(GridSize::new(2, 5)).is_none());
        assert!(Snake::spawn_centered(GridSize::new(0, 0)).is_none());
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::spawn_centered(GridSize::new(10, 10)).expect("grid fits snake");
        snake.advance(CellCoord::new(6, 5), false);
        assert_eq!(snake.cells().count(), INITIAL_LENGTH);
        assert_eq!(snake.head(), CellCoord::new(6, 5));
        assert!(!snake.contains(CellCoord::new(3, 5)));
    }

    #[test]
    fn advance_with_growth_keeps_tail() {
        let mut snake = Snake::spawn_centered(GridSize::new(10, 10)).expect("grid fits snake");
        snake.advance(CellCoord::new(6, 5), true);
        assert_eq!(snake.cells().count(), INITIAL_LENGTH + 1);
        assert!(snake.contains(CellCoord::new(3, 5)));
    }

    #[test]
    fn tail_cell_is_ignored_in_the_no_growth_collision_check() {
        let snake = Snake::spawn_centered(GridSize::new(10, 10)).expect("grid fits snake");
        let tail = CellCoord::new(3, 5);
        assert!(!snake.would_collide(tail, false));
        assert!(snake.would_collide(tail, true));
    }
}
