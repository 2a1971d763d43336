//! Authoritative food board state management utilities.

use snake_arcade_core::{CellCoord, FoodKind};

/// Slots for the at-most-two food items that can occupy the board.
///
/// The normal slot is re-placed (relocated) freely; the special slot holds at
/// most one pending item until it is consumed.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FoodBoard {
    normal: Option<CellCoord>,
    special: Option<CellCoord>,
}

impl FoodBoard {
    pub(crate) fn clear(&mut self) {
        self.normal = None;
        self.special = None;
    }

    pub(crate) const fn normal(&self) -> Option<CellCoord> {
        self.normal
    }

    pub(crate) const fn special(&self) -> Option<CellCoord> {
        self.special
    }

    pub(crate) fn occupies(&self, cell: CellCoord) -> bool {
        self.normal == Some(cell) || self.special == Some(cell)
    }

    /// Reports whether the special slot already holds a pending item.
    pub(crate) const fn special_pending(&self) -> bool {
        self.special.is_some()
    }

    pub(crate) fn place_normal(&mut self, cell: CellCoord) {
        self.normal = Some(cell);
    }

    pub(crate) fn place_special(&mut self, cell: CellCoord) {
        self.special = Some(cell);
    }

    /// Consumes the food item at `cell`, if any, and reports its kind.
    pub(crate) fn consume_at(&mut self, cell: CellCoord) -> Option<FoodKind> {
        if self.special == Some(cell) {
            self.special = None;
            return Some(FoodKind::Special);
        }
        if self.normal == Some(cell) {
            self.normal = None;
            return Some(FoodKind::Normal);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_prefers_the_special_slot() {
        let mut board = FoodBoard::default();
        let cell = CellCoord::new(2, 2);
        board.place_normal(cell);
        board.place_special(cell);
        assert_eq!(board.consume_at(cell), Some(FoodKind::Special));
        assert_eq!(board.consume_at(cell), Some(FoodKind::Normal));
        assert_eq!(board.consume_at(cell), None);
    }

    #[test]
    fn occupies_covers_both_slots() {
        let mut board = FoodBoard::default();
        board.place_normal(CellCoord::new(1, 1));
        board.place_special(CellCoord::new(2, 2));
        assert!(board.occupies(CellCoord::new(1, 1)));
        assert!(board.occupies(CellCoord::new(2, 2)));
        assert!(!board.occupies(CellCoord::new(3, 3)));
    }
}
