use serde::{Deserialize, Serialize};

/// Player annotation on an unopened cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Unmarked,
    Flagged,
    Questioned,
}

impl Mark {
    /// Next mark in the `Unmarked -> Flagged -> Questioned -> Unmarked` cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Unmarked => Self::Flagged,
            Self::Flagged => Self::Questioned,
            Self::Questioned => Self::Unmarked,
        }
    }
}

impl Default for Mark {
    fn default() -> Self {
        Self::Unmarked
    }
}

/// One square of the board.
///
/// `mines_near` only carries meaning once the cell is opened and not mined, and a
/// marked cell is never opened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub opened: bool,
    pub mark: Mark,
    pub mined: bool,
    /// Hover hint for the presentation layer, cleared every tick.
    pub pressed: bool,
    pub mines_near: u8,
}

impl Cell {
    pub const fn is_marked(self) -> bool {
        !matches!(self.mark, Mark::Unmarked)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.mark, Mark::Flagged)
    }

    /// Adjacent mine count of an opened safe cell.
    pub const fn revealed_count(self) -> Option<u8> {
        if self.opened && !self.mined {
            Some(self.mines_near)
        } else {
            None
        }
    }

    /// Whether a primary click on this cell should chord instead of reveal.
    pub const fn is_chordable(self) -> bool {
        self.opened && !self.mined && self.mines_near > 0
    }

    /// Advances the mark cycle, returning the previous mark. Opened cells keep no mark.
    pub fn toggle_mark(&mut self) -> Mark {
        let previous = self.mark;
        if !self.opened {
            self.mark = previous.next();
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_blank() {
        let cell = Cell::default();

        assert!(!cell.opened);
        assert!(!cell.mined);
        assert!(!cell.pressed);
        assert_eq!(cell.mark, Mark::Unmarked);
        assert_eq!(cell.mines_near, 0);
        assert_eq!(cell.revealed_count(), None);
    }

    #[test]
    fn three_toggles_return_to_unmarked() {
        let mut cell = Cell::default();

        assert_eq!(cell.toggle_mark(), Mark::Unmarked);
        assert!(cell.is_flagged());
        assert_eq!(cell.toggle_mark(), Mark::Flagged);
        assert_eq!(cell.mark, Mark::Questioned);
        assert!(cell.is_marked() && !cell.is_flagged());
        assert_eq!(cell.toggle_mark(), Mark::Questioned);
        assert_eq!(cell.mark, Mark::Unmarked);
    }

    #[test]
    fn opened_cell_cannot_be_marked() {
        let mut cell = Cell {
            opened: true,
            mines_near: 2,
            ..Default::default()
        };

        cell.toggle_mark();

        assert_eq!(cell.mark, Mark::Unmarked);
        assert_eq!(cell.revealed_count(), Some(2));
        assert!(cell.is_chordable());
    }
}
