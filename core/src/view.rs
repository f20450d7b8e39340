use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer should draw for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    /// Hidden cell under a held button.
    Pressed,
    Flagged,
    Questioned,
    Open(u8),
    /// Mine shown after a defeat.
    Mine,
    /// The mine that was opened.
    Exploded,
    /// Flag on a safe cell, shown after a defeat.
    WrongFlag,
}

impl CellView {
    fn classify(cell: Cell, state: GameState) -> Self {
        use CellView::*;

        if cell.opened {
            return if cell.mined {
                Exploded
            } else {
                Open(cell.mines_near)
            };
        }

        match (state, cell.mark, cell.mined) {
            (GameState::Defeat, Mark::Flagged, false) => WrongFlag,
            (GameState::Defeat, Mark::Unmarked | Mark::Questioned, true) => Mine,
            // a won board shows every mine as flagged
            (GameState::Win, _, true) => Flagged,
            (_, Mark::Flagged, _) => Flagged,
            (_, Mark::Questioned, _) => Questioned,
            (_, Mark::Unmarked, _) if cell.pressed => Pressed,
            (_, Mark::Unmarked, _) => Hidden,
        }
    }

    pub const fn is_closed(self) -> bool {
        !matches!(self, Self::Open(_) | Self::Exploded | Self::Mine)
    }
}

/// Counters for the heads-up display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub state: GameState,
    /// Mines minus flags, negative when the player over-flags.
    pub mines_left: i32,
    pub ticks: u32,
}

impl Hud {
    pub fn from_engine<G: MineGenerator>(engine: &BoardEngine<G>) -> Self {
        let state = engine.state();
        Self {
            state,
            // every mine is drawn flagged once the board is won
            mines_left: if state == GameState::Win {
                0
            } else {
                engine.mines_left()
            },
            ticks: engine.ticks(),
        }
    }

    /// Mines-left counter clamped to what a three digit display can show.
    pub fn display_mines_left(&self) -> i32 {
        self.mines_left.clamp(-99, 999)
    }
}

/// Settled, read-only picture of the board taken between updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub hud: Hud,
}

impl BoardView {
    pub fn from_engine<G: MineGenerator>(engine: &BoardEngine<G>) -> Self {
        let state = engine.state();
        Self {
            size: engine.size(),
            cells: engine.cells().map(|&cell| CellView::classify(cell, state)),
            hud: Hud::from_engine(engine),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}
