use alloc::vec;
use alloc::vec::Vec;
use core::mem;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Play -> Win
/// - Play -> Defeat
/// - Win | Defeat -> Play, only through a restart
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Play,
    Win,
    Defeat,
}

impl GameState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Play)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Defeat)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Play
    }
}

/// One-shot notifications raised on game end, queued until the host drains them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Defeat,
    Win,
}

/// Session counters, replaced wholesale on restart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    pub state: GameState,
    pub opened_count: CellCount,
    /// Signed so that over-flagging shows as a negative mines-left counter.
    pub flagged_count: i32,
    /// Whether the mines have been placed for this session.
    pub started: bool,
    pub ticks: u32,
}

/// Owns the board and the session progress, and applies every gameplay action.
#[derive(Clone, Debug)]
pub struct BoardEngine<G = RejectionSampler> {
    config: BoardConfig,
    generator: G,
    board: Array2<Cell>,
    progress: GameProgress,
    triggered_mine: Option<Coord2>,
    hover: Option<Coord2>,
    button_held: bool,
    events: Vec<GameEvent>,
}

impl BoardEngine<RejectionSampler> {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RejectionSampler::new(seed))
    }
}

impl BoardEngine<PresetMines> {
    /// Engine whose mines always land on `mine_coords`, even under the first click.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let layout = MineLayout::from_mine_coords(size, mine_coords)?;
        let config = BoardConfig::new(size, layout.mine_count())?;
        Self::with_generator(config, PresetMines::new(layout))
    }
}

impl<G: MineGenerator> BoardEngine<G> {
    pub fn with_generator(config: BoardConfig, generator: G) -> Result<Self> {
        generator.validate(&config)?;
        Ok(Self {
            config,
            generator,
            board: Array2::default(config.size.to_nd_index()),
            progress: GameProgress::default(),
            triggered_mine: None,
            hover: None,
            button_held: false,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn state(&self) -> GameState {
        self.progress.state
    }

    pub fn is_finished(&self) -> bool {
        self.progress.state.is_finished()
    }

    pub fn progress(&self) -> GameProgress {
        self.progress
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - self.progress.flagged_count
    }

    pub fn ticks(&self) -> u32 {
        self.progress.ticks
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn hover(&self) -> Option<Coord2> {
        self.hover
    }

    pub fn is_button_held(&self) -> bool {
        self.button_held
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// Whole board indexed by `[x, y]`.
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.board.view()
    }

    pub fn iter_near(&self, coords: Coord2) -> Result<NearIter> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.config.iter_near(coords))
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drains the win/defeat notifications raised since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Opens exactly one cell, placing the mines first if this is the session's first open.
    pub fn open_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.open_cell(coords))
    }

    /// Opens a cell and flood-fills outward through every zero-count cell.
    pub fn explore(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.explore_cell(coords))
    }

    /// Chord: explores every neighbor when the flagged neighbors match the cell's number.
    pub fn open_near_forced(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.chord_cell(coords))
    }

    /// Primary click: chords on a numbered open cell, explores anything else.
    pub fn click_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        Ok(if self.board[coords.to_nd_index()].is_chordable() {
            self.chord_cell(coords)
        } else {
            self.explore_cell(coords)
        })
    }

    /// Cycles the mark of an unopened cell and keeps the flag counter in step.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use Mark::*;

        let coords = self.config.validate_coords(coords)?;
        if !self.progress.state.is_playing() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        if cell.opened {
            return Ok(MarkOutcome::NoChange);
        }

        match (cell.toggle_mark(), cell.mark) {
            (Unmarked, Flagged) => self.progress.flagged_count += 1,
            (Flagged, Questioned) => self.progress.flagged_count -= 1,
            _ => {}
        }
        log::trace!("Mark at {:?} is now {:?}", coords, cell.mark);
        Ok(MarkOutcome::Changed)
    }

    /// Highlights the cells a release at `coords` would affect.
    pub fn pressed_around(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.config.validate_coords(coords)?;
        self.press_around_cell(coords);
        Ok(())
    }

    pub fn unpressed_all(&mut self) {
        self.board.iter_mut().for_each(|cell| cell.pressed = false);
    }

    /// Records the pointer position, anything off the board clears the hover.
    pub fn set_hover(&mut self, x: i32, y: i32) {
        self.hover = self.config.board_coords(x, y);
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    pub fn set_pressed(&mut self, held: bool) {
        self.button_held = held;
    }

    /// Per-frame update: refreshes the pressed hints and advances the game clock.
    pub fn tick(&mut self) {
        self.unpressed_all();
        if !self.progress.state.is_playing() {
            return;
        }

        if let (true, Some(hover)) = (self.button_held, self.hover) {
            self.press_around_cell(hover);
        }
        if self.progress.started {
            self.progress.ticks = self.progress.ticks.saturating_add(1);
        }
    }

    /// Throws away the board and progress, the next open places a new layout.
    pub fn restart(&mut self) {
        self.board = Array2::default(self.config.size.to_nd_index());
        self.progress = GameProgress::default();
        self.triggered_mine = None;
        log::debug!("Restarted {}x{} board", self.config.size.0, self.config.size.1);
    }

    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.progress.state.is_playing() {
            return RevealOutcome::NoChange;
        }

        let index = coords.to_nd_index();
        let cell = self.board[index];
        if cell.opened || cell.is_marked() {
            return RevealOutcome::NoChange;
        }

        self.board[index].opened = true;
        if !self.progress.started {
            self.place_mines(coords);
        }

        if self.board[index].mined {
            self.triggered_mine = Some(coords);
            self.finish(GameState::Defeat, GameEvent::Defeat);
            return RevealOutcome::HitMine;
        }

        let mines_near = self.count_mines_near(coords);
        self.board[index].mines_near = mines_near;
        self.progress.opened_count += 1;
        log::trace!("Opened {:?}, mines near: {}", coords, mines_near);

        if self.progress.opened_count >= self.config.safe_cells() {
            self.finish(GameState::Win, GameEvent::Win);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn explore_cell(&mut self, origin: Coord2) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut to_visit = vec![origin];

        while let Some(coords) = to_visit.pop() {
            if !self.progress.state.is_playing() {
                break;
            }

            let step = self.open_cell(coords);
            outcome = outcome | step;

            // only freshly opened zero cells spread, re-visits are no-ops
            if step == RevealOutcome::Revealed && self.board[coords.to_nd_index()].mines_near == 0 {
                to_visit.extend(
                    self.config
                        .iter_near(coords)
                        .filter(|&pos| !self.board[pos.to_nd_index()].opened),
                );
            }
        }

        outcome
    }

    fn chord_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.progress.state.is_playing() {
            return RevealOutcome::NoChange;
        }

        let cell = self.board[coords.to_nd_index()];
        let Some(mines_near) = cell.revealed_count() else {
            return RevealOutcome::NoChange;
        };

        let flagged = self.count_flagged_near(coords);
        if flagged != mines_near {
            log::trace!(
                "Chord at {:?} refused, {} flags for {} mines",
                coords,
                flagged,
                mines_near
            );
            return RevealOutcome::NoChange;
        }

        self.config
            .iter_near(coords)
            .map(|pos| self.explore_cell(pos))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor)
    }

    fn press_around_cell(&mut self, coords: Coord2) {
        let target = self.board[coords.to_nd_index()];
        if !target.is_marked() {
            self.board[coords.to_nd_index()].pressed = true;
        }

        if target.is_chordable() {
            for pos in self.config.iter_near(coords) {
                let cell = &mut self.board[pos.to_nd_index()];
                if !cell.is_marked() {
                    cell.pressed = true;
                }
            }
        }
    }

    fn place_mines(&mut self, origin: Coord2) {
        let layout = self.generator.generate(self.config, origin);
        for (coords, mined) in layout.iter() {
            if let Some(cell) = self.board.get_mut(coords.to_nd_index()) {
                cell.mined = mined;
            }
        }
        self.progress.started = true;
        log::debug!(
            "Placed {} mines, first open at {:?}",
            layout.mine_count(),
            origin
        );
    }

    fn finish(&mut self, state: GameState, event: GameEvent) {
        if !self.progress.state.is_playing() {
            return;
        }

        self.progress.state = state;
        self.events.push(event);
        log::debug!(
            "Game ended: {:?} after {} opened cells and {} ticks",
            state,
            self.progress.opened_count,
            self.progress.ticks
        );
    }

    fn count_mines_near(&self, coords: Coord2) -> u8 {
        self.config
            .iter_near(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].mined)
            .count() as u8
    }

    fn count_flagged_near(&self, coords: Coord2) -> u8 {
        self.config
            .iter_near(coords)
            .filter(|&pos| self.board[pos.to_nd_index()].is_flagged())
            .count() as u8
    }
}
