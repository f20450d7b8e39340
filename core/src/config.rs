use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count, fixed for the lifetime of an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Derives the mine count from a percentage of the board area, rounding down.
    pub fn with_density(size: Coord2, percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(GameError::InvalidDensity);
        }

        let total = u32::from(mult(size.0, size.1));
        let mines = total * u32::from(percent) / 100;
        let mines = CellCount::try_from(mines).map_err(|_| GameError::TooManyMines)?;
        Self::new(size, mines)
    }

    /// The 10x8 board of the desktop game.
    pub const fn classic() -> Self {
        Self::new_unchecked((10, 8), 12)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    /// Rejects configurations the mine placement could never satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Number of opened cells that wins the game.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn contains(&self, coords: Coord2) -> bool {
        coords.0 < self.size.0 && coords.1 < self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Converts a signed pointer position into board coordinates, if it lands on the board.
    pub fn board_coords(&self, x: i32, y: i32) -> Option<Coord2> {
        let coords = (Coord::try_from(x).ok()?, Coord::try_from(y).ok()?);
        self.contains(coords).then_some(coords)
    }

    pub fn iter_near(&self, coords: Coord2) -> NearIter {
        NearIter::new(coords, self.size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::classic()
    }
}
