use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Decides where the mines go once the first cell of a session is opened.
pub trait MineGenerator {
    /// Checks up front that this generator can serve boards of `config`.
    fn validate(&self, config: &BoardConfig) -> Result<()> {
        config.validate()
    }

    fn generate(&mut self, config: BoardConfig, origin: Coord2) -> MineLayout;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Builds a layout from explicit positions, repeated positions count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            layout.insert(coords);
        }
        Ok(layout)
    }

    /// Places a mine, returning whether the cell was free before.
    pub(crate) fn insert(&mut self, coords: Coord2) -> bool {
        let slot = &mut self.mine_mask[coords.to_nd_index()];
        if *slot {
            false
        } else {
            *slot = true;
            self.mine_count += 1;
            true
        }
    }

    pub fn size(&self) -> Coord2 {
        to_coords(self.mine_mask.dim())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Layout positions in `(x, y)` order, paired with whether each holds a mine.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, bool)> + '_ {
        self.mine_mask
            .indexed_iter()
            .map(|(index, &mined)| (to_coords(index), mined))
    }
}

/// Masks are always allocated from a `Coord2`, so the saturation never kicks in.
fn to_coords((x, y): (usize, usize)) -> Coord2 {
    (
        Coord::try_from(x).unwrap_or(Coord::MAX),
        Coord::try_from(y).unwrap_or(Coord::MAX),
    )
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Hands out the same fixed layout every session, for replays and tests.
///
/// Unlike the sampler this does not protect the first click.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMines {
    layout: MineLayout,
}

impl PresetMines {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MineGenerator for PresetMines {
    fn validate(&self, config: &BoardConfig) -> Result<()> {
        config.validate()?;
        if self.layout.size() != config.size || self.layout.mine_count() != config.mines {
            return Err(GameError::InvalidLayout);
        }
        Ok(())
    }

    fn generate(&mut self, _config: BoardConfig, origin: Coord2) -> MineLayout {
        if self.layout.contains_mine(origin) {
            log::warn!("Preset layout has a mine under the first click at {:?}", origin);
        }
        self.layout.clone()
    }
}
