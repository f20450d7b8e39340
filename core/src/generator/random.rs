use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform mine placement by rejection sampling.
///
/// Coordinates are drawn independently and redrawn whenever they hit the first
/// clicked cell or an already mined one, so the first click is always safe.
#[derive(Clone, Debug)]
pub struct RejectionSampler {
    rng: SmallRng,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RejectionSampler {
    fn generate(&mut self, config: BoardConfig, origin: Coord2) -> MineLayout {
        let (size_x, size_y) = config.size;
        let mut layout = MineLayout::empty(config.size);

        // engines validate their config up front, this only guards direct callers
        // that pass an overfull one: the origin stays free either way
        let mines = config.mines.min(config.total_cells().saturating_sub(1));
        if mines < config.mines {
            log::warn!(
                "Cannot keep first click safe with {} mines on {} cells, placing {}",
                config.mines,
                config.total_cells(),
                mines
            );
        }

        let mut attempts: u32 = 0;
        while layout.mine_count() < mines {
            let coords = (
                self.rng.random_range(0..size_x),
                self.rng.random_range(0..size_y),
            );
            attempts += 1;
            if coords == origin {
                continue;
            }
            layout.insert(coords);
        }

        log::debug!(
            "Placed {} mines around origin {:?} in {} draws",
            layout.mine_count(),
            origin,
            attempts
        );
        layout
    }
}
