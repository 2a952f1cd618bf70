#![no_std]

extern crate alloc;

use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use playfield::*;
pub use solver::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod engine;
mod error;
mod generator;
mod playfield;
mod solver;
#[cfg(test)]
mod testing;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Dimensions are raised to at least one cell and the mine count is
    /// clamped so that at least one safe cell always exists.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.max(1);
        let size_y = size_y.max(1);
        let mines = mines.min(mult(size_x, size_y) - 1);
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Classic presets plus a catch-all for hand-picked board settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Expert,
        Self::Custom,
    ];

    /// Board settings of a preset, `None` for [`Difficulty::Custom`].
    pub const fn config(self) -> Option<GameConfig> {
        match self {
            Self::Beginner => Some(GameConfig::new_unchecked((9, 9), 10)),
            Self::Intermediate => Some(GameConfig::new_unchecked((16, 16), 40)),
            Self::Expert => Some(GameConfig::new_unchecked((30, 16), 99)),
            Self::Custom => None,
        }
    }

    /// Preset matching `config` exactly, otherwise [`Difficulty::Custom`].
    pub fn of(config: GameConfig) -> Self {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.config() == Some(config))
            .unwrap_or(Self::Custom)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mine placement of one game together with the adjacency counts derived from
/// it. Both are fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    adjacency: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(size: Coord2, mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let adjacency = calculate_adjacency(size, &mine_mask);
        Self {
            size,
            mine_mask,
            adjacency,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(size, mine_mask);
        if layout.safe_cell_count() == 0 {
            return Err(GameError::TooManyMines);
        }
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Stored adjacency count; meaningless for mine cells.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacency[coords.to_nd_index()]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size).filter(|&coords| self[coords])
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Counts the mines around every non-mine cell, clipped at the grid edges.
fn calculate_adjacency(size: Coord2, mine_mask: &Array2<bool>) -> Array2<u8> {
    let mut adjacency: Array2<u8> = Array2::zeros(size.to_nd_index());

    for coords in iter_coords(size) {
        if mine_mask[coords.to_nd_index()] {
            continue;
        }
        adjacency[coords.to_nd_index()] = neighbors(coords, size)
            .filter(|&pos| mine_mask[pos.to_nd_index()])
            .count() as u8;
    }

    adjacency
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoOp,
    Safe,
    MineHit,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoOp => false,
            Safe => true,
            MineHit => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChordOutcome {
    Rejected,
    Progressed,
    MineHit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_keeps_one_safe_cell() {
        let config = GameConfig::new((3, 3), 50);
        assert_eq!(config.mines, 8);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn config_raises_empty_dimensions() {
        let config = GameConfig::new((0, 4), 2);
        assert_eq!(config.size, (1, 4));
        assert_eq!(config.mines, 2);

        assert_eq!(GameConfig::new((1, 1), 3).mines, 0);
    }

    #[test]
    fn difficulty_round_trips_through_config() {
        for difficulty in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Expert] {
            let config = difficulty.config().unwrap();
            assert_eq!(Difficulty::of(config), difficulty);
        }
        assert_eq!(Difficulty::of(GameConfig::new((9, 9), 11)), Difficulty::Custom);
        assert_eq!(Difficulty::Custom.config(), None);
    }

    #[test]
    fn layout_adjacency_matches_neighbors() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
    }

    #[test]
    fn layout_rejects_bad_input() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
    }
}
