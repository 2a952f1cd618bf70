use crate::*;
pub use random::*;

mod random;

pub trait MinePlacer {
    fn place(self, config: GameConfig) -> MineLayout;
}

/// Cells kept free of mines around the starting click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartZone {
    /// No exclusion at all.
    Anywhere,
    /// Only the clicked cell is guaranteed safe.
    Cell,
    /// The clicked cell and its neighborhood, so the first reveal opens a region.
    Neighborhood,
}
