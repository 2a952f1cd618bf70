//! The contract a player (human front-end or [`Solver`](crate::Solver)) holds
//! on a game. Nothing here exposes where the mines are.

use crate::*;

/// Read-only, player-visible view of a board.
pub trait BoardView {
    fn size(&self) -> Coord2;

    fn total_mines(&self) -> CellCount;

    /// Visible state of one cell; counts are only known for revealed cells.
    /// Panics when `coords` is out of bounds.
    fn cell_at(&self, coords: Coord2) -> EngineCell;

    fn is_game_over(&self) -> bool;

    fn is_game_won(&self) -> bool;

    fn flag_count(&self) -> CellCount {
        iter_coords(self.size())
            .filter(|&coords| self.cell_at(coords).is_flagged())
            .count() as CellCount
    }

    fn unrevealed_count(&self) -> CellCount {
        iter_coords(self.size())
            .filter(|&coords| self.cell_at(coords).is_unrevealed())
            .count() as CellCount
    }
}

/// Commands available to a player in addition to the visible state.
pub trait Playfield: BoardView {
    fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome>;

    fn toggle_flag(&mut self, coords: Coord2) -> Result<bool>;

    fn chord(&mut self, coords: Coord2) -> Result<ChordOutcome>;
}
