//! Hand-drawn player views for analysis tests.

use ndarray::Array2;

use crate::*;

/// Visible board drawn as rows (`y`), one char per cell (`x`): `?` hidden,
/// `F` flagged, `0`-`8` revealed counts.
pub(crate) struct Sketch {
    cells: Array2<EngineCell>,
    size: Coord2,
    mines: CellCount,
}

impl Sketch {
    pub(crate) fn new(rows: &[&str], mines: CellCount) -> Self {
        let size = (rows[0].len() as Coord, rows.len() as Coord);
        let mut cells: Array2<EngineCell> = Array2::default(size.to_nd_index());

        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size.0 as usize, "ragged sketch");
            for (x, ch) in row.chars().enumerate() {
                cells[[x, y]] = match ch {
                    '?' => EngineCell::Hidden,
                    'F' => EngineCell::Flagged,
                    digit => EngineCell::Revealed(digit.to_digit(10).expect("cell char") as u8),
                };
            }
        }

        Self { cells, size, mines }
    }
}

impl BoardView for Sketch {
    fn size(&self) -> Coord2 {
        self.size
    }

    fn total_mines(&self) -> CellCount {
        self.mines
    }

    fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.cells[coords.to_nd_index()]
    }

    fn is_game_over(&self) -> bool {
        false
    }

    fn is_game_won(&self) -> bool {
        false
    }
}
