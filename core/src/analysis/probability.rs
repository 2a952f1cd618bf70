use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EstimateSource {
    /// Average over the cell's neighboring numbers.
    Local,
    /// Remaining mines spread over all hidden cells.
    Global,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MineEstimate {
    pub probability: f64,
    pub source: EstimateSource,
}

/// Heuristic mine probability for every hidden, unflagged cell.
///
/// Each numbered neighbor contributes its own local share and the shares are
/// averaged. This ignores how neighboring numbers interact, so values are
/// rough guides rather than true conditional probabilities.
#[derive(Clone, Debug)]
pub struct ProbabilityMap {
    estimates: Array2<Option<MineEstimate>>,
    size: Coord2,
}

impl ProbabilityMap {
    pub fn estimate(view: &impl BoardView) -> Self {
        let size = view.size();

        let mut local: Array2<Option<f64>> = Array2::from_elem(size.to_nd_index(), None);
        for clue in iter_coords(size) {
            if let Some(constraint) = LocalConstraint::at(view, clue) {
                local[clue.to_nd_index()] = constraint.local_estimate();
            }
        }

        let global = global_estimate(view);
        let mut estimates = Array2::from_elem(size.to_nd_index(), None);

        for coords in iter_coords(size) {
            if !view.cell_at(coords).is_hidden() {
                continue;
            }

            let (sum, count) = neighbors(coords, size)
                .filter_map(|pos| local[pos.to_nd_index()])
                .fold((0.0, 0u8), |(sum, count), share| (sum + share, count + 1));

            estimates[coords.to_nd_index()] = Some(if count > 0 {
                MineEstimate {
                    probability: sum / f64::from(count),
                    source: EstimateSource::Local,
                }
            } else {
                MineEstimate {
                    probability: global,
                    source: EstimateSource::Global,
                }
            });
        }

        Self { estimates, size }
    }

    pub fn get(&self, coords: Coord2) -> Option<MineEstimate> {
        self.estimates[coords.to_nd_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, MineEstimate)> + '_ {
        iter_coords(self.size).filter_map(|coords| Some((coords, self.get(coords)?)))
    }

    /// Whether any cell is estimated from a neighboring number.
    pub fn has_local_data(&self) -> bool {
        self.iter()
            .any(|(_, estimate)| estimate.source == EstimateSource::Local)
    }

    /// Cells to guess from: every cell estimated at exactly zero if there is
    /// one, otherwise every cell sharing the lowest estimate.
    pub fn safest_cells(&self) -> (Vec<Coord2>, f64) {
        let zero: Vec<_> = self
            .iter()
            .filter(|(_, estimate)| estimate.probability == 0.0)
            .map(|(coords, _)| coords)
            .collect();
        if !zero.is_empty() {
            return (zero, 0.0);
        }

        let lowest = self
            .iter()
            .map(|(_, estimate)| estimate.probability)
            .fold(f64::INFINITY, f64::min);
        let cells = self
            .iter()
            .filter(|(_, estimate)| estimate.probability == lowest)
            .map(|(coords, _)| coords)
            .collect();
        (cells, lowest)
    }
}

/// Unflagged mines over unflagged hidden cells, `0.5` when no such cell is
/// left.
pub fn global_estimate(view: &impl BoardView) -> f64 {
    let flags = f64::from(view.flag_count());
    let remaining_mines = f64::from(view.total_mines()) - flags;
    let open_cells = f64::from(view.unrevealed_count()) - flags;

    if open_cells > 0.0 {
        remaining_mines / open_cells
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Sketch;

    #[test]
    fn fresh_board_uses_global_estimate() {
        let board = Board::new(GameConfig::new((9, 9), 10), None, 0).unwrap();

        let map = ProbabilityMap::estimate(&board);

        assert!(!map.has_local_data());
        assert_eq!(map.iter().count(), 81);
        assert_eq!(
            map.get((4, 4)),
            Some(MineEstimate {
                probability: 10.0 / 81.0,
                source: EstimateSource::Global,
            })
        );
    }

    #[test]
    fn global_estimate_discounts_flags() {
        let view = Sketch::new(&["F???", "????"], 3);

        assert_eq!(global_estimate(&view), 2.0 / 7.0);
    }

    #[test]
    fn global_estimate_defaults_without_open_cells() {
        let view = Sketch::new(&["F1"], 1);

        assert_eq!(global_estimate(&view), 0.5);
    }

    #[test]
    fn lowest_estimate_wins() {
        let view = Sketch::new(&["?1??"], 1);

        let map = ProbabilityMap::estimate(&view);

        assert_eq!(map.get((0, 0)).unwrap().probability, 0.5);
        assert_eq!(map.get((2, 0)).unwrap().probability, 0.5);
        assert_eq!(
            map.get((3, 0)),
            Some(MineEstimate {
                probability: 1.0 / 3.0,
                source: EstimateSource::Global,
            })
        );
        assert_eq!(map.get((1, 0)), None);
        assert_eq!(map.safest_cells(), (alloc::vec![(3, 0)], 1.0 / 3.0));
    }

    #[test]
    fn zero_estimate_is_preferred() {
        let view = Sketch::new(&["F1??"], 2);

        let map = ProbabilityMap::estimate(&view);

        assert_eq!(map.get((2, 0)).unwrap().probability, 0.0);
        assert_eq!(map.get((3, 0)).unwrap().probability, 0.5);
        assert_eq!(map.safest_cells(), (alloc::vec![(2, 0)], 0.0));
    }

    #[test]
    fn shares_are_averaged_over_numbers() {
        // (1,0) says 1 of 2, (3,0) says 2 of 2, (2,0) sits between them
        let view = Sketch::new(&["?1?2?", "00000"], 3);

        let map = ProbabilityMap::estimate(&view);

        assert_eq!(map.get((0, 0)).unwrap().probability, 0.5);
        assert_eq!(map.get((2, 0)).unwrap().probability, 0.75);
        assert_eq!(map.get((4, 0)).unwrap().probability, 1.0);
        assert_eq!(map.safest_cells(), (alloc::vec![(0, 0)], 0.5));
    }

    #[test]
    fn over_flagged_numbers_are_ignored() {
        let view = Sketch::new(&["F1F", "???"], 2);

        let map = ProbabilityMap::estimate(&view);

        assert!(!map.has_local_data());
        assert_eq!(map.get((1, 1)).unwrap().source, EstimateSource::Global);
    }
}
