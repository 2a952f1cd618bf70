use ndarray::Array2;
use rand::Rng;

use super::*;

/// Rejection-sampling placement: draws uniform coordinates and retries on
/// collisions with existing mines or with the start zone.
///
/// When the requested zone cannot fit alongside the mines it degrades, from
/// [`StartZone::Neighborhood`] to [`StartZone::Cell`] and from there to
/// [`StartZone::Anywhere`], so there are always enough eligible cells and
/// sampling terminates.
#[derive(Debug)]
pub struct RandomMinePlacer<'a, R> {
    rng: &'a mut R,
    start: Option<Coord2>,
    start_zone: StartZone,
}

impl<'a, R: Rng> RandomMinePlacer<'a, R> {
    pub fn new(rng: &'a mut R, start: Option<Coord2>, start_zone: StartZone) -> Self {
        Self {
            rng,
            start,
            start_zone,
        }
    }
}

impl<R: Rng> MinePlacer for RandomMinePlacer<'_, R> {
    fn place(self, config: GameConfig) -> MineLayout {
        use StartZone::*;

        let config = GameConfig::new(config.size, config.mines);
        let size = config.size;
        let total_cells = config.total_cells();

        let (start, start_zone) = match self.start {
            Some(start) if in_bounds(start, size) => (start, self.start_zone),
            _ => ((0, 0), Anywhere),
        };

        let neighborhood_cells = 1 + neighbors(start, size).count() as CellCount;
        let actual_start_zone = match start_zone {
            Anywhere => Anywhere,
            Cell | Neighborhood if config.mines + 1 > total_cells => {
                log::warn!("Cannot keep start cell safe, fallback to anywhere");
                Anywhere
            }
            Cell => Cell,
            Neighborhood if config.mines + neighborhood_cells > total_cells => {
                log::warn!(
                    "Start neighborhood of {} cells does not fit next to {} mines, fallback to start cell",
                    neighborhood_cells,
                    config.mines
                );
                Cell
            }
            Neighborhood => Neighborhood,
        };

        let mut excluded: Array2<bool> = Array2::default(size.to_nd_index());
        let excluded_cells = match actual_start_zone {
            Anywhere => 0,
            Cell => {
                excluded[start.to_nd_index()] = true;
                1
            }
            Neighborhood => {
                excluded[start.to_nd_index()] = true;
                for coords in neighbors(start, size) {
                    excluded[coords.to_nd_index()] = true;
                }
                neighborhood_cells
            }
        };

        let target = config.mines.min(total_cells - excluded_cells);
        if target != config.mines {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                config.mines,
                target
            );
        }

        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mines_placed = 0;
        while mines_placed < target {
            let coords = (
                self.rng.random_range(0..size.0),
                self.rng.random_range(0..size.1),
            );
            let index = coords.to_nd_index();
            if excluded[index] || mines[index] {
                continue;
            }
            mines[index] = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} board ({:?} around {:?})",
            mines_placed,
            size.0,
            size.1,
            actual_start_zone,
            self.start
        );
        MineLayout::from_mine_mask(size, mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn place(config: GameConfig, start: Option<Coord2>, zone: StartZone, seed: u64) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(seed);
        RandomMinePlacer::new(&mut rng, start, zone).place(config)
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..50 {
            let config = GameConfig::new((9, 9), 10);
            assert_eq!(place(config, None, StartZone::Anywhere, seed).mine_count(), 10);
        }
    }

    #[test]
    fn neighborhood_stays_clear() {
        let config = GameConfig::new((9, 9), 30);
        for seed in 0..200 {
            let layout = place(config, Some((4, 4)), StartZone::Neighborhood, seed);
            assert_eq!(layout.mine_count(), 30);
            assert!(!layout.contains_mine((4, 4)));
            assert!(neighbors((4, 4), (9, 9)).all(|pos| !layout.contains_mine(pos)));
            assert_eq!(layout.adjacent_mine_count((4, 4)), 0);
        }
    }

    #[test]
    fn exactly_fitting_neighborhood_fills_the_rest() {
        // 81 cells, 9 kept clear, 72 mines
        let layout = place(GameConfig::new((9, 9), 72), Some((4, 4)), StartZone::Neighborhood, 3);
        assert_eq!(layout.mine_count(), 72);
        assert!(!layout.contains_mine((4, 4)));
        assert!(!layout.contains_mine((3, 5)));
        assert!(layout.contains_mine((0, 0)));
        assert!(layout.contains_mine((8, 8)));
    }

    #[test]
    fn tiny_board_falls_back_to_start_cell() {
        // neighborhood of the center covers the whole 3x3 board
        let layout = place(GameConfig::new((3, 3), 8), Some((1, 1)), StartZone::Neighborhood, 7);
        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));

        let layout = place(GameConfig::new((2, 2), 3), Some((0, 0)), StartZone::Neighborhood, 7);
        assert_eq!(layout.mine_count(), 3);
        assert!(!layout.contains_mine((0, 0)));
    }

    #[test]
    fn corner_neighborhood_is_clipped_before_fallback() {
        // corner zone is 4 cells, 16 - 4 = 12 mines still fit
        let layout = place(GameConfig::new((4, 4), 12), Some((0, 0)), StartZone::Neighborhood, 11);
        assert_eq!(layout.mine_count(), 12);
        for pos in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(!layout.contains_mine(pos));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((16, 16), 40);
        let first = place(config, Some((3, 5)), StartZone::Neighborhood, 42);
        let second = place(config, Some((3, 5)), StartZone::Neighborhood, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_start_is_ignored() {
        let layout = place(GameConfig::new((3, 3), 4), Some((9, 9)), StartZone::Cell, 1);
        assert_eq!(layout.mine_count(), 4);
    }

    #[test]
    fn unchecked_config_is_clamped_first() {
        let config = GameConfig::new_unchecked((4, 4), CellCount::MAX);
        let layout = place(config, Some((0, 0)), StartZone::Neighborhood, 2);

        assert_eq!(layout.mine_count(), 15);
        assert!(!layout.contains_mine((0, 0)));
    }

    #[test]
    fn unchecked_empty_board_gets_one_cell() {
        let layout = place(GameConfig::new_unchecked((0, 0), 3), None, StartZone::Anywhere, 0);

        assert_eq!(layout.size(), (1, 1));
        assert_eq!(layout.mine_count(), 0);
    }
}
