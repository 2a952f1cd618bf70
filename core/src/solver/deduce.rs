use alloc::vec::Vec;

use crate::*;

/// Flags the hidden neighbors of every number that can only be satisfied by
/// all of them being mines.
///
/// The board is re-read at every number, so a cell flagged for one number is
/// already counted as a flag by the next.
pub(crate) fn mark_mines(field: &mut impl Playfield) -> Result<Vec<Coord2>> {
    let mut marked = Vec::new();

    for clue in iter_coords(field.size()) {
        let Some(constraint) = LocalConstraint::at(&*field, clue) else {
            continue;
        };
        if !constraint.forces_mines() {
            continue;
        }

        for coords in constraint.hidden {
            if field.toggle_flag(coords)? {
                marked.push(coords);
            }
        }
    }

    Ok(marked)
}

/// Reveals the hidden neighbors of every number whose mines are all flagged.
pub(crate) fn reveal_safe_cells(field: &mut impl Playfield) -> Result<Vec<Coord2>> {
    let mut revealed = Vec::new();

    for clue in iter_coords(field.size()) {
        if field.is_game_over() {
            break;
        }
        let Some(constraint) = LocalConstraint::at(&*field, clue) else {
            continue;
        };
        if !constraint.forces_safe() {
            continue;
        }

        for coords in constraint.hidden {
            if field.reveal(coords)?.has_update() {
                revealed.push(coords);
            }
        }
    }

    Ok(revealed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn flags_cells_forced_by_their_numbers() {
        let mut board = board((7, 1), &[(0, 0), (5, 0)]);
        board.reveal((2, 0)).unwrap();

        assert_eq!(mark_mines(&mut board).unwrap(), [(0, 0), (5, 0)]);
        assert_eq!(board.flag_count(), 2);
        assert!(mark_mines(&mut board).unwrap().is_empty());
    }

    #[test]
    fn flags_from_earlier_numbers_count_for_later_ones() {
        let mut board = board((5, 1), &[(1, 0), (3, 0)]);
        board.reveal((0, 0)).unwrap();
        board.reveal((2, 0)).unwrap();

        assert_eq!(mark_mines(&mut board).unwrap(), [(1, 0), (3, 0)]);
        assert_eq!(board.cell_at((1, 0)), EngineCell::Flagged);
        assert_eq!(board.flag_count(), 2);
        assert!(reveal_safe_cells(&mut board).unwrap().is_empty());
        assert_eq!(board.cell_at((4, 0)), EngineCell::Hidden);
    }

    #[test]
    fn reveals_cells_next_to_satisfied_numbers() {
        let mut board = board((4, 2), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        let revealed = reveal_safe_cells(&mut board).unwrap();

        assert!(revealed.contains(&(1, 0)));
        assert!(revealed.contains(&(0, 1)));
        assert!(board.is_game_won());
        assert_eq!(board.cell_at((0, 0)), EngineCell::Flagged);
    }

    #[test]
    fn unsatisfied_numbers_leave_board_alone() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();

        assert!(mark_mines(&mut board).unwrap().is_empty());
        assert!(reveal_safe_cells(&mut board).unwrap().is_empty());
        assert_eq!(board.flag_count(), 0);
    }
}
