//! Automated player working only through [`Playfield`].
//!
//! Every call applies the first strategy that changes the board:
//! forced flags, then forced reveals, then the lowest estimated risk guess,
//! and finally a uniform random pick when no number touches a hidden cell.

use alloc::vec::Vec;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::*;

mod deduce;

/// What one solver call did to the board.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverMove {
    MarkedMines(Vec<Coord2>),
    RevealedSafe(Vec<Coord2>),
    /// Revealed the cell with the lowest estimated mine probability.
    Guess { coords: Coord2, probability: f64 },
    /// Revealed a uniformly chosen hidden cell, nothing was known locally.
    RandomPick(Coord2),
}

impl SolverMove {
    pub fn is_guess(&self) -> bool {
        matches!(self, Self::Guess { .. } | Self::RandomPick(_))
    }
}

impl fmt::Display for SolverMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkedMines(cells) => write!(f, "Marked {} mine(s)", cells.len()),
            Self::RevealedSafe(cells) => write!(f, "Revealed {} safe cell(s)", cells.len()),
            Self::Guess {
                coords,
                probability,
            } => write!(
                f,
                "Guessed {coords:?} at {:.1}% mine chance",
                probability * 100.0
            ),
            Self::RandomPick(coords) => write!(f, "Picked {coords:?} at random"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Solver {
    rng: SmallRng,
}

impl Solver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Makes one move, `false` once the game is over or nothing is left to
    /// reveal.
    pub fn make_move<P: Playfield>(&mut self, field: &mut P) -> Result<bool> {
        Ok(self.step(field)?.is_some())
    }

    /// Like [`Solver::make_move`], reporting which strategy acted.
    pub fn step<P: Playfield>(&mut self, field: &mut P) -> Result<Option<SolverMove>> {
        if field.is_game_over() {
            return Ok(None);
        }

        let solver_move = self.choose_move(field)?;
        if let Some(solver_move) = &solver_move {
            log::debug!("{solver_move}");
        }
        Ok(solver_move)
    }

    fn choose_move<P: Playfield>(&mut self, field: &mut P) -> Result<Option<SolverMove>> {
        let marked = deduce::mark_mines(field)?;
        if !marked.is_empty() {
            return Ok(Some(SolverMove::MarkedMines(marked)));
        }

        let revealed = deduce::reveal_safe_cells(field)?;
        if !revealed.is_empty() {
            return Ok(Some(SolverMove::RevealedSafe(revealed)));
        }

        let map = ProbabilityMap::estimate(&*field);
        if map.has_local_data() {
            let (cells, probability) = map.safest_cells();
            if let Some(&coords) = cells.choose(&mut self.rng) {
                field.reveal(coords)?;
                return Ok(Some(SolverMove::Guess {
                    coords,
                    probability,
                }));
            }
        }

        let hidden: Vec<_> = iter_coords(field.size())
            .filter(|&coords| field.cell_at(coords).is_hidden())
            .collect();
        let Some(&coords) = hidden.choose(&mut self.rng) else {
            return Ok(None);
        };
        field.reveal(coords)?;
        Ok(Some(SolverMove::RandomPick(coords)))
    }
}
