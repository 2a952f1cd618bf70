use std::time::Duration;

use anyhow::{Result, bail};
use sweepr_core::{Board, Coord2, Difficulty, GameConfig, Solver};
use web_time::Instant;

use crate::render::render;
use crate::stats::GameRecord;

/// How every game of a session is set up.
#[derive(Clone, Debug)]
pub struct GameSetup {
    /// Label the games are recorded under, even when a custom board matches a
    /// preset.
    pub difficulty: Difficulty,
    pub config: GameConfig,
    pub first_click: Option<Coord2>,
    pub delay: Duration,
    pub show_board: bool,
}

#[derive(Debug)]
pub struct GameReport {
    pub record: GameRecord,
    pub moves: usize,
    pub guesses: usize,
    pub board: Board,
}

/// Plays one game to the end with the solver.
pub fn play_game(setup: &GameSetup, board_seed: u64, solver_seed: u64) -> Result<GameReport> {
    let mut board = Board::new(setup.config, setup.first_click, board_seed)?;
    let mut solver = Solver::new(solver_seed);
    let mut moves = 0;
    let mut guesses = 0;

    let started = Instant::now();
    if let Some(coords) = setup.first_click {
        board.reveal(coords)?;
        moves += 1;
        show(setup, &board);
    }

    while let Some(solver_move) = solver.step(&mut board)? {
        moves += 1;
        if solver_move.is_guess() {
            guesses += 1;
        }
        if setup.show_board {
            println!("{solver_move}");
        }
        show(setup, &board);
        if !setup.delay.is_zero() && !board.is_game_over() {
            std::thread::sleep(setup.delay);
        }
    }
    let elapsed = started.elapsed();

    if !board.is_game_over() {
        bail!("Solver stopped before the game ended");
    }

    Ok(GameReport {
        record: GameRecord {
            won: board.is_game_won(),
            elapsed,
            difficulty: setup.difficulty,
        },
        moves,
        guesses,
        board,
    })
}

fn show(setup: &GameSetup, board: &Board) {
    if setup.show_board {
        println!("{}\n", render(board));
    }
}
