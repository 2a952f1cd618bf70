use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No cell revealed yet, mines may still be unplaced.
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// State of one game. Created once per game and never reset.
///
/// Without a first click the mines are placed by the first [`Board::reveal`],
/// keeping the revealed cell and its neighborhood clear.
#[derive(Clone, Debug)]
pub struct Board {
    config: GameConfig,
    mine_layout: Option<MineLayout>,
    board: Array2<EngineCell>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    rng: SmallRng,
}

impl Board {
    /// New board for `config` (re-clamped, see [`GameConfig::new`]).
    ///
    /// With a `first_click` the mines are placed right away around it; the
    /// click itself is not revealed.
    pub fn new(config: GameConfig, first_click: Option<Coord2>, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines);
        let mut board = Self {
            config,
            mine_layout: None,
            board: Array2::default(config.size.to_nd_index()),
            state: EngineState::default(),
            triggered_mine: None,
            rng: SmallRng::seed_from_u64(seed),
        };

        if let Some(coords) = first_click {
            let coords = board.validate_coords(coords)?;
            board.place_mines(coords);
        }

        Ok(board)
    }

    /// Board over a fixed layout, mines count as already placed.
    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let config = mine_layout.game_config();
        Self {
            config,
            mine_layout: Some(mine_layout),
            board: Array2::default(config.size.to_nd_index()),
            state: EngineState::default(),
            triggered_mine: None,
            rng: SmallRng::seed_from_u64(0),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_game_won(&self) -> bool {
        matches!(self.state, EngineState::Won)
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mine_layout.is_some()
    }

    /// Placement of the mines, `None` until placed. Meant for showing the
    /// board after the game and for tests, not for playing.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout
            .as_ref()
            .is_some_and(|layout| layout.contains_mine(coords))
    }

    /// Remaining-mine estimate for display, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flag_count() as isize)
    }

    /// # Panics
    ///
    /// Panics if `coords` is outside the board, see [`Board::validate_coords`].
    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Counted on every call.
    pub fn flag_count(&self) -> CellCount {
        self.board.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    /// Whether every non-mine cell has been revealed.
    pub fn is_solved(&self) -> bool {
        iter_coords(self.config.size).all(|coords| {
            self.has_mine_at(coords) || matches!(self.cell_at(coords), EngineCell::Revealed(_))
        })
    }

    /// Whether a chord at `coords` would currently reveal anything.
    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        if self.state.is_finished() || !in_bounds(coords, self.config.size) {
            return false;
        }

        match self.cell_at(coords).clue() {
            Some(count) => {
                count == self.count_flagged_neighbors(coords)
                    && neighbors(coords, self.config.size)
                        .any(|pos| self.cell_at(pos).is_hidden())
            }
            None => false,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        use EngineCell::*;

        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(false);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        *cell = match *cell {
            Hidden => Flagged,
            Flagged => Hidden,
            Revealed(_) | Detonated => return Ok(false),
        };
        Ok(true)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() || !self.cell_at(coords).is_hidden() {
            return Ok(RevealOutcome::NoOp);
        }

        if self.mine_layout.is_none() {
            self.place_mines(coords);
        }

        Ok(self.reveal_single_cell(coords))
    }

    /// Reveals every unflagged hidden neighbor of a numbered cell whose flag
    /// count matches its number. Stops at the first mine.
    pub fn chord(&mut self, coords: Coord2) -> Result<ChordOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(ChordOutcome::Rejected);
        }

        let Some(count) = self.cell_at(coords).clue() else {
            return Ok(ChordOutcome::Rejected);
        };
        if count != self.count_flagged_neighbors(coords) {
            return Ok(ChordOutcome::Rejected);
        }

        let mut outcome = ChordOutcome::Rejected;
        for pos in neighbors(coords, self.config.size) {
            if self.state.is_finished() {
                break;
            }
            match self.reveal_single_cell(pos) {
                RevealOutcome::MineHit => return Ok(ChordOutcome::MineHit),
                RevealOutcome::Safe => outcome = ChordOutcome::Progressed,
                RevealOutcome::NoOp => {}
            }
        }

        Ok(outcome)
    }

    fn place_mines(&mut self, start: Coord2) {
        let layout = RandomMinePlacer::new(&mut self.rng, Some(start), StartZone::Neighborhood)
            .place(self.config);
        self.mine_layout = Some(layout);
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(layout) = self.mine_layout.as_ref() else {
            return RevealOutcome::NoOp;
        };
        if !self.board[coords.to_nd_index()].is_hidden() {
            return RevealOutcome::NoOp;
        }

        if layout.contains_mine(coords) {
            self.board[coords.to_nd_index()] = EngineCell::Detonated;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::MineHit;
        }

        let adjacent_mines = layout.adjacent_mine_count(coords);
        self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);

        if adjacent_mines == 0 {
            let size = self.config.size;
            let mut visited = BTreeSet::from([coords]);
            let mut to_visit = VecDeque::from([coords]);

            while let Some(center) = to_visit.pop_front() {
                for pos in neighbors(center, size) {
                    if !visited.insert(pos) || !self.board[pos.to_nd_index()].is_hidden() {
                        continue;
                    }

                    let visit_adjacent_mines = layout.adjacent_mine_count(pos);
                    self.board[pos.to_nd_index()] = EngineCell::Revealed(visit_adjacent_mines);

                    if visit_adjacent_mines == 0 {
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        if self.is_solved() {
            self.end_game(true);
        } else {
            self.mark_started();
        }
        RevealOutcome::Safe
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!("Game over: {:?}", self.state);
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.config.size)
            .filter(|&pos| self.cell_at(pos).is_flagged())
            .count() as u8
    }
}

impl BoardView for Board {
    fn size(&self) -> Coord2 {
        Board::size(self)
    }

    fn total_mines(&self) -> CellCount {
        Board::total_mines(self)
    }

    fn cell_at(&self, coords: Coord2) -> EngineCell {
        Board::cell_at(self, coords)
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn is_game_won(&self) -> bool {
        Board::is_game_won(self)
    }

    fn flag_count(&self) -> CellCount {
        Board::flag_count(self)
    }
}

impl Playfield for Board {
    fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        Board::reveal(self, coords)
    }

    fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        Board::toggle_flag(self, coords)
    }

    fn chord(&mut self, coords: Coord2) -> Result<ChordOutcome> {
        Board::chord(self, coords)
    }
}
