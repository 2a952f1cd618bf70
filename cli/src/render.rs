use std::fmt::Write;

use sweepr_core::*;

/// Text board, one row per line: `#` hidden, `F` flag, `.` empty, digits for
/// counts, `X` the detonated mine. Once the game is over the remaining mines
/// show as `*`.
pub fn render(board: &Board) -> String {
    let (width, height) = (board.width(), board.height());
    let show_mines = board.is_game_over();
    let mut out = String::with_capacity((usize::from(width) + 1) * usize::from(height));

    for y in 0..height {
        for x in 0..width {
            let coords = (x, y);
            let ch = match board.cell_at(coords) {
                EngineCell::Hidden if show_mines && board.has_mine_at(coords) => '*',
                EngineCell::Hidden => '#',
                EngineCell::Flagged => 'F',
                EngineCell::Revealed(0) => '.',
                EngineCell::Revealed(count) => char::from(b'0' + count),
                EngineCell::Detonated => 'X',
            };
            out.push(ch);
        }
        out.push('\n');
    }

    let _ = write!(out, "mines left: {}", board.mines_left());
    out
}
