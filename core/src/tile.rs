use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
///
/// A cell is flagged or revealed, never both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Flagged,
    /// Revealed safe cell with its adjacent mine count.
    Revealed(u8),
    /// Revealed mine, only ever present once the game is lost.
    Detonated,
}

impl EngineCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// Adjacent mine count of a revealed numbered cell (`1..=8`).
    pub const fn clue(self) -> Option<u8> {
        match self {
            Self::Revealed(count) if count > 0 => Some(count),
            _ => None,
        }
    }
}
