use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout must leave at least one safe cell")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
