use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board must be at least one cell wide and tall")]
    EmptyBoard,
    #[error("Mine density must be a percentage between 0 and 100")]
    InvalidDensity,
    #[error("Mine layout does not match the board configuration")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
