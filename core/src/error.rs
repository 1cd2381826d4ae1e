use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match 3 rows of 9 tiles")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Tile is not available for selection")]
    TileUnavailable,
    #[error("Dice can only be rolled or changed before selecting tiles")]
    NotRollPhase,
    #[error("A single die is only allowed once the front rows are shut and no open tile exceeds 6")]
    OneDieNotAllowed,
    #[error("Die faces must be between 1 and 6")]
    InvalidDieFace,
}

pub type Result<T> = core::result::Result<T, GameError>;
