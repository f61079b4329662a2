use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("maze size {0} is too small, need at least 5")]
    SizeTooSmall(usize),
    #[error("maze size {0} must be odd")]
    SizeNotOdd(usize),
}

pub type Result<T> = std::result::Result<T, GameError>;
