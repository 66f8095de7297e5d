use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage rejected write: {0}")]
    WriteRejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Could not encode leaderboard: {0}")]
    Encode(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
