use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(&'static str),
    #[error("no cards left to draw")]
    DeckExhausted,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot holds {0} cards instead of 108")]
    CardCountMismatch(usize),
    #[error("snapshot has an empty discard pile")]
    EmptyDiscardPile,
    #[error("snapshot top card carries no color")]
    ColorlessTopCard,
}

#[derive(Error, Debug)]
#[error("persistence gateway failure: {0}")]
pub struct PersistenceError(pub String);

pub type Result<T, E = GameError> = std::result::Result<T, E>;
