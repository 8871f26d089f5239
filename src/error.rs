//! Error types for the game engine and its terminal shell

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A word that is empty or contains anything but ASCII letters
    #[error("invalid word {0:?}: words must be one or more ASCII letters")]
    InvalidWord(String),

    #[error("word pool is empty")]
    EmptyWordPool,

    #[error("monster roster is empty")]
    EmptyRoster,

    /// A numeric setting outside its allowed range
    #[error("{name} must be between 1 and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        max: u64,
    },

    /// Shuffled word bank has handed out every word it holds
    #[error("no words left in the pool")]
    PoolExhausted,

    /// The input stream ended (or the player hit ctrl+c)
    #[error("input closed")]
    InputClosed,

    #[error("terminal i/o failed")]
    Io(#[from] std::io::Error),
}
