use thiserror::Error;

use crate::PlayerId;

/// Failures reported by a [`DemoSource`](crate::DemoSource) while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("the demo stream ended unexpectedly")]
    UnexpectedEof,

    #[error("the demo stream is corrupt: {0}")]
    Corrupt(String),

    #[error("the demo header is not available")]
    MissingHeader,
}

/// Errors that abort the aggregation of a match.
#[derive(Debug, Error)]
pub enum Error {
    /// Header metadata could not be read, no events were processed.
    #[error("missing demo header")]
    MissingHeader,

    /// The decoder failed while producing events.
    #[error("decoding demo: {0}")]
    Decode(#[from] DecodeError),

    /// An event referenced a player that is neither known nor a current participant.
    #[error("unresolvable player {0}")]
    UnknownPlayer(PlayerId),
}
