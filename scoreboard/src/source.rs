use crate::{event::Event, DecodeError, GameState};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    pub map_name: String,
}

/// A decoded demo: its header, an ordered stream of events and the game state at the
/// position of the most recently returned event.
pub trait DemoSource {
    type State: GameState;

    fn header(&mut self) -> Result<Header, DecodeError>;

    /// The next event, `None` once the stream is exhausted.
    fn next_event(&mut self) -> Option<Result<Event, DecodeError>>;

    fn state(&self) -> &Self::State;
}
