//! Aggregates the event stream of a decoded competitive match into a scoreboard.

mod error;
pub use error::{DecodeError, Error};

mod gamestate;
pub use gamestate::{GameState, Label, Participant, PlayerId, Side};

mod source;
pub use source::{DemoSource, Header};

pub mod event;
pub mod model;

pub mod engine;
pub use engine::{parse, Config, Engine};

pub mod derived;
pub mod summary;

pub mod recorded;
