//! A [`DemoSource`] replaying a recorded sequence of events and game state changes.
//!
//! State frames are applied in order while looking for the next event, so every
//! event observes the state built by the frames before it.

use std::time::Duration;

use crate::{event::Event, DecodeError, DemoSource, GameState, Header, Participant, PlayerId, Side};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame {
    Event { event: Event },
    /// Moves the clock to an absolute position.
    Time { millis: u64 },
    Warmup { active: bool },
    Join { participant: Participant },
    Leave { player: PlayerId },
    Side { player: PlayerId, side: Side },
    /// A health of zero marks the player dead.
    Health { player: PlayerId, health: u32 },
    /// Brings every participant on a playing side back to full health.
    Respawn,
    Score { side: Side, score: u32 },
    /// The stream breaks off at this point.
    Truncated,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Recording {
    pub header: Option<Header>,
    pub frames: Vec<Frame>,
}

impl Recording {
    pub fn new(map_name: impl Into<String>) -> Self {
        Self {
            header: Some(Header {
                map_name: map_name.into(),
            }),
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: Frame) -> &mut Self {
        self.frames.push(frame);
        self
    }

    pub fn event(&mut self, event: Event) -> &mut Self {
        self.push(Frame::Event { event })
    }

    pub fn at(&mut self, millis: u64) -> &mut Self {
        self.push(Frame::Time { millis })
    }

    pub fn join(&mut self, participant: Participant) -> &mut Self {
        self.push(Frame::Join { participant })
    }

    pub fn health(&mut self, player: u64, health: u32) -> &mut Self {
        self.push(Frame::Health {
            player: PlayerId(player),
            health,
        })
    }

    pub fn side(&mut self, player: u64, side: Side) -> &mut Self {
        self.push(Frame::Side {
            player: PlayerId(player),
            side,
        })
    }

    pub fn score(&mut self, side: Side, score: u32) -> &mut Self {
        self.push(Frame::Score { side, score })
    }

    pub fn stream(&self) -> RecordedStream {
        RecordedStream::from(self.clone())
    }
}

/// Game state as built by the state frames seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    pub score_t: u32,
    pub score_ct: u32,
    pub time: Duration,
    pub warmup: bool,
}

impl Snapshot {
    fn apply(&mut self, frame: Frame) {
        match frame {
            Frame::Time { millis } => {
                self.time = Duration::from_millis(millis);
            }
            Frame::Warmup { active } => {
                self.warmup = active;
            }
            Frame::Join { participant } => {
                self.participants.retain(|p| p.id != participant.id);
                self.participants.push(participant);
            }
            Frame::Leave { player } => {
                self.participants.retain(|p| p.id != player);
            }
            Frame::Side { player, side } => {
                if let Some(p) = self.participants.iter_mut().find(|p| p.id == player) {
                    p.side = side;
                }
            }
            Frame::Health { player, health } => {
                if let Some(p) = self.participants.iter_mut().find(|p| p.id == player) {
                    p.health = health;
                    p.alive = health > 0;
                }
            }
            Frame::Respawn => {
                for p in self.participants.iter_mut().filter(|p| p.side.is_playing()) {
                    p.health = 100;
                    p.alive = true;
                }
            }
            Frame::Score { side, score } => match side {
                Side::Terrorist => self.score_t = score,
                Side::CounterTerrorist => self.score_ct = score,
                _ => {}
            },
            Frame::Event { .. } | Frame::Truncated => {}
        };
    }
}

impl GameState for Snapshot {
    fn participants(&self) -> &[Participant] {
        &self.participants
    }

    fn team_score(&self, side: Side) -> u32 {
        match side {
            Side::Terrorist => self.score_t,
            Side::CounterTerrorist => self.score_ct,
            _ => 0,
        }
    }

    fn current_time(&self) -> Duration {
        self.time
    }

    fn is_warmup(&self) -> bool {
        self.warmup
    }
}

pub struct RecordedStream {
    header: Option<Header>,
    frames: std::vec::IntoIter<Frame>,
    state: Snapshot,
}

impl From<Recording> for RecordedStream {
    fn from(recording: Recording) -> Self {
        Self {
            header: recording.header,
            frames: recording.frames.into_iter(),
            state: Snapshot::default(),
        }
    }
}

impl DemoSource for RecordedStream {
    type State = Snapshot;

    fn header(&mut self) -> Result<Header, DecodeError> {
        self.header.clone().ok_or(DecodeError::MissingHeader)
    }

    fn next_event(&mut self) -> Option<Result<Event, DecodeError>> {
        loop {
            match self.frames.next()? {
                Frame::Event { event } => return Some(Ok(event)),
                Frame::Truncated => return Some(Err(DecodeError::UnexpectedEof)),
                other => self.state.apply(other),
            };
        }
    }

    fn state(&self) -> &Snapshot {
        &self.state
    }
}
