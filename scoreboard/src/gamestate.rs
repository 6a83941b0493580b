//! The point-in-time view of the game the decoder exposes next to its event stream.

use std::time::Duration;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The in-game side a participant currently plays on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Unassigned,
    Spectator,
    Terrorist,
    CounterTerrorist,
}

impl Side {
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Terrorist | Self::CounterTerrorist)
    }

    /// The other playing side. Non-playing sides have no opponent and map to themselves.
    pub fn opponent(self) -> Self {
        match self {
            Self::Terrorist => Self::CounterTerrorist,
            Self::CounterTerrorist => Self::Terrorist,
            other => other,
        }
    }
}

/// Match-long identity of one of the two competing teams, independent of the side
/// the team currently plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Label {
    A,
    B,
}

impl Label {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub clan_tag: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default = "full_health")]
    pub health: u32,
    #[serde(default = "alive")]
    pub alive: bool,
}

fn full_health() -> u32 {
    100
}

fn alive() -> bool {
    true
}

impl Participant {
    pub fn new(id: u64, name: impl Into<String>, side: Side) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            is_bot: false,
            clan_tag: String::new(),
            side,
            health: full_health(),
            alive: true,
        }
    }
}

/// Queries the engine issues while handling an event.
///
/// All answers describe the game *before* the effects of the event currently being
/// handled are applied, e.g. `health` of a hurt player is the health prior to the hit.
pub trait GameState {
    fn participants(&self) -> &[Participant];

    fn team_score(&self, side: Side) -> u32;

    /// Elapsed time since the start of the stream.
    fn current_time(&self) -> Duration;

    fn is_warmup(&self) -> bool;

    fn participant(&self, id: PlayerId) -> Option<&Participant> {
        self.participants().iter().find(|p| p.id == id)
    }

    /// Participants currently on one of the two playing sides.
    fn playing(&self) -> Vec<&Participant> {
        self.participants()
            .iter()
            .filter(|p| p.side.is_playing())
            .collect()
    }

    fn team_members(&self, side: Side) -> Vec<PlayerId> {
        self.participants()
            .iter()
            .filter(|p| p.side == side)
            .map(|p| p.id)
            .collect()
    }

    fn alive_on(&self, side: Side) -> usize {
        self.participants()
            .iter()
            .filter(|p| p.side == side && p.alive)
            .count()
    }

    fn health(&self, id: PlayerId) -> u32 {
        self.participant(id).map(|p| p.health).unwrap_or(0)
    }
}
