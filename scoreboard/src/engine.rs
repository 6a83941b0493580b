//! Incremental aggregation of a match from the decoder's event stream.

use std::collections::HashMap;
use std::time::Duration;

use crate::{
    event::{self, Event},
    model::{Match, Player, Round},
    DecodeError, DemoSource, Error, GameState, Header, Label, Participant, PlayerId, Side,
};

mod combat;
mod round;

pub struct Config {
    pub match_id: String,
    /// A kill counts as a trade if it happens less than this after the traded kill.
    pub trade_window: Duration,
    /// Flashes at least this long count as effective.
    pub effective_flash: Duration,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_id: String::new(),
            trade_window: Duration::from_secs(5),
            effective_flash: Duration::from_secs(2),
            started_at: chrono::Utc::now(),
        }
    }
}

#[derive(Debug)]
struct ParsingState {
    /// Number of rounds started, the current round is stored at `round - 1`
    round: usize,
    round_ongoing: bool,
    round_started_at: Duration,
    side_a: Side,
    warmup_kills: Vec<event::Kill>,
}

impl Default for ParsingState {
    fn default() -> Self {
        Self {
            round: 0,
            round_ongoing: false,
            round_started_at: Duration::ZERO,
            side_a: Side::CounterTerrorist,
            warmup_kills: Vec::new(),
        }
    }
}

/// Owns the match being built while the event stream is consumed.
pub struct Engine<'c> {
    config: &'c Config,
    state: ParsingState,
    /// Slot of every known player in `game.players`, the list is append only
    index: HashMap<PlayerId, usize>,
    game: Match,
}

/// Aggregates the whole stream of `source` into a finished scoreboard.
#[tracing::instrument(name = "Scoreboard", skip(config, source), fields(match_id = %config.match_id))]
pub fn parse<S>(config: &Config, source: &mut S) -> Result<Match, Error>
where
    S: DemoSource,
{
    let header = source.header().map_err(|e| match e {
        DecodeError::MissingHeader => Error::MissingHeader,
        other => Error::Decode(other),
    })?;

    let mut engine = Engine::new(config, header);
    while let Some(event) = source.next_event() {
        let event = event?;
        engine.handle(&event, source.state())?;
    }

    let result = engine.finish(source.state());
    tracing::info!(
        rounds = result.rounds.len(),
        players = result.players.len(),
        "Finished match"
    );

    Ok(result)
}

impl<'c> Engine<'c> {
    pub fn new(config: &'c Config, header: Header) -> Self {
        let mut game = Match {
            match_id: config.match_id.clone(),
            ..Default::default()
        };
        game.general.map_name = header.map_name;
        game.general.match_time = config.started_at;

        Self {
            config,
            state: ParsingState::default(),
            index: HashMap::new(),
            game,
        }
    }

    /// Applies a single event, `state` must describe the game at the position of that event.
    pub fn handle(&mut self, event: &Event, state: &dyn GameState) -> Result<(), Error> {
        tracing::trace!(?event, "Handling event");

        match event {
            Event::MatchStart => self.match_start(state),
            Event::RoundStart => self.round_start(state),
            Event::RoundEnd(end) => self.round_end(end, state)?,
            Event::ScoreUpdated => self.score_updated(state),
            Event::Kill(kill) => self.kill(kill, state)?,
            Event::PlayerHurt(hurt) => self.player_hurt(hurt, state)?,
            Event::WeaponFire(fire) => self.weapon_fire(fire, state)?,
            Event::PlayerFlashed(flashed) => self.player_flashed(flashed, state),
            Event::BombPlanted(bomb) => self.bomb_planted(bomb, state)?,
            Event::BombDefused(bomb) => self.bomb_defused(bomb, state)?,
            Event::BombExploded(bomb) => {
                tracing::debug!(planter = ?bomb.player, "Bomb exploded");
            }
            Event::RankUpdate(update) => self.rank_update(update),
            Event::RoundMvp(mvp) => self.round_mvp(mvp, state)?,
        };

        Ok(())
    }

    /// Runs the derived metrics and hands over the finished match.
    pub fn finish(mut self, state: &dyn GameState) -> Match {
        self.game.general.match_duration = state.current_time();
        self.game.general.winner = match self.game.general.score_a.cmp(&self.game.general.score_b) {
            std::cmp::Ordering::Greater => Some(Label::A),
            std::cmp::Ordering::Less => Some(Label::B),
            std::cmp::Ordering::Equal => None,
        };

        crate::derived::calculate(&mut self.game);

        self.game
    }

    /// The aggregate as built so far.
    pub fn current(&self) -> &Match {
        &self.game
    }

    /// Kills observed before the match started or during warmup.
    pub fn warmup_kills(&self) -> &[event::Kill] {
        &self.state.warmup_kills
    }

    pub fn side_a(&self) -> Side {
        self.state.side_a
    }

    pub fn round_ongoing(&self) -> bool {
        self.state.round_ongoing
    }

    /// Whether events currently count towards the statistics.
    fn counting(&self, state: &dyn GameState) -> bool {
        self.game.match_valid && !state.is_warmup()
    }

    fn label_of(&self, side: Side) -> Label {
        if side == self.state.side_a {
            Label::A
        } else {
            Label::B
        }
    }

    fn current_round_index(&self) -> Option<usize> {
        self.state
            .round
            .checked_sub(1)
            .filter(|idx| *idx < self.game.rounds.len())
    }

    fn current_round_mut(&mut self) -> Option<&mut Round> {
        let idx = self.current_round_index()?;
        self.game.rounds.get_mut(idx)
    }

    /// Slot of the player with the given id, creating the player if it is a participant
    /// that was not seen so far.
    fn resolve(&mut self, id: PlayerId, state: &dyn GameState) -> Result<usize, Error> {
        if let Some(slot) = self.index.get(&id) {
            return Ok(*slot);
        }

        let participant = state.participant(id).ok_or(Error::UnknownPlayer(id))?;
        tracing::warn!(player = %id, name = %participant.name, "Created new player");

        Ok(self.insert(participant))
    }

    fn insert(&mut self, participant: &Participant) -> usize {
        if let Some(slot) = self.index.get(&participant.id) {
            return *slot;
        }

        let player = Player::new(participant, self.label_of(participant.side));
        let slot = self.game.players.len();
        self.game.players.push(player);
        self.index.insert(participant.id, slot);

        slot
    }
}
