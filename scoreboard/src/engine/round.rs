use super::*;

use crate::event::{RoundEnd, WinReason};

/// Share of a round awarded for planting the exploded bomb or defusing it.
const OBJECTIVE_SHARES: f64 = 30.0;
const ROUND_SHARES: f64 = 100.0;

/// Determines which side team A plays on right now.
///
/// The first player labeled A that is found on one of the playing sides decides. If
/// none is found, e.g. because all of team A disconnected, `current` is kept.
pub(crate) fn resolve_side_a(players: &[Player], state: &dyn GameState, current: Side) -> Side {
    let ct = state.team_members(Side::CounterTerrorist);
    let t = state.team_members(Side::Terrorist);

    players
        .iter()
        .filter(|p| p.label == Label::A)
        .find_map(|p| {
            if ct.contains(&p.id) {
                Some(Side::CounterTerrorist)
            } else if t.contains(&p.id) {
                Some(Side::Terrorist)
            } else {
                None
            }
        })
        .unwrap_or(current)
}

impl<'c> Engine<'c> {
    pub(super) fn match_start(&mut self, state: &dyn GameState) {
        if self.game.match_valid {
            tracing::debug!("Match restarted, discarding previous aggregate");

            self.game.players.clear();
            self.game.rounds.clear();
            self.game.general.score_a = 0;
            self.game.general.score_b = 0;
            self.index.clear();
            self.state.round = 0;
            self.state.round_ongoing = false;
        }

        // The team starting on CT is treated as team A
        self.state.side_a = Side::CounterTerrorist;
        self.game.match_valid = true;

        for participant in state.playing() {
            self.insert(participant);
        }

        self.game.round_damage = Default::default();
        self.game
            .round_damage
            .reset(self.game.players.iter().map(|p| p.id));

        tracing::debug!(players = self.game.players.len(), "Match started");
    }

    pub(super) fn round_start(&mut self, state: &dyn GameState) {
        if !self.game.match_valid {
            tracing::trace!("Ignoring round start before match start");
            return;
        }

        self.state.round_ongoing = true;

        // The counter is increased here and not on round end, things may still happen
        // between the end of one round and the start of the next
        self.state.round += 1;
        self.state.round_started_at = state.current_time();
        self.state.side_a = resolve_side_a(&self.game.players, state, self.state.side_a);

        self.game.rounds.push(Round::default());

        tracing::debug!(round = self.state.round, side_a = ?self.state.side_a, "Round started");
    }

    pub(super) fn round_end(&mut self, end: &RoundEnd, state: &dyn GameState) -> Result<(), Error> {
        if !self.state.round_ongoing {
            tracing::debug!("Ignoring round end without an ongoing round");
            return Ok(());
        }
        self.state.round_ongoing = false;

        let side_a = self.state.side_a;
        let winner = end.winner.is_playing().then(|| self.label_of(end.winner));
        let duration = state
            .current_time()
            .saturating_sub(self.state.round_started_at);

        let round_idx = match self.current_round_index() {
            Some(idx) => idx,
            None => return Ok(()),
        };
        let round = &mut self.game.rounds[round_idx];
        round.completed = true;
        round.duration = duration;
        round.winner_side = end.winner;
        round.winner = winner;
        round.win_reason = end.reason;
        round.survivors_a = state.alive_on(side_a);
        round.survivors_b = state.alive_on(side_a.opponent());

        tracing::debug!(round = round_idx + 1, ?winner, reason = ?end.reason, "Round ended");

        match winner {
            Some(Label::A) => self.game.general.score_a += 1,
            Some(Label::B) => self.game.general.score_b += 1,
            None => {}
        };

        if winner.is_some() {
            self.award_round_shares(round_idx, end, state)?;
        }

        self.game
            .round_damage
            .reset(self.game.players.iter().map(|p| p.id));

        Ok(())
    }

    /// Splits the round win shares among the members of the winning side.
    fn award_round_shares(
        &mut self,
        round_idx: usize,
        end: &RoundEnd,
        state: &dyn GameState,
    ) -> Result<(), Error> {
        let round = &self.game.rounds[round_idx];
        let objective = match (end.winner, end.reason) {
            (Side::CounterTerrorist, WinReason::BombDefused) => round.bomb_defuser,
            (Side::Terrorist, WinReason::BombExploded) => round.bomb_planter,
            _ => None,
        };

        let mut shares = ROUND_SHARES;
        if let Some(id) = objective {
            let slot = self.resolve(id, state)?;
            self.game.players[slot].rws += OBJECTIVE_SHARES;
            shares -= OBJECTIVE_SHARES;
        }

        let winners = state.team_members(end.winner);
        let total_damage: usize = winners
            .iter()
            .map(|id| self.game.round_damage.get(*id))
            .sum();

        tracing::debug!(total_damage, shares, "Splitting round win shares");

        if total_damage == 0 {
            return Ok(());
        }

        for id in winners {
            let damage = self.game.round_damage.get(id);
            if damage == 0 {
                continue;
            }

            let slot = self.resolve(id, state)?;
            let rws = shares * damage as f64 / total_damage as f64;
            self.game.players[slot].rws += rws;

            tracing::trace!(player = %id, rws, "Round win share");
        }

        Ok(())
    }

    pub(super) fn score_updated(&mut self, state: &dyn GameState) {
        let side_a = self.state.side_a;
        let score_a = state.team_score(side_a);
        let score_b = state.team_score(side_a.opponent());

        let round = match self.current_round_mut() {
            Some(r) => r,
            None => return,
        };
        round.score_a = score_a;
        round.score_b = score_b;

        self.game.general.score_a = score_a;
        self.game.general.score_b = score_b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sides(Vec<Participant>);

    impl GameState for Sides {
        fn participants(&self) -> &[Participant] {
            &self.0
        }

        fn team_score(&self, _: Side) -> u32 {
            0
        }

        fn current_time(&self) -> Duration {
            Duration::ZERO
        }

        fn is_warmup(&self) -> bool {
            false
        }
    }

    fn player(id: u64, label: Label) -> Player {
        Player::new(&Participant::new(id, format!("p{}", id), Side::Unassigned), label)
    }

    #[test]
    fn follows_team_a_across_side_swap() {
        let players = vec![player(1, Label::A), player(2, Label::B)];

        let first_half = Sides(vec![
            Participant::new(1, "p1", Side::CounterTerrorist),
            Participant::new(2, "p2", Side::Terrorist),
        ]);
        let second_half = Sides(vec![
            Participant::new(1, "p1", Side::Terrorist),
            Participant::new(2, "p2", Side::CounterTerrorist),
        ]);

        assert_eq!(
            Side::CounterTerrorist,
            resolve_side_a(&players, &first_half, Side::CounterTerrorist)
        );
        assert_eq!(
            Side::Terrorist,
            resolve_side_a(&players, &second_half, Side::CounterTerrorist)
        );
        // Resolving again does not change the outcome
        assert_eq!(
            Side::Terrorist,
            resolve_side_a(&players, &second_half, Side::Terrorist)
        );
    }

    #[test]
    fn skips_disconnected_team_a_players() {
        let players = vec![player(1, Label::A), player(3, Label::A), player(2, Label::B)];
        let state = Sides(vec![
            Participant::new(3, "p3", Side::Terrorist),
            Participant::new(2, "p2", Side::CounterTerrorist),
        ]);

        assert_eq!(
            Side::Terrorist,
            resolve_side_a(&players, &state, Side::CounterTerrorist)
        );
    }

    #[test]
    fn keeps_mapping_without_team_a() {
        let players = vec![player(1, Label::A)];
        let state = Sides(vec![Participant::new(2, "p2", Side::CounterTerrorist)]);

        assert_eq!(
            Side::Terrorist,
            resolve_side_a(&players, &state, Side::Terrorist)
        );
    }
}
