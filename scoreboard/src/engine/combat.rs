use super::*;

use crate::event::{BombEvent, Kill, PlayerFlashed, PlayerHurt, RankUpdate, RoundMvp, WeaponFire};
use crate::model::RoundKill;

impl<'c> Engine<'c> {
    pub(super) fn kill(&mut self, kill: &Kill, state: &dyn GameState) -> Result<(), Error> {
        let (killer_id, victim_id) = match (kill.killer, kill.victim) {
            (Some(k), Some(v)) => (k, v),
            _ => return Ok(()),
        };

        if !self.counting(state) {
            self.state.warmup_kills.push(kill.clone());
            return Ok(());
        }

        let round_idx = match self.current_round_index() {
            Some(idx) => idx,
            None => {
                tracing::debug!("Ignoring kill outside of any round");
                return Ok(());
            }
        };

        let killer = self.resolve(killer_id, state)?;
        let victim = self.resolve(victim_id, state)?;

        if killer == victim {
            self.game.players[victim].deaths += 1;
            return Ok(());
        }

        let assister = match kill.assister {
            Some(id) => Some(self.resolve(id, state)?),
            None => None,
        };

        let killer_label = self.game.players[killer].label;
        let victim_label = self.game.players[victim].label;

        {
            let player = &mut self.game.players[killer];
            player.kills += 1;
            player.weapon_stats.add_kill(&kill.weapon);
            if kill.headshot {
                player.headshots += 1;
                player.weapon_stats.add_headshot(&kill.weapon);
            }
        }
        self.game.players[victim].deaths += 1;
        if let Some(assister) = assister {
            self.game.players[assister].assists += 1;
        }

        let now = state.current_time();
        let record = RoundKill {
            time: now,
            killer: killer_id,
            victim: victim_id,
            assister: kill.assister,
            killer_label,
            victim_label,
            assister_label: assister.map(|slot| self.game.players[slot].label),
            headshot: kill.headshot,
            weapon: kill.weapon.clone(),
        };

        // Both checks look at the kill lists before this kill is added to them
        let round = &self.game.rounds[round_idx];
        let first_kill = round.kills(killer_label).is_empty();
        let traded = round
            .kills(killer_label)
            .iter()
            .position(|prior| {
                prior.killer == victim_id
                    && now.saturating_sub(prior.time) < self.config.trade_window
            })
            .map(|idx| idx == 0);

        if first_kill {
            self.game.players[killer].first_kills += 1;
            self.game.players[victim].first_deaths += 1;
        }

        if let Some(traded_first_kill) = traded {
            self.game.players[killer].trade_kills += 1;
            self.game.players[victim].trade_deaths += 1;

            if traded_first_kill {
                self.game.players[killer].trade_first_kills += 1;
                self.game.players[victim].trade_first_deaths += 1;
            }
        }

        self.game.rounds[round_idx]
            .kills_mut(killer_label)
            .push(record);

        if let Some(opponents) = clutch_opponents(killer_id, victim_id, state) {
            let player = &mut self.game.players[killer];
            match opponents {
                5 => player.rounds_won_v5 += 1,
                4 => player.rounds_won_v4 += 1,
                3 => player.rounds_won_v3 += 1,
                _ => {}
            };
        }

        Ok(())
    }

    pub(super) fn player_hurt(
        &mut self,
        hurt: &PlayerHurt,
        state: &dyn GameState,
    ) -> Result<(), Error> {
        if !self.counting(state) {
            return Ok(());
        }

        let (attacker_id, victim_id) = match (hurt.attacker, hurt.victim) {
            (Some(a), Some(v)) => (a, v),
            _ => return Ok(()),
        };

        let attacker = self.resolve(attacker_id, state)?;
        self.game.players[attacker]
            .weapon_stats
            .add_hit(&hurt.weapon);

        let victim = self.resolve(victim_id, state)?;
        if attacker == victim || self.game.players[attacker].label == self.game.players[victim].label
        {
            return Ok(());
        }

        // Overkill damage is not counted
        let damage = hurt.health_damage.min(state.health(victim_id)) as usize;

        let player = &mut self.game.players[attacker];
        player.weapon_stats.add_damage(&hurt.weapon, damage);
        player.player_damages.add(victim_id, damage);
        self.game.round_damage.add(attacker_id, damage);

        Ok(())
    }

    pub(super) fn weapon_fire(
        &mut self,
        fire: &WeaponFire,
        state: &dyn GameState,
    ) -> Result<(), Error> {
        if !self.counting(state) {
            return Ok(());
        }

        let shooter = match fire.shooter {
            Some(id) => self.resolve(id, state)?,
            None => return Ok(()),
        };
        self.game.players[shooter]
            .weapon_stats
            .add_shot(&fire.weapon);

        Ok(())
    }

    pub(super) fn player_flashed(&mut self, flashed: &PlayerFlashed, state: &dyn GameState) {
        if !self.counting(state) {
            return;
        }

        let attacker_id = match flashed.attacker {
            Some(id) => id,
            None => return,
        };
        let attacker = match self.index.get(&attacker_id) {
            Some(slot) => *slot,
            None => {
                tracing::warn!(player = %attacker_id, "Flash by unknown player");
                return;
            }
        };

        let player = &mut self.game.players[attacker];
        if flashed.duration >= self.config.effective_flash {
            player.eff_flashes += 1;
        }
        player.flash_duration += flashed.duration.as_millis() as u64;
    }

    pub(super) fn bomb_planted(
        &mut self,
        bomb: &BombEvent,
        state: &dyn GameState,
    ) -> Result<(), Error> {
        if !self.game.match_valid {
            return Ok(());
        }
        if let Some(id) = bomb.player {
            self.resolve(id, state)?;
        }

        if let Some(round) = self.current_round_mut() {
            round.bomb_planter = bomb.player;
        }

        Ok(())
    }

    pub(super) fn bomb_defused(
        &mut self,
        bomb: &BombEvent,
        state: &dyn GameState,
    ) -> Result<(), Error> {
        if !self.game.match_valid {
            return Ok(());
        }
        if let Some(id) = bomb.player {
            self.resolve(id, state)?;
        }

        if let Some(round) = self.current_round_mut() {
            round.bomb_defuser = bomb.player;
        }

        Ok(())
    }

    pub(super) fn rank_update(&mut self, update: &RankUpdate) {
        match self.index.get(&update.player) {
            Some(slot) => {
                self.game.players[*slot].rank = update.rank_new;
            }
            None => {
                tracing::error!(player = %update.player, "Player not found setting rank");
            }
        };
    }

    pub(super) fn round_mvp(&mut self, mvp: &RoundMvp, state: &dyn GameState) -> Result<(), Error> {
        if !self.counting(state) {
            return Ok(());
        }

        let slot = self.resolve(mvp.player, state)?;
        self.game.players[slot].mvps += 1;

        Ok(())
    }
}

/// Number of opponents the killer faced if the killer is the last one alive on their
/// side. The victim is still counted as alive.
fn clutch_opponents(killer: PlayerId, victim: PlayerId, state: &dyn GameState) -> Option<usize> {
    let killer_side = state.participant(killer)?.side;
    let victim = state.participant(victim)?;

    if !killer_side.is_playing() || killer_side == victim.side {
        return None;
    }
    if state.alive_on(killer_side) != 1 {
        return None;
    }

    let mut opponents = state.alive_on(victim.side);
    if !victim.alive {
        opponents += 1;
    }

    Some(opponents)
}
