//! Metrics derived once the whole match has been aggregated.

use std::collections::HashMap;

use crate::model::Match;
use crate::{Label, PlayerId};

/// Average kills per round
pub const AVERAGE_KPR: f64 = 0.679;
/// Average survived rounds per round
pub const AVERAGE_SPR: f64 = 0.317;
/// Average value calculated from rounds with multiple kills
pub const AVERAGE_RMK: f64 = 1.277;

pub(crate) fn calculate(game: &mut Match) {
    let rounds = game.completed_rounds();
    let labels: HashMap<PlayerId, Label> = game.players.iter().map(|p| (p.id, p.label)).collect();

    for player in game.players.iter_mut() {
        let mut buckets = [0_usize; 5];
        for round in game.rounds.iter() {
            let round_kills = round.all_kills().filter(|k| k.killer == player.id).count();
            if round_kills > 0 {
                buckets[round_kills.min(5) - 1] += 1;
            }
        }
        [
            player.rounds_1k,
            player.rounds_2k,
            player.rounds_3k,
            player.rounds_4k,
            player.rounds_5k,
        ] = buckets;

        let opponent_damage: usize = player
            .player_damages
            .damages
            .iter()
            .filter(|(victim, _)| labels.get(*victim).is_some_and(|l| *l != player.label))
            .map(|(_, damage)| *damage)
            .sum();

        player.kd = ratio(player.kills, player.deaths);
        player.hs_percent = ratio(player.headshots, player.kills) * 100.0;
        player.adr = ratio(opponent_damage, rounds);
        player.rws = if rounds == 0 {
            0.0
        } else {
            player.rws / rounds as f64
        };
        player.rating = rating(player.kills, player.deaths, buckets, rounds);
    }
}

/// Division that yields zero instead of failing on a zero denominator.
pub fn ratio(value: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    value as f64 / total as f64
}

/// HLTV 1.0 style rating over `rounds` completed rounds.
pub fn rating(kills: usize, deaths: usize, multi_kills: [usize; 5], rounds: usize) -> f64 {
    if rounds == 0 {
        return 0.0;
    }
    let rounds = rounds as f64;

    let kill_rating = kills as f64 / rounds / AVERAGE_KPR;
    let survival_rating = (rounds - deaths as f64) / rounds / AVERAGE_SPR;

    let [one, two, three, four, five] = multi_kills;
    let multi_rating = (one + 4 * two + 9 * three + 16 * four + 25 * five) as f64 / rounds / AVERAGE_RMK;

    (kill_rating + 0.7 * survival_rating + multi_rating) / 2.7
}
