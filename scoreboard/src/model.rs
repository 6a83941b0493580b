//! The aggregated scoreboard of a single match.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::{event::WinReason, Label, Participant, PlayerId, Side};

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Match {
    pub match_id: String,
    /// Only set once a match start was observed.
    pub match_valid: bool,
    pub general: General,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    #[serde(skip)]
    pub round_damage: RoundDamage,
}

impl Match {
    /// Linear lookup by id, meant for consumers of a finished match. The engine keeps
    /// its own id index while aggregating.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn players_on(&self, label: Label) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.label == label)
    }

    /// Rounds that saw a round end.
    pub fn completed_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.completed).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct General {
    pub winner: Option<Label>,
    pub score_a: u32,
    pub score_b: u32,
    pub map_name: String,
    pub match_time: chrono::DateTime<chrono::Utc>,
    pub match_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    #[serde(rename = "steamid64")]
    pub id: PlayerId,
    pub name: String,
    pub is_bot: bool,
    pub clan_tag: String,
    pub label: Label,
    pub rank: i32,

    pub kills: usize,
    pub deaths: usize,
    pub assists: usize,
    pub mvps: usize,
    pub headshots: usize,

    pub kd: f64,
    pub adr: f64,
    pub rws: f64,
    pub rating: f64,
    pub hs_percent: f64,

    pub first_kills: usize,
    pub first_deaths: usize,
    pub trade_kills: usize,
    pub trade_deaths: usize,
    pub trade_first_kills: usize,
    pub trade_first_deaths: usize,

    pub rounds_won_v3: usize,
    pub rounds_won_v4: usize,
    pub rounds_won_v5: usize,

    pub rounds_1k: usize,
    pub rounds_2k: usize,
    pub rounds_3k: usize,
    pub rounds_4k: usize,
    pub rounds_5k: usize,

    pub eff_flashes: usize,
    /// Milliseconds
    pub flash_duration: u64,

    pub weapon_stats: WeaponStats,
    pub player_damages: PlayerDamages,
}

impl Player {
    pub fn new(participant: &Participant, label: Label) -> Self {
        let name = if participant.is_bot {
            "BOT".to_owned()
        } else {
            participant.name.clone()
        };

        Self {
            id: participant.id,
            name,
            is_bot: participant.is_bot,
            clan_tag: participant.clan_tag.clone(),
            label,
            rank: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            mvps: 0,
            headshots: 0,
            kd: 0.0,
            adr: 0.0,
            rws: 0.0,
            rating: 0.0,
            hs_percent: 0.0,
            first_kills: 0,
            first_deaths: 0,
            trade_kills: 0,
            trade_deaths: 0,
            trade_first_kills: 0,
            trade_first_deaths: 0,
            rounds_won_v3: 0,
            rounds_won_v4: 0,
            rounds_won_v5: 0,
            rounds_1k: 0,
            rounds_2k: 0,
            rounds_3k: 0,
            rounds_4k: 0,
            rounds_5k: 0,
            eff_flashes: 0,
            flash_duration: 0,
            weapon_stats: WeaponStats::default(),
            player_damages: PlayerDamages::default(),
        }
    }

    /// The 1K..5K buckets in ascending order.
    pub fn multi_kill_rounds(&self) -> [usize; 5] {
        [
            self.rounds_1k,
            self.rounds_2k,
            self.rounds_3k,
            self.rounds_4k,
            self.rounds_5k,
        ]
    }
}

/// Per-weapon counters of a single player, keyed by weapon name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeaponStats {
    pub kills: BTreeMap<String, usize>,
    pub headshots: BTreeMap<String, usize>,
    /// Percent of shots fired that hit
    pub accuracy: BTreeMap<String, usize>,
    pub damage: BTreeMap<String, usize>,
    pub shots: BTreeMap<String, usize>,
    pub hits: BTreeMap<String, usize>,
}

impl WeaponStats {
    pub fn add_kill(&mut self, weapon: &str) {
        *self.kills.entry(weapon.to_owned()).or_default() += 1;
    }

    pub fn add_headshot(&mut self, weapon: &str) {
        *self.headshots.entry(weapon.to_owned()).or_default() += 1;
    }

    pub fn add_damage(&mut self, weapon: &str, damage: usize) {
        *self.damage.entry(weapon.to_owned()).or_default() += damage;
    }

    pub fn add_shot(&mut self, weapon: &str) {
        *self.shots.entry(weapon.to_owned()).or_default() += 1;
        self.update_accuracy(weapon);
    }

    pub fn add_hit(&mut self, weapon: &str) {
        *self.hits.entry(weapon.to_owned()).or_default() += 1;
        self.update_accuracy(weapon);
    }

    fn update_accuracy(&mut self, weapon: &str) {
        let shots = self.shots(weapon);
        if shots == 0 {
            return;
        }
        self.accuracy
            .insert(weapon.to_owned(), self.hits(weapon) * 100 / shots);
    }

    pub fn kills(&self, weapon: &str) -> usize {
        self.kills.get(weapon).copied().unwrap_or(0)
    }

    pub fn headshots(&self, weapon: &str) -> usize {
        self.headshots.get(weapon).copied().unwrap_or(0)
    }

    pub fn accuracy(&self, weapon: &str) -> usize {
        self.accuracy.get(weapon).copied().unwrap_or(0)
    }

    pub fn damage(&self, weapon: &str) -> usize {
        self.damage.get(weapon).copied().unwrap_or(0)
    }

    pub fn shots(&self, weapon: &str) -> usize {
        self.shots.get(weapon).copied().unwrap_or(0)
    }

    pub fn hits(&self, weapon: &str) -> usize {
        self.hits.get(weapon).copied().unwrap_or(0)
    }
}

/// Cumulative damage a player dealt, keyed by victim.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerDamages {
    pub damages: BTreeMap<PlayerId, usize>,
}

impl PlayerDamages {
    pub fn add(&mut self, victim: PlayerId, damage: usize) {
        *self.damages.entry(victim).or_default() += damage;
    }

    pub fn to(&self, victim: PlayerId) -> usize {
        self.damages.get(&victim).copied().unwrap_or(0)
    }
}

/// Damage dealt to opponents during the current round, keyed by attacker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundDamage {
    damages: HashMap<PlayerId, usize>,
}

impl RoundDamage {
    pub fn add(&mut self, attacker: PlayerId, damage: usize) {
        *self.damages.entry(attacker).or_default() += damage;
    }

    pub fn get(&self, attacker: PlayerId) -> usize {
        self.damages.get(&attacker).copied().unwrap_or(0)
    }

    /// Zeroes the entries of the given players and of everyone already tracked.
    pub fn reset<I>(&mut self, players: I)
    where
        I: IntoIterator<Item = PlayerId>,
    {
        self.damages.values_mut().for_each(|d| *d = 0);
        for id in players {
            self.damages.insert(id, 0);
        }
    }

    pub fn total(&self) -> usize {
        self.damages.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Round {
    pub completed: bool,
    pub duration: Duration,
    pub kills_a: Vec<RoundKill>,
    pub kills_b: Vec<RoundKill>,
    pub score_a: u32,
    pub score_b: u32,
    pub survivors_a: usize,
    pub survivors_b: usize,
    pub winner_side: Side,
    pub winner: Option<Label>,
    pub win_reason: WinReason,
    pub bomb_planter: Option<PlayerId>,
    pub bomb_defuser: Option<PlayerId>,
}

impl Round {
    /// Kills made by members of the given team.
    pub fn kills(&self, label: Label) -> &[RoundKill] {
        match label {
            Label::A => &self.kills_a,
            Label::B => &self.kills_b,
        }
    }

    pub fn kills_mut(&mut self, label: Label) -> &mut Vec<RoundKill> {
        match label {
            Label::A => &mut self.kills_a,
            Label::B => &mut self.kills_b,
        }
    }

    pub fn all_kills(&self) -> impl Iterator<Item = &RoundKill> {
        self.kills_a.iter().chain(self.kills_b.iter())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundKill {
    pub time: Duration,
    pub killer: PlayerId,
    pub victim: PlayerId,
    pub assister: Option<PlayerId>,
    pub killer_label: Label,
    pub victim_label: Label,
    pub assister_label: Option<Label>,
    pub headshot: bool,
    pub weapon: String,
}
