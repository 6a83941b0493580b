#![allow(dead_code)]

use scoreboard::event::{
    BombEvent, Event, Kill, PlayerFlashed, PlayerHurt, RoundEnd, WeaponFire, WinReason,
};
use scoreboard::model::{Match, Player};
use scoreboard::recorded::{Frame, Recording};
use scoreboard::{Config, Participant, PlayerId, Side};

/// Players starting on CT, they make up team A
pub const CT: [u64; 5] = [1, 2, 3, 4, 5];
/// Players starting on T, they make up team B
pub const T: [u64; 5] = [6, 7, 8, 9, 10];

/// Ten players on their starting sides, nothing happened yet.
pub fn lobby() -> Recording {
    let mut recording = Recording::new("de_nuke");
    for id in CT {
        recording.join(Participant::new(id, format!("ct{}", id), Side::CounterTerrorist));
    }
    for id in T {
        recording.join(Participant::new(id, format!("t{}", id), Side::Terrorist));
    }
    recording
}

/// A started match with the first round running.
pub fn started() -> Recording {
    let mut recording = lobby();
    recording.event(Event::MatchStart);
    start_round(&mut recording);
    recording
}

pub fn start_round(recording: &mut Recording) {
    recording.push(Frame::Respawn);
    recording.event(Event::RoundStart);
}

pub fn end_round(recording: &mut Recording, winner: Side, reason: WinReason) {
    recording.event(Event::RoundEnd(RoundEnd { winner, reason }));
}

pub fn kill(recording: &mut Recording, millis: u64, killer: u64, victim: u64) {
    kill_with(recording, millis, killer, victim, "ak47", false);
}

pub fn kill_with(
    recording: &mut Recording,
    millis: u64,
    killer: u64,
    victim: u64,
    weapon: &str,
    headshot: bool,
) {
    recording.at(millis);
    recording.event(Event::Kill(Kill {
        killer: Some(PlayerId(killer)),
        victim: Some(PlayerId(victim)),
        assister: None,
        weapon: weapon.to_owned(),
        headshot,
    }));
    recording.health(victim, 0);
}

/// A hit for `damage` on a victim that had `health` left before it.
pub fn hurt(recording: &mut Recording, attacker: u64, victim: u64, damage: u32, health: u32) {
    recording.health(victim, health);
    recording.event(Event::PlayerHurt(PlayerHurt {
        attacker: Some(PlayerId(attacker)),
        victim: Some(PlayerId(victim)),
        weapon: "ak47".to_owned(),
        health_damage: damage,
    }));
    recording.health(victim, health.saturating_sub(damage));
}

pub fn fire(recording: &mut Recording, shooter: u64, weapon: &str) {
    recording.event(Event::WeaponFire(WeaponFire {
        shooter: Some(PlayerId(shooter)),
        weapon: weapon.to_owned(),
    }));
}

pub fn flash(recording: &mut Recording, attacker: u64, victim: u64, millis: u64) {
    recording.event(Event::PlayerFlashed(PlayerFlashed {
        attacker: Some(PlayerId(attacker)),
        victim: Some(PlayerId(victim)),
        duration: std::time::Duration::from_millis(millis),
    }));
}

pub fn planted(recording: &mut Recording, player: u64) {
    recording.event(Event::BombPlanted(BombEvent {
        player: Some(PlayerId(player)),
    }));
}

pub fn defused(recording: &mut Recording, player: u64) {
    recording.event(Event::BombDefused(BombEvent {
        player: Some(PlayerId(player)),
    }));
}

/// Swaps every playing participant to the other side, like at halftime.
pub fn swap_sides(recording: &mut Recording) {
    for id in CT {
        recording.side(id, Side::Terrorist);
    }
    for id in T {
        recording.side(id, Side::CounterTerrorist);
    }
}

pub fn config() -> Config {
    Config {
        match_id: "test".to_owned(),
        ..Default::default()
    }
}

pub fn run(recording: &Recording) -> Match {
    scoreboard::parse(&config(), &mut recording.stream()).unwrap()
}

pub fn player(result: &Match, id: u64) -> &Player {
    result
        .player(PlayerId(id))
        .unwrap_or_else(|| panic!("Missing player {}", id))
}
