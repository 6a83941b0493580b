mod helpers;

use helpers::*;
use pretty_assertions::assert_eq;
use scoreboard::event::WinReason;
use scoreboard::{Label, PlayerId, Side};

#[test]
fn overkill_is_capped() {
    let mut recording = started();
    hurt(&mut recording, 1, 6, 80, 100);
    hurt(&mut recording, 2, 6, 80, 20);

    let result = run(&recording);

    let first = player(&result, 1);
    assert_eq!(80, first.player_damages.to(PlayerId(6)));
    assert_eq!(80, first.weapon_stats.damage("ak47"));

    let second = player(&result, 2);
    assert_eq!(20, second.player_damages.to(PlayerId(6)));
    assert_eq!(20, second.weapon_stats.damage("ak47"));
    assert_eq!(1, second.weapon_stats.hits("ak47"));
}

#[test]
fn team_damage_only_counts_the_hit() {
    let mut recording = started();
    hurt(&mut recording, 1, 2, 30, 100);
    end_round(&mut recording, Side::CounterTerrorist, WinReason::TimeRanOut);

    let result = run(&recording);

    let attacker = player(&result, 1);
    assert_eq!(1, attacker.weapon_stats.hits("ak47"));
    assert_eq!(0, attacker.weapon_stats.damage("ak47"));
    assert!(attacker.player_damages.damages.is_empty());
    assert_eq!(0.0, attacker.rws);
    assert_eq!(0.0, attacker.adr);
}

#[test]
fn round_shares_split_by_damage() {
    let mut recording = started();
    hurt(&mut recording, 1, 6, 60, 100);
    hurt(&mut recording, 2, 7, 30, 100);
    hurt(&mut recording, 3, 8, 10, 100);
    hurt(&mut recording, 6, 1, 50, 100);
    end_round(&mut recording, Side::CounterTerrorist, WinReason::TKilled);

    let result = run(&recording);

    assert_eq!(60.0, player(&result, 1).rws);
    assert_eq!(30.0, player(&result, 2).rws);
    assert_eq!(10.0, player(&result, 3).rws);
    assert_eq!(0.0, player(&result, 4).rws);
    assert_eq!(0.0, player(&result, 6).rws);

    let team_a: f64 = result.players_on(Label::A).map(|p| p.rws).sum();
    let team_b: f64 = result.players_on(Label::B).map(|p| p.rws).sum();
    assert!((team_a - 100.0).abs() < 1e-9, "{}", team_a);
    assert_eq!(0.0, team_b);
}

#[test]
fn defuser_receives_objective_shares() {
    let mut recording = started();
    planted(&mut recording, 6);
    hurt(&mut recording, 1, 6, 70, 100);
    hurt(&mut recording, 2, 7, 30, 100);
    defused(&mut recording, 3);
    end_round(&mut recording, Side::CounterTerrorist, WinReason::BombDefused);

    let result = run(&recording);

    assert_eq!(30.0, player(&result, 3).rws);
    assert_eq!(49.0, player(&result, 1).rws);
    assert_eq!(21.0, player(&result, 2).rws);
    assert_eq!(0.0, player(&result, 6).rws);

    let round = &result.rounds[0];
    assert_eq!(Some(PlayerId(6)), round.bomb_planter);
    assert_eq!(Some(PlayerId(3)), round.bomb_defuser);
}

#[test]
fn planter_receives_objective_shares() {
    let mut recording = started();
    hurt(&mut recording, 6, 1, 40, 100);
    hurt(&mut recording, 7, 2, 60, 100);
    planted(&mut recording, 6);
    end_round(&mut recording, Side::Terrorist, WinReason::BombExploded);

    let result = run(&recording);

    assert_eq!(58.0, player(&result, 6).rws);
    assert_eq!(42.0, player(&result, 7).rws);
    for id in CT {
        assert_eq!(0.0, player(&result, id).rws);
    }
}

#[test]
fn objective_shares_without_damage() {
    let mut recording = started();
    planted(&mut recording, 6);
    defused(&mut recording, 3);
    end_round(&mut recording, Side::CounterTerrorist, WinReason::BombDefused);

    let result = run(&recording);

    assert_eq!(30.0, player(&result, 3).rws);
    let others: f64 = result
        .players
        .iter()
        .filter(|p| p.id != PlayerId(3))
        .map(|p| p.rws)
        .sum();
    assert_eq!(0.0, others);
}

#[test]
fn elimination_win_has_no_objective_bonus() {
    let mut recording = started();
    planted(&mut recording, 6);
    hurt(&mut recording, 1, 6, 100, 100);
    end_round(&mut recording, Side::CounterTerrorist, WinReason::TKilled);

    let result = run(&recording);

    assert_eq!(100.0, player(&result, 1).rws);
}
