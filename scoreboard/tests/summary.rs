mod helpers;

use helpers::*;
use pretty_assertions::assert_eq;
use scoreboard::event::Event;
use scoreboard::summary::{weapon_class, WeaponClass};
use scoreboard::{Participant, Side};

#[test]
fn weapon_summary() {
    let mut recording = started();
    fire(&mut recording, 1, "ak47");
    fire(&mut recording, 1, "ak47");
    hurt(&mut recording, 1, 6, 100, 100);
    kill(&mut recording, 1000, 1, 6);
    fire(&mut recording, 7, "glock");
    fire(&mut recording, 2, "knife");
    kill_with(&mut recording, 2000, 2, 7, "knife", false);

    let result = run(&recording);
    let summary = result.weapon_summary();

    assert_eq!(
        vec!["ak47", "glock"],
        summary.keys().map(String::as_str).collect::<Vec<_>>()
    );

    let ak = &summary["ak47"];
    assert_eq!(1, ak.total_kills);
    assert_eq!(2, ak.total_shots);
    assert_eq!(1, ak.total_hits);
    assert_eq!(50, ak.total_accuracy);
    assert_eq!(100, ak.total_damage);
    assert_eq!(5, ak.kills.a.len());
    assert_eq!(5, ak.kills.b.len());
    assert_eq!(Some(&1), ak.kills.a.get("ct1"));
    assert_eq!(Some(&0), ak.kills.a.get("ct2"));
    assert_eq!(Some(&50), ak.accuracy.a.get("ct1"));
    assert_eq!(Some(&0), ak.damage.b.get("t6"));

    let glock = &summary["glock"];
    assert_eq!(1, glock.total_shots);
    assert_eq!(0, glock.total_hits);
    assert_eq!(0, glock.total_accuracy);
    assert_eq!(Some(&1), glock.shots.b.get("t7"));
}

#[test]
fn weapon_classes() {
    assert_eq!(WeaponClass::Rifle, weapon_class("ak47"));
    assert_eq!(WeaponClass::Pistol, weapon_class("usp_silencer"));
    assert_eq!(WeaponClass::Equipment, weapon_class("knife"));
    assert_eq!(WeaponClass::Grenade, weapon_class("hegrenade"));
    assert_eq!(WeaponClass::Unknown, weapon_class("world"));
}

#[test]
fn damage_summary_skips_bots() {
    let mut recording = lobby();
    let mut bot = Participant::new(11, "Albert", Side::Terrorist);
    bot.is_bot = true;
    recording.join(bot);
    recording.event(Event::MatchStart);
    start_round(&mut recording);
    hurt(&mut recording, 1, 6, 40, 100);
    hurt(&mut recording, 1, 11, 30, 100);
    hurt(&mut recording, 6, 1, 25, 100);

    let result = run(&recording);
    assert_eq!(11, result.players.len());

    let summary = result.damage_summary();
    assert_eq!(5, summary.a.len());
    assert_eq!(5, summary.b.len());
    assert!(!summary.b.contains_key("BOT"));

    let ct1 = &summary.a["ct1"];
    assert_eq!("ct1", ct1.player);
    assert_eq!(10, ct1.damages.len());
    assert!(ct1.damages.iter().all(|d| d.victim != "BOT"));

    let amounts: Vec<(&str, usize)> = ct1
        .damages
        .iter()
        .filter(|d| d.amount > 0)
        .map(|d| (d.victim.as_str(), d.amount))
        .collect();
    assert_eq!(vec![("t6", 40)], amounts);

    let t6 = &summary.b["t6"];
    assert_eq!(
        Some(25),
        t6.damages
            .iter()
            .find(|d| d.victim == "ct1")
            .map(|d| d.amount)
    );
    assert!(summary.a["ct2"].damages.iter().all(|d| d.amount == 0));
}
