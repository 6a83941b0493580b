//! Match wide views over the per player statistics.

use std::collections::BTreeMap;

use crate::model::{Match, Player};
use crate::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponClass {
    Unknown,
    Pistol,
    Smg,
    Heavy,
    Rifle,
    Equipment,
    Grenade,
}

pub static WEAPON_CLASS: phf::Map<&'static str, WeaponClass> = phf::phf_map! {
    "glock" => WeaponClass::Pistol,
    "hkp2000" => WeaponClass::Pistol,
    "usp_silencer" => WeaponClass::Pistol,
    "p250" => WeaponClass::Pistol,
    "deagle" => WeaponClass::Pistol,
    "fiveseven" => WeaponClass::Pistol,
    "elite" => WeaponClass::Pistol,
    "tec9" => WeaponClass::Pistol,
    "cz75a" => WeaponClass::Pistol,
    "revolver" => WeaponClass::Pistol,
    "mp7" => WeaponClass::Smg,
    "mp9" => WeaponClass::Smg,
    "bizon" => WeaponClass::Smg,
    "mac10" => WeaponClass::Smg,
    "ump45" => WeaponClass::Smg,
    "p90" => WeaponClass::Smg,
    "mp5sd" => WeaponClass::Smg,
    "sawedoff" => WeaponClass::Heavy,
    "nova" => WeaponClass::Heavy,
    "mag7" => WeaponClass::Heavy,
    "xm1014" => WeaponClass::Heavy,
    "m249" => WeaponClass::Heavy,
    "negev" => WeaponClass::Heavy,
    "galilar" => WeaponClass::Rifle,
    "famas" => WeaponClass::Rifle,
    "ak47" => WeaponClass::Rifle,
    "m4a1" => WeaponClass::Rifle,
    "m4a1_silencer" => WeaponClass::Rifle,
    "ssg08" => WeaponClass::Rifle,
    "sg556" => WeaponClass::Rifle,
    "aug" => WeaponClass::Rifle,
    "awp" => WeaponClass::Rifle,
    "scar20" => WeaponClass::Rifle,
    "g3sg1" => WeaponClass::Rifle,
    "taser" => WeaponClass::Equipment,
    "knife" => WeaponClass::Equipment,
    "c4" => WeaponClass::Equipment,
    "vest" => WeaponClass::Equipment,
    "vesthelm" => WeaponClass::Equipment,
    "defuser" => WeaponClass::Equipment,
    "decoy" => WeaponClass::Grenade,
    "molotov" => WeaponClass::Grenade,
    "incgrenade" => WeaponClass::Grenade,
    "inferno" => WeaponClass::Grenade,
    "flashbang" => WeaponClass::Grenade,
    "smokegrenade" => WeaponClass::Grenade,
    "hegrenade" => WeaponClass::Grenade,
};

pub fn weapon_class(weapon: &str) -> WeaponClass {
    WEAPON_CLASS
        .get(weapon)
        .copied()
        .unwrap_or(WeaponClass::Unknown)
}

/// Values per player name, split by team.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamSplit {
    pub a: BTreeMap<String, usize>,
    pub b: BTreeMap<String, usize>,
}

impl TeamSplit {
    fn insert(&mut self, player: &Player, value: usize) {
        let side = match player.label {
            Label::A => &mut self.a,
            Label::B => &mut self.b,
        };
        side.insert(player.name.clone(), value);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeaponSummary {
    pub name: String,
    pub total_kills: usize,
    pub total_shots: usize,
    pub total_headshots: usize,
    pub total_accuracy: usize,
    pub total_damage: usize,
    pub total_hits: usize,
    pub kills: TeamSplit,
    pub shots: TeamSplit,
    pub headshots: TeamSplit,
    pub accuracy: TeamSplit,
    pub damage: TeamSplit,
    pub hits: TeamSplit,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VictimDamage {
    pub victim: String,
    pub amount: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerDamageSummary {
    pub player: String,
    pub damages: Vec<VictimDamage>,
}

/// Head to head damage between all human players, keyed by attacker name.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DamageSummary {
    pub a: BTreeMap<String, PlayerDamageSummary>,
    pub b: BTreeMap<String, PlayerDamageSummary>,
}

impl Match {
    /// Stats of every weapon that was fired at least once, equipment and unknown
    /// weapons are left out.
    pub fn weapon_summary(&self) -> BTreeMap<String, WeaponSummary> {
        let mut weapons: BTreeMap<String, WeaponSummary> = BTreeMap::new();

        let fired = self
            .players
            .iter()
            .flat_map(|p| p.weapon_stats.shots.iter())
            .filter(|(_, shots)| **shots > 0)
            .map(|(weapon, _)| weapon.as_str());

        for weapon in fired {
            if matches!(
                weapon_class(weapon),
                WeaponClass::Unknown | WeaponClass::Equipment
            ) || weapons.contains_key(weapon)
            {
                continue;
            }

            let mut summary = WeaponSummary {
                name: weapon.to_owned(),
                ..Default::default()
            };

            for player in self.players.iter() {
                let stats = &player.weapon_stats;

                summary.total_kills += stats.kills(weapon);
                summary.total_headshots += stats.headshots(weapon);
                summary.total_damage += stats.damage(weapon);
                summary.total_shots += stats.shots(weapon);
                summary.total_hits += stats.hits(weapon);

                summary.kills.insert(player, stats.kills(weapon));
                summary.headshots.insert(player, stats.headshots(weapon));
                summary.accuracy.insert(player, stats.accuracy(weapon));
                summary.damage.insert(player, stats.damage(weapon));
                summary.shots.insert(player, stats.shots(weapon));
                summary.hits.insert(player, stats.hits(weapon));
            }

            if summary.total_shots > 0 {
                summary.total_accuracy = summary.total_hits * 100 / summary.total_shots;
            }

            weapons.insert(weapon.to_owned(), summary);
        }

        weapons
    }

    /// Damage every human player dealt to every other human player, zero where none was dealt.
    pub fn damage_summary(&self) -> DamageSummary {
        let humans: Vec<&Player> = self.players.iter().filter(|p| !p.is_bot).collect();

        let mut summary = DamageSummary::default();
        for attacker in humans.iter() {
            let mut damages: BTreeMap<&str, usize> =
                humans.iter().map(|p| (p.name.as_str(), 0)).collect();

            for (victim_id, amount) in attacker.player_damages.damages.iter() {
                let victim = match humans.iter().find(|p| p.id == *victim_id) {
                    Some(v) => v,
                    None => continue,
                };
                damages.insert(victim.name.as_str(), *amount);
            }

            let entry = PlayerDamageSummary {
                player: attacker.name.clone(),
                damages: damages
                    .into_iter()
                    .map(|(victim, amount)| VictimDamage {
                        victim: victim.to_owned(),
                        amount,
                    })
                    .collect(),
            };

            match attacker.label {
                Label::A => summary.a.insert(attacker.name.clone(), entry),
                Label::B => summary.b.insert(attacker.name.clone(), entry),
            };
        }

        summary
    }
}
