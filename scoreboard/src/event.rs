use std::time::Duration;

use crate::{PlayerId, Side};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    MatchStart,
    RoundStart,
    RoundEnd(RoundEnd),
    ScoreUpdated,
    Kill(Kill),
    PlayerHurt(PlayerHurt),
    WeaponFire(WeaponFire),
    PlayerFlashed(PlayerFlashed),
    BombPlanted(BombEvent),
    BombDefused(BombEvent),
    BombExploded(BombEvent),
    RankUpdate(RankUpdate),
    RoundMvp(RoundMvp),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundEnd {
    pub winner: Side,
    pub reason: WinReason,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Kill {
    pub killer: Option<PlayerId>,
    pub victim: Option<PlayerId>,
    pub assister: Option<PlayerId>,
    pub weapon: String,
    #[serde(default)]
    pub headshot: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerHurt {
    pub attacker: Option<PlayerId>,
    pub victim: Option<PlayerId>,
    pub weapon: String,
    /// Damage as reported by the game, may exceed the health the victim had left.
    pub health_damage: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeaponFire {
    pub shooter: Option<PlayerId>,
    pub weapon: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerFlashed {
    pub attacker: Option<PlayerId>,
    pub victim: Option<PlayerId>,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BombEvent {
    pub player: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankUpdate {
    pub player: PlayerId,
    pub rank_old: i32,
    pub rank_new: i32,
    #[serde(default)]
    pub wins: i32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundMvp {
    pub player: PlayerId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum WinReason {
    #[default]
    StillInProgress,
    BombExploded,
    VipEscaped,
    VipKilled,
    TSaved,
    CtStoppedEscape,
    RoundEndReasonTerroristsStopped,
    BombDefused,
    TKilled,
    CTKilled,
    Draw,
    HostageRescued,
    TimeRanOut,
    RoundEndReasonHostagesNotRescued,
    TerroristsNotEscaped,
    VipNotEscaped,
    GameStart,
    TSurrender,
    CTSurrender,
    TPlanted,
    CTReachedHostage,
}

// https://github.com/markus-wa/demoinfocs-golang/blob/205b0bb25e9f3e96e1d306d154199b4a6292940e/pkg/demoinfocs/events/events.go#L53
pub static ROUND_WIN_REASON: phf::Map<i32, WinReason> = phf::phf_map! {
    0_i32 => WinReason::StillInProgress,
    1_i32 => WinReason::BombExploded,
    2_i32 => WinReason::VipEscaped,
    3_i32 => WinReason::VipKilled,
    4_i32 => WinReason::TSaved,
    5_i32 => WinReason::CtStoppedEscape,
    6_i32 => WinReason::RoundEndReasonTerroristsStopped,
    7_i32 => WinReason::BombDefused,
    8_i32 => WinReason::TKilled,
    9_i32 => WinReason::CTKilled,
    10_i32 => WinReason::Draw,
    11_i32 => WinReason::HostageRescued,
    12_i32 => WinReason::TimeRanOut,
    13_i32 => WinReason::RoundEndReasonHostagesNotRescued,
    14_i32 => WinReason::TerroristsNotEscaped,
    15_i32 => WinReason::VipNotEscaped,
    16_i32 => WinReason::GameStart,
    17_i32 => WinReason::TSurrender,
    18_i32 => WinReason::CTSurrender,
    19_i32 => WinReason::TPlanted,
    20_i32 => WinReason::CTReachedHostage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown round end reason code {0}")]
pub struct UnknownWinReason(pub i32);

impl WinReason {
    pub fn code(self) -> i32 {
        ROUND_WIN_REASON
            .entries()
            .find(|(_, reason)| **reason == self)
            .map(|(code, _)| *code)
            .unwrap_or(0)
    }
}

impl TryFrom<i32> for WinReason {
    type Error = UnknownWinReason;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ROUND_WIN_REASON
            .get(&value)
            .copied()
            .ok_or(UnknownWinReason(value))
    }
}

impl From<WinReason> for i32 {
    fn from(value: WinReason) -> Self {
        value.code()
    }
}
