// src/engine/placement.rs

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::bracket::{Entry, WeightClass};
use crate::domain::ids::WrestlerKey;
use crate::domain::result::{format_pin_time, MatchResult};
use crate::domain::team::TeamRegistry;
use crate::domain::RoundIndex;

/// Схватка, которую можно проводить: в паре записей стоят оба борца.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bout {
    pub weight: String,
    pub round: String,
    pub wrestler1: WrestlerKey,
    pub wrestler2: WrestlerKey,
}

/// Строка рейтинга быстрых туше.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FastFall {
    pub name: String,
    pub team: String,
    pub weight: String,
    pub pins: u32,
    pub time_seconds: u32,
}

impl FastFall {
    pub fn time_text(&self) -> String {
        format_pin_time(self.time_seconds)
    }
}

/// Призёр (или пустое место) финального раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceWinner {
    pub name: Option<String>,
    pub team: Option<String>,
    pub result: Option<MatchResult>,
}

impl PlaceWinner {
    fn new(key: Option<&WrestlerKey>, result: Option<MatchResult>) -> Self {
        Self {
            name: key.map(|k| k.name.clone()),
            team: key.map(|k| k.team.clone()),
            result,
        }
    }
}

/// Призёры одной весовой категории: по два места на каждый финальный
/// раунд (победитель и соперник по финальной схватке).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceWinners {
    pub weight: String,
    pub places: Vec<PlaceWinner>,
}

fn is_bout(a: &Entry, b: &Entry) -> bool {
    a.is_filled() && b.is_filled()
}

/// Пары записей (2i, 2i+1) раунда, где стоят оба борца.
pub fn round_bouts(wc: &WeightClass, round: RoundIndex) -> Vec<Bout> {
    let Some(r) = wc.round(round) else {
        return Vec::new();
    };

    r.entries
        .chunks_exact(2)
        .filter(|pair| is_bout(&pair[0], &pair[1]))
        .filter_map(|pair| {
            Some(Bout {
                weight: wc.name.clone(),
                round: r.name.clone(),
                wrestler1: pair[0].wrestler.clone()?,
                wrestler2: pair[1].wrestler.clone()?,
            })
        })
        .collect()
}

/// Все готовые схватки весовой категории.
pub fn count_bouts(wc: &WeightClass) -> usize {
    wc.rounds
        .iter()
        .map(|r| {
            r.entries
                .chunks_exact(2)
                .filter(|pair| is_bout(&pair[0], &pair[1]))
                .count()
        })
        .sum()
}

pub fn place_winners(wc: &WeightClass) -> PlaceWinners {
    let mut places = Vec::new();

    for round in wc.rounds.iter().filter(|r| r.is_terminal()) {
        let Some(first) = round.entries.first() else {
            continue;
        };
        let primary = first.wrestler.as_ref();
        let secondary = first
            .previous
            .iter()
            .filter_map(|&p| wc.entry(p))
            .filter_map(|e| e.wrestler.as_ref())
            .find(|w| primary.map(|pw| pw.name != w.name).unwrap_or(true));

        places.push(PlaceWinner::new(primary, first.result.clone()));
        places.push(PlaceWinner::new(secondary, first.result.clone()));
    }

    PlaceWinners {
        weight: wc.name.clone(),
        places,
    }
}

/// Рейтинг быстрых туше: больше туше выше, при равенстве — меньше
/// суммарное время.
pub fn fast_fall(teams: &TeamRegistry) -> Vec<FastFall> {
    let mut rows: Vec<FastFall> = teams
        .iter()
        .flat_map(|t| t.all_wrestlers())
        .filter_map(|w| {
            let (pins, time_seconds) = w.pins();
            (pins > 0).then(|| FastFall {
                name: w.name.clone(),
                team: w.team.clone(),
                weight: w.weight.clone(),
                pins,
                time_seconds,
            })
        })
        .collect();

    rows.sort_by(|a, b| match b.pins.cmp(&a.pins) {
        Ordering::Equal => a.time_seconds.cmp(&b.time_seconds),
        other => other,
    });
    rows
}
