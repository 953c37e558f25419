// tests/common/mod.rs
//
// Маленькая сетка на 4 места для интеграционных тестов:
//
//   Seeds [1, 4, 3, 2] -> Semis (2+3) -> First Place (0+4)
//        \-> Cons (1+0) -> Third Place (0+2)
//
// Alpha: Adams (1), Clark (3). Beta: Baker (4), Davis (2).

#![allow(dead_code)]

use bracket_engine::builder::{pairs, RoundSetup, TournamentBuilder, TournamentTemplate};
use bracket_engine::domain::{EntrySpec, Tournament, WeightClass, WrestlerKey};
use bracket_engine::domain::{EntryRef, Points};
use bracket_engine::engine::MatchData;
use bracket_engine::MatchResult;

pub const WEIGHT: &str = "103";

pub fn mini_template() -> TournamentTemplate {
    TournamentTemplate {
        name: "Mini Four".into(),
        description: "Four seed slots, consolation for the first round losers.".into(),
        seeds: vec![1, 4, 3, 2],
        rounds: vec![
            RoundSetup::new("Seeds", 0.0, 0.0, EntrySpec::Seeds(vec![1, 4, 3, 2]))
                .win("Semis", pairs(2))
                .lose("Cons", pairs(2)),
            RoundSetup::new("Semis", 2.0, 3.0, EntrySpec::Count(2)).win("First Place", pairs(1)),
            RoundSetup::new("First Place", 0.0, 4.0, EntrySpec::Count(1)),
            RoundSetup::new("Cons", 1.0, 0.0, EntrySpec::Count(2)).win("Third Place", pairs(1)),
            RoundSetup::new("Third Place", 0.0, 2.0, EntrySpec::Count(1)),
        ],
    }
}

pub fn key(name: &str, team: &str) -> WrestlerKey {
    WrestlerKey::new(name, team)
}

pub fn adams() -> WrestlerKey {
    key("Adams", "Alpha")
}

pub fn baker() -> WrestlerKey {
    key("Baker", "Beta")
}

pub fn clark() -> WrestlerKey {
    key("Clark", "Alpha")
}

pub fn davis() -> WrestlerKey {
    key("Davis", "Beta")
}

/// Пустой турнир по мини-шаблону (веса есть, посева нет).
pub fn empty_mini() -> Tournament {
    TournamentBuilder::create_from(&mini_template(), "Mini Open", &[WEIGHT], &["Alpha", "Beta"])
        .expect("mini template must build")
}

/// Все четыре места посева заполнены.
pub fn seeded_mini() -> Tournament {
    let mut t = empty_mini();
    t.set_seed(WEIGHT, 1, "Alpha", "Adams").unwrap();
    t.set_seed(WEIGHT, 4, "Beta", "Baker").unwrap();
    t.set_seed(WEIGHT, 3, "Alpha", "Clark").unwrap();
    t.set_seed(WEIGHT, 2, "Beta", "Davis").unwrap();
    t
}

/// Полностью разыгранная сетка.
///
/// Adams туширует Baker (1:30), Davis выигрывает у Clark 10-1,
/// Adams выигрывает финал 5-3, Baker — схватку за третье место неявкой.
pub fn finished_mini() -> Tournament {
    let mut t = seeded_mini();
    t.store_result(
        WEIGHT,
        "Semis",
        0,
        MatchData::new(adams(), Some(baker()), MatchResult::Pin { time_seconds: 90 }),
    )
    .unwrap();
    t.store_result(
        WEIGHT,
        "Semis",
        1,
        MatchData::new(
            davis(),
            Some(clark()),
            MatchResult::Decision {
                winner_score: 10,
                loser_score: 1,
            },
        ),
    )
    .unwrap();
    t.store_result(
        WEIGHT,
        "First Place",
        0,
        MatchData::new(
            adams(),
            Some(davis()),
            MatchResult::Decision {
                winner_score: 5,
                loser_score: 3,
            },
        ),
    )
    .unwrap();
    t.store_result(
        WEIGHT,
        "Third Place",
        0,
        MatchData::new(baker(), Some(clark()), MatchResult::Default),
    )
    .unwrap();
    t
}

pub fn at(wc: &WeightClass, round: &str, index: usize) -> EntryRef {
    wc.find_entry(round, index)
        .unwrap_or_else(|| panic!("entry {}#{} must exist", round, index))
}

/// Две простые весовые категории "вручную", без шаблона:
/// `first` записей посева, связанных парами в `second` записей.
pub fn two_round_class(name: &str, first: usize, second: usize) -> WeightClass {
    let mut wc = WeightClass::new(name);
    let seeds: Vec<u32> = (1..=first as u32).collect();
    let a = wc.new_round("A", Points::ZERO).unwrap();
    wc.new_entries(a, &EntrySpec::Seeds(seeds)).unwrap();
    let b = wc.new_round("B", Points::new(2.0, 0.0)).unwrap();
    wc.new_entries(b, &EntrySpec::Count(second)).unwrap();
    wc
}

/// Реестр результатов борцов совпадает с записями сетки.
pub fn registry_problems(t: &Tournament) -> Vec<String> {
    let mut problems = Vec::new();

    for wc in t.weight_classes.values() {
        for at in wc.entry_refs() {
            let entry = wc.entry(at).unwrap();
            let id = wc.entry_id(at).unwrap();
            if let (Some(k), Some(result)) = (entry.wrestler.as_ref(), entry.result.as_ref()) {
                match t.teams.wrestler(&wc.name, k) {
                    Some(w) if w.results.get(&id) == Some(result) => {}
                    _ => problems.push(format!("{} does not remember {}", k, id)),
                }
            }
        }

        for team in t.teams.iter() {
            for w in team.wrestlers.get(&wc.name).into_iter().flatten() {
                for id in w.results.keys() {
                    let holds = wc
                        .find_entry(&id.round, id.index)
                        .and_then(|at| wc.entry(at))
                        .map(|e| e.holds(&w.key()) && e.result.is_some())
                        .unwrap_or(false);
                    if !holds {
                        problems.push(format!("{} remembers stale {}", w.key(), id));
                    }
                }
            }
        }
    }
    problems
}
