// tests/engine_results_tests.rs
//
// Ввод и удаление результатов, маршрут проигравших, автопроходы.

mod common;

use bracket_engine::domain::*;
use bracket_engine::engine::{BracketError, MatchData, MoveInPolicy};
use proptest::prelude::*;

use common::*;

fn pin(seconds: u32) -> MatchResult {
    MatchResult::Pin {
        time_seconds: seconds,
    }
}

fn wrestler_results(t: &Tournament, k: &WrestlerKey) -> Vec<EntryId> {
    t.teams
        .wrestler(WEIGHT, k)
        .map(|w| w.results.keys().cloned().collect())
        .unwrap_or_default()
}

//
// TEST 1 — победитель занимает запись, проигравший уходит по lose-ребру
//
#[test]
fn store_result_advances_winner_and_routes_loser() {
    let mut t = seeded_mini();
    assert_eq!(t.selectable_winners(WEIGHT, "Semis", 0), vec![adams(), baker()]);

    t.store_result(WEIGHT, "Semis", 0, MatchData::new(adams(), Some(baker()), pin(90)))
        .unwrap();

    let wc = t.weight_class(WEIGHT).unwrap();
    let semis = wc.entry(at(wc, "Semis", 0)).unwrap();
    assert_eq!(semis.wrestler, Some(adams()));
    assert_eq!(semis.result, Some(pin(90)));

    let cons = wc.entry(at(wc, "Cons", 0)).unwrap();
    assert_eq!(cons.wrestler, Some(baker()));
    assert_eq!(cons.result, None, "a loser carries no result");

    assert_eq!(wrestler_results(&t, &adams()), vec![EntryId::new("Semis", 0)]);
    assert!(wrestler_results(&t, &baker()).is_empty());
    assert!(registry_problems(&t).is_empty());
}

//
// TEST 2 — исправление результата: прежний победитель забывает его
//
#[test]
fn overwriting_result_forgets_previous_holder() {
    let mut t = seeded_mini();
    t.store_result(WEIGHT, "Semis", 0, MatchData::new(adams(), Some(baker()), pin(90)))
        .unwrap();
    t.store_result(
        WEIGHT,
        "Semis",
        0,
        MatchData::new(baker(), Some(adams()), MatchResult::Default),
    )
    .unwrap();

    assert!(wrestler_results(&t, &adams()).is_empty());
    assert_eq!(wrestler_results(&t, &baker()), vec![EntryId::new("Semis", 0)]);

    let wc = t.weight_class(WEIGHT).unwrap();
    assert_eq!(wc.entry(at(wc, "Cons", 0)).unwrap().wrestler, Some(adams()));
    assert!(registry_problems(&t).is_empty());
}

//
// TEST 3 — удаление результата симметрично вводу
//
#[test]
fn delete_result_restores_registry() {
    let mut t = seeded_mini();
    let before = t.clone();

    t.store_result(WEIGHT, "Semis", 1, MatchData::new(davis(), None, pin(30)))
        .unwrap();
    assert_eq!(wrestler_results(&t, &davis()), vec![EntryId::new("Semis", 1)]);

    let removed = t.delete_result(WEIGHT, "Semis", 1).unwrap();
    assert_eq!(removed, Some(davis()));
    assert_eq!(t, before, "store then delete without a loser is a no-op");

    assert_eq!(t.delete_result(WEIGHT, "Semis", 1).unwrap(), None);
}

//
// TEST 4 — недопустимые победители и пустые предшественники
//
#[test]
fn invalid_results_are_rejected() {
    let mut t = seeded_mini();
    let before = t.clone();

    let err = t
        .store_result(WEIGHT, "Semis", 0, MatchData::new(davis(), None, pin(10)))
        .unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Bracket(BracketError::InvalidWinner { .. })
    ));

    let err = t
        .store_result(WEIGHT, "Semis", 0, MatchData::new(adams(), Some(adams()), pin(10)))
        .unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Bracket(BracketError::InvalidLoser { .. })
    ));

    let err = t
        .store_result(WEIGHT, "First Place", 0, MatchData::new(adams(), None, pin(10)))
        .unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Bracket(BracketError::NoCompetitors { .. })
    ));

    let err = t
        .store_result(WEIGHT, "Seeds", 0, MatchData::new(adams(), None, pin(10)))
        .unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Bracket(BracketError::NotAMatchEntry { .. })
    ));

    assert_eq!(t, before);
}

//
// TEST 5 — автопроход: один живой предшественник
//
#[test]
fn move_in_single_competitor_gets_bye() {
    let mut t = empty_mini();
    t.set_seed(WEIGHT, 1, "Alpha", "Adams").unwrap();
    t.set_seed(WEIGHT, 3, "Alpha", "Clark").unwrap();
    t.set_seed(WEIGHT, 2, "Beta", "Davis").unwrap();

    assert_eq!(t.move_in(WEIGHT, "Semis").unwrap(), 1);

    let wc = t.weight_class(WEIGHT).unwrap();
    let semis0 = wc.entry(at(wc, "Semis", 0)).unwrap();
    assert_eq!(semis0.wrestler, Some(adams()));
    assert_eq!(semis0.result, Some(MatchResult::Bye));
    assert!(semis0.is_scoring);

    let semis1 = wc.entry(at(wc, "Semis", 1)).unwrap();
    assert!(semis1.wrestler.is_none());
    assert!(semis1.result.is_none(), "per-entry policy leaves other entries alone");

    // Повторный автопроход ничего не меняет.
    assert_eq!(t.move_in(WEIGHT, "Semis").unwrap(), 0);
    assert!(registry_problems(&t).is_empty());
}

//
// TEST 6 — автопроход: оба соперника не приносят очков
//
#[test]
fn move_in_between_two_non_scoring_wrestlers() {
    let mut t = empty_mini();
    t.set_seed(WEIGHT, 1, "Alpha", "JV Adams").unwrap();
    t.set_seed(WEIGHT, 4, "Beta", "JV Baker").unwrap();
    t.set_seed(WEIGHT, 3, "Alpha", "JV Clark").unwrap();
    t.set_seed(WEIGHT, 2, "Beta", "Davis").unwrap();

    assert_eq!(t.move_in(WEIGHT, "Semis").unwrap(), 1);

    let wc = t.weight_class(WEIGHT).unwrap();
    let semis0 = wc.entry(at(wc, "Semis", 0)).unwrap();
    assert_eq!(semis0.wrestler, Some(key("JV Adams", "Alpha")));
    assert_eq!(semis0.result, Some(MatchResult::Bye));
    assert!(!semis0.is_scoring);

    // JV против основного состава — настоящая схватка.
    assert!(wc.entry(at(wc, "Semis", 1)).unwrap().wrestler.is_none());
}

//
// TEST 7 — старая политика: пустые записи раунда получают Bye
//
#[test]
fn move_in_round_global_policy_marks_empty_entries() {
    let mut t = empty_mini();
    t.move_in_policy = MoveInPolicy::RoundGlobal;
    t.set_seed(WEIGHT, 1, "Alpha", "Adams").unwrap();
    t.set_seed(WEIGHT, 3, "Alpha", "Clark").unwrap();
    t.set_seed(WEIGHT, 2, "Beta", "Davis").unwrap();

    assert_eq!(t.move_in(WEIGHT, "Semis").unwrap(), 1);

    let wc = t.weight_class(WEIGHT).unwrap();
    let semis1 = wc.entry(at(wc, "Semis", 1)).unwrap();
    assert!(semis1.wrestler.is_none());
    assert_eq!(semis1.result, Some(MatchResult::Bye));

    // Без автопроходов раунд не трогается.
    let mut t = empty_mini();
    t.move_in_policy = MoveInPolicy::RoundGlobal;
    assert_eq!(t.move_in(WEIGHT, "Semis").unwrap(), 0);
    let wc = t.weight_class(WEIGHT).unwrap();
    assert!(wc.rounds[1].entries.iter().all(|e| e.result.is_none()));
}

//
// TEST 8 — автопроход не трогает записи посева
//
#[test]
fn move_in_on_seed_round_is_an_error() {
    let mut t = seeded_mini();
    assert!(matches!(
        t.move_in(WEIGHT, "Seeds"),
        Err(TournamentError::Bracket(BracketError::NotAMatchEntry { .. }))
    ));
}

//
// TEST 9 — очистка посева снимает борца со всех записей
//
#[test]
fn clearing_a_seed_purges_advanced_wrestler() {
    let mut t = finished_mini();
    assert_eq!(t.clear_seed(WEIGHT, 1).unwrap(), Some(adams()));

    let wc = t.weight_class(WEIGHT).unwrap();
    assert!(wc.entries_of(&adams()).is_empty());
    assert!(t.teams.wrestler(WEIGHT, &adams()).is_none());
    assert!(registry_problems(&t).is_empty());
}

//
// TEST 10 — любая последовательность ввода/удаления сохраняет реестр
//
#[derive(Clone, Debug)]
enum Op {
    Store {
        entry: usize,
        winner: usize,
        with_loser: bool,
        pin: bool,
    },
    Delete {
        entry: usize,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, 0usize..2, any::<bool>(), any::<bool>()).prop_map(|(entry, winner, with_loser, pin)| {
            Op::Store {
                entry,
                winner,
                with_loser,
                pin,
            }
        }),
        (0usize..4).prop_map(|entry| Op::Delete { entry }),
    ]
}

const MATCH_ENTRIES: [(&str, usize); 4] = [("Semis", 0), ("Semis", 1), ("First Place", 0), ("Third Place", 0)];

proptest! {
    #[test]
    fn registry_matches_bracket_after_any_sequence(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut t = seeded_mini();

        for op in ops {
            match op {
                Op::Store { entry, winner, with_loser, pin } => {
                    let (round, index) = MATCH_ENTRIES[entry];
                    let live = t.selectable_winners(WEIGHT, round, index);
                    if live.is_empty() {
                        continue;
                    }
                    let w = winner % live.len();
                    let loser = if with_loser {
                        live.iter().enumerate().find(|(i, _)| *i != w).map(|(_, k)| k.clone())
                    } else {
                        None
                    };
                    let result = if pin {
                        MatchResult::Pin { time_seconds: 60 }
                    } else {
                        MatchResult::Decision { winner_score: 3, loser_score: 1 }
                    };
                    t.store_result(WEIGHT, round, index, MatchData::new(live[w].clone(), loser, result))
                        .unwrap();
                }
                Op::Delete { entry } => {
                    let (round, index) = MATCH_ENTRIES[entry];
                    t.delete_result(WEIGHT, round, index).unwrap();
                }
            }
            let problems = registry_problems(&t);
            prop_assert!(problems.is_empty(), "{:?}", problems);
        }
    }
}
