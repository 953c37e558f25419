// tests/bracket_link_tests.rs
//
// Граф сетки: раунды, записи, связывание и проверка ссылок.

mod common;

use bracket_engine::domain::*;
use bracket_engine::engine::BracketError;
use proptest::prelude::*;

use common::*;

//
// TEST 1 — карта неверной длины отклоняется без мутаций
//
proptest! {
    #[test]
    fn link_count_mismatch_leaves_round_unlinked(n in 1usize..=64, delta in 1usize..=3, longer in any::<bool>()) {
        let mut wc = two_round_class("103", n, n);
        let m = if longer { n + delta } else { n.saturating_sub(delta) };
        prop_assume!(m != n);
        let before = wc.clone();

        let err = wc.set_next_win_round(0, 1, &vec![0; m]).unwrap_err();
        prop_assert_eq!(
            err,
            BracketError::LinkCountMismatch { round: "A".into(), expected: n, actual: m }
        );
        prop_assert_eq!(&wc, &before);
        prop_assert!(wc.rounds[0].next_win.is_none());
        prop_assert!(wc.rounds[1].entries.iter().all(|e| e.previous.is_empty()));
    }
}

//
// TEST 2 — две записи в одну цель: previous в порядке индексов источника
//
#[test]
fn fan_in_registers_previous_in_source_order() {
    let mut wc = two_round_class("103", 4, 2);
    wc.set_next_win_round(0, 1, &[0, 0, 1, 1]).unwrap();

    assert_eq!(wc.rounds[0].next_win, Some(1));
    assert_eq!(
        wc.rounds[1].entries[0].previous,
        vec![EntryRef::new(0, 0), EntryRef::new(0, 1)]
    );
    assert_eq!(
        wc.rounds[1].entries[1].previous,
        vec![EntryRef::new(0, 2), EntryRef::new(0, 3)]
    );
    assert_eq!(wc.rounds[0].entries[3].next_win, Some(EntryRef::new(1, 1)));
}

//
// TEST 3 — lose-рёбра не регистрируют previous
//
#[test]
fn lose_links_do_not_touch_previous() {
    let mut wc = two_round_class("103", 4, 2);
    wc.set_next_lose_round(0, 1, &[1, 1, 0, 0]).unwrap();

    assert_eq!(wc.rounds[0].next_lose, Some(1));
    assert!(wc.rounds[0].next_win.is_none());
    assert_eq!(wc.rounds[0].entries[0].next_lose, Some(EntryRef::new(1, 1)));
    assert!(wc.rounds[1].entries.iter().all(|e| e.previous.is_empty()));
}

//
// TEST 4 — повторное связывание и цель вне диапазона
//
#[test]
fn relink_and_out_of_range_are_rejected() {
    let mut wc = two_round_class("103", 4, 2);

    let before = wc.clone();
    let err = wc.set_next_win_round(0, 1, &[0, 0, 1, 2]).unwrap_err();
    assert!(matches!(
        err,
        BracketError::LinkTargetOutOfRange { index: 2, len: 2, .. }
    ));
    assert_eq!(wc, before, "no partial linking");

    wc.set_next_win_round(0, 1, &[0, 0, 1, 1]).unwrap();
    let linked = wc.clone();
    let err = wc.set_next_win_round(0, 1, &[0, 0, 1, 1]).unwrap_err();
    assert!(matches!(err, BracketError::AlreadyLinked { edge: "next_win", .. }));
    assert_eq!(wc, linked, "previous lists are not doubled");

    assert!(matches!(
        wc.set_next_lose_round(0, 7, &[0, 0, 0, 0]),
        Err(BracketError::UnknownRound { .. })
    ));
}

//
// TEST 5 — раунды и записи
//
#[test]
fn rounds_and_entries() {
    let mut wc = WeightClass::new("112");
    let seeds = wc.new_round("Seeds", Points::ZERO).unwrap();
    wc.new_entries(seeds, &EntrySpec::Seeds(vec![1, 4, 3, 2])).unwrap();

    assert_eq!(
        wc.new_round("Seeds", Points::ZERO),
        Err(BracketError::DuplicateRound { name: "Seeds".into() })
    );
    assert!(matches!(
        wc.new_entries(seeds, &EntrySpec::Count(2)),
        Err(BracketError::MixedEntryKinds { .. })
    ));

    assert_eq!(wc.seed_round(), Some(0));
    assert_eq!(wc.seed_slot(2), Some(EntryRef::new(0, 3)));
    assert_eq!(wc.seed_slot(5), None);
    assert!(wc.rounds[0].is_seed_round());
    assert!(wc.rounds[0].is_terminal());

    let entry = wc.entry(EntryRef::new(0, 1)).unwrap();
    assert_eq!(entry.seed_number(), Some(4));
    assert!(entry.is_scoring);
    assert!(!entry.is_filled());

    assert_eq!(wc.entry_id(EntryRef::new(0, 1)), Some(EntryId::new("Seeds", 1)));
    assert_eq!(wc.entry_id(EntryRef::new(0, 4)), None);
    assert!(matches!(
        wc.expect_entry(EntryRef::new(3, 0)),
        Err(BracketError::EntryNotFound { .. })
    ));
}

//
// TEST 6 — живые предшественники
//
#[test]
fn live_previous_skips_empty_entries() {
    let mut wc = two_round_class("103", 4, 2);
    wc.set_next_win_round(0, 1, &[0, 0, 1, 1]).unwrap();
    wc.entry_mut(EntryRef::new(0, 1)).unwrap().wrestler = Some(key("Baker", "Beta"));
    wc.entry_mut(EntryRef::new(0, 2)).unwrap().wrestler = Some(key("Clark", "Alpha"));
    wc.entry_mut(EntryRef::new(0, 3)).unwrap().wrestler = Some(key("Davis", "Beta"));

    assert_eq!(
        wc.live_previous(EntryRef::new(1, 0)),
        vec![(EntryRef::new(0, 1), key("Baker", "Beta"))]
    );
    assert_eq!(wc.live_previous(EntryRef::new(1, 1)).len(), 2);
    assert!(wc.live_previous(EntryRef::new(9, 9)).is_empty());
}

//
// TEST 7 — проверка висячих ссылок
//
#[test]
fn validate_links_finds_dangling_refs() {
    let mut wc = two_round_class("103", 4, 2);
    wc.set_next_win_round(0, 1, &[0, 0, 1, 1]).unwrap();
    assert!(wc.validate_links().is_ok());

    wc.rounds[0].entries[2].next_lose = Some(EntryRef::new(5, 0));
    assert!(matches!(
        wc.validate_links(),
        Err(BracketError::DanglingLink { .. })
    ));
}

//
// TEST 8 — разворот lose-рёбер раунда
//
#[test]
fn reverse_lose_links_mirrors_targets() {
    let mut wc = two_round_class("103", 4, 2);
    wc.set_next_lose_round(0, 1, &[0, 0, 1, 1]).unwrap();
    wc.reverse_lose_links(0).unwrap();

    let targets: Vec<_> = wc.rounds[0].entries.iter().map(|e| e.next_lose).collect();
    assert_eq!(
        targets,
        vec![
            Some(EntryRef::new(1, 1)),
            Some(EntryRef::new(1, 1)),
            Some(EntryRef::new(1, 0)),
            Some(EntryRef::new(1, 0)),
        ]
    );
    assert!(wc.reverse_lose_links(9).is_err());
}
