// src/engine/results.rs

use serde::{Deserialize, Serialize};

use crate::domain::bracket::WeightClass;
use crate::domain::ids::{EntryRef, WrestlerKey};
use crate::domain::result::MatchResult;
use crate::domain::team::TeamRegistry;
use crate::domain::RoundIndex;
use crate::engine::errors::BracketError;

/// Данные введённого результата схватки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchData {
    pub winner: WrestlerKey,
    /// Проигравший (если был). Уходит по lose-ребру своей записи.
    pub loser: Option<WrestlerKey>,
    pub result: MatchResult,
    /// Приносит ли эта схватка очки команде победителя.
    pub is_scoring: bool,
}

impl MatchData {
    pub fn new(winner: WrestlerKey, loser: Option<WrestlerKey>, result: MatchResult) -> Self {
        Self {
            winner,
            loser,
            result,
            is_scoring: true,
        }
    }

    pub fn non_scoring(mut self) -> Self {
        self.is_scoring = false;
        self
    }
}

/// Как раунд проставляет автопроходы.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MoveInPolicy {
    /// Каждая запись решается отдельно.
    #[default]
    PerEntry,
    /// Старое поведение: если хоть одной записи раунда нужен был
    /// автопроход, все пустые записи раунда получают `Bye`.
    RoundGlobal,
}

/// Поставить борца в запись: прежний обладатель забывает свой результат,
/// новый (если есть результат) запоминает.
pub(crate) fn place(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    at: EntryRef,
    wrestler: WrestlerKey,
    result: Option<MatchResult>,
    is_scoring: bool,
) -> Result<(), BracketError> {
    let id = wc.entry_id(at).ok_or_else(|| wc.entry_not_found(at))?;
    vacate(wc, teams, at);

    let entry = wc.entry_mut(at).ok_or_else(|| BracketError::EntryNotFound {
        round: id.round.clone(),
        index: id.index,
    })?;
    entry.wrestler = Some(wrestler.clone());
    entry.result = result.clone();
    entry.is_scoring = is_scoring;

    if let Some(result) = result {
        teams.remember(&wc.name, &wrestler, id, result);
    }
    Ok(())
}

/// Освободить запись. Возвращает прежнего обладателя.
pub(crate) fn vacate(wc: &mut WeightClass, teams: &mut TeamRegistry, at: EntryRef) -> Option<WrestlerKey> {
    let id = wc.entry_id(at)?;
    let had_result = wc.entry(at)?.result.is_some();
    let old = wc.entry_mut(at)?.clear()?;
    if had_result {
        teams.forget(&wc.name, &old, &id);
    }
    Some(old)
}

fn intrinsic_scoring(wc: &WeightClass, teams: &TeamRegistry, from: EntryRef, key: &WrestlerKey) -> bool {
    teams
        .wrestler(&wc.name, key)
        .map(|w| w.is_scoring)
        .or_else(|| wc.entry(from).map(|e| e.is_scoring))
        .unwrap_or(true)
}

fn ensure_match(wc: &WeightClass, at: EntryRef) -> Result<(), BracketError> {
    if wc.expect_entry(at)?.is_match() {
        Ok(())
    } else {
        Err(BracketError::NotAMatchEntry {
            round: wc.round_label(at.round),
            index: at.entry,
        })
    }
}

/// StoreResult: победитель занимает запись, проигравший уходит по lose-ребру
/// записи, в которой стоял.
pub fn store_result(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    at: EntryRef,
    data: MatchData,
) -> Result<(), BracketError> {
    ensure_match(wc, at)?;

    let live = wc.live_previous(at);
    if live.is_empty() {
        return Err(BracketError::NoCompetitors {
            round: wc.round_label(at.round),
            index: at.entry,
        });
    }

    if !live.iter().any(|(_, w)| *w == data.winner) {
        return Err(BracketError::InvalidWinner {
            round: wc.round_label(at.round),
            index: at.entry,
            wrestler: data.winner.to_string(),
        });
    }

    let loser_from = match &data.loser {
        None => None,
        Some(loser) => {
            let from = live
                .iter()
                .find(|(_, w)| w == loser && *loser != data.winner)
                .map(|(from, _)| *from)
                .ok_or_else(|| BracketError::InvalidLoser {
                    round: wc.round_label(at.round),
                    index: at.entry,
                    wrestler: loser.to_string(),
                })?;
            Some(from)
        }
    };

    log::debug!(
        "weight {}: {}#{} <- {} ({})",
        wc.name,
        wc.round_label(at.round),
        at.entry,
        data.winner,
        data.result
    );

    // Незачётный борец не приносит очков, что бы ни пришло во вводе.
    let winner_from = live
        .iter()
        .find(|(_, w)| *w == data.winner)
        .map(|(from, _)| *from)
        .unwrap_or(at);
    let is_scoring = data.is_scoring && intrinsic_scoring(wc, teams, winner_from, &data.winner);

    place(wc, teams, at, data.winner, Some(data.result), is_scoring)?;

    if let (Some(loser), Some(from)) = (data.loser, loser_from) {
        route_loser(wc, teams, from, loser)?;
    }
    Ok(())
}

fn route_loser(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    from: EntryRef,
    loser: WrestlerKey,
) -> Result<(), BracketError> {
    let Some(target) = wc.entry(from).and_then(|e| e.next_lose) else {
        // Из этой записи проигравшие выбывают.
        return Ok(());
    };
    let is_scoring = intrinsic_scoring(wc, teams, from, &loser);
    place(wc, teams, target, loser, None, is_scoring)
}

/// DeleteResult: очистить запись, прежний обладатель забывает результат.
pub fn delete_result(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    at: EntryRef,
) -> Result<Option<WrestlerKey>, BracketError> {
    ensure_match(wc, at)?;
    Ok(vacate(wc, teams, at))
}

/// Автопроход одной записи. `true` — борец продвинут.
///
/// - ровно один живой предшественник — проходит с `Bye`;
/// - два живых, но оба не приносят очков — первый проходит с `Bye`;
/// - иначе запись не трогается.
pub fn move_in_entry(wc: &mut WeightClass, teams: &mut TeamRegistry, at: EntryRef) -> Result<bool, BracketError> {
    ensure_match(wc, at)?;
    if wc.expect_entry(at)?.is_filled() {
        return Ok(false);
    }

    let live = wc.live_previous(at);
    let advance = match live.as_slice() {
        [(from, w)] => Some((w.clone(), intrinsic_scoring(wc, teams, *from, w))),
        [(a_from, a), rest @ ..]
            if !intrinsic_scoring(wc, teams, *a_from, a)
                && rest.iter().all(|(f, w)| !intrinsic_scoring(wc, teams, *f, w)) =>
        {
            Some((a.clone(), false))
        }
        _ => None,
    };

    match advance {
        Some((wrestler, is_scoring)) => {
            place(wc, teams, at, wrestler, Some(MatchResult::Bye), is_scoring)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Автопроход по всему раунду. Возвращает число продвинутых борцов.
pub fn move_in_round(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    round: RoundIndex,
    policy: MoveInPolicy,
) -> Result<usize, BracketError> {
    let len = wc
        .round(round)
        .map(|r| r.num_entries())
        .ok_or_else(|| BracketError::UnknownRound {
            name: format!("#{}", round),
        })?;

    let mut advanced = 0;
    for i in 0..len {
        if move_in_entry(wc, teams, EntryRef::new(round, i))? {
            advanced += 1;
        }
    }

    if policy == MoveInPolicy::RoundGlobal && advanced > 0 {
        if let Some(r) = wc.rounds.get_mut(round) {
            for entry in r.entries.iter_mut().filter(|e| !e.is_filled() && e.result.is_none()) {
                entry.result = Some(MatchResult::Bye);
            }
        }
    }

    log::info!(
        "weight {}: move-in {} advanced {} of {}",
        wc.name,
        wc.round_label(round),
        advanced,
        len
    );
    Ok(advanced)
}
