// src/engine/seeding.rs

use crate::domain::bracket::WeightClass;
use crate::domain::ids::{EntryRef, WrestlerKey};
use crate::domain::points::ScoringRules;
use crate::domain::team::TeamRegistry;
use crate::domain::tournament::TournamentError;
use crate::engine::results::vacate;

fn seed_slot(wc: &WeightClass, seed: u32) -> Result<EntryRef, TournamentError> {
    wc.seed_slot(seed).ok_or_else(|| TournamentError::UnknownSeed {
        weight: wc.name.clone(),
        seed,
    })
}

/// Убрать борца из сетки и из ростера команды.
fn purge(wc: &mut WeightClass, teams: &mut TeamRegistry, key: &WrestlerKey) {
    for at in wc.entries_of(key) {
        vacate(wc, teams, at);
    }
    if let Some(team) = teams.get_mut(&key.team) {
        team.remove_wrestler(&wc.name, &key.name);
    }
}

/// Поставить борца на место посева.
///
/// - пустое имя — очистить место;
/// - тот же борец — ничего не делаем;
/// - та же команда, другое имя — переименование на месте (результаты сохраняются);
/// - иначе прежний обладатель удаляется, новый создаётся.
pub fn set_seed(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    rules: &ScoringRules,
    seed: u32,
    team: &str,
    name: &str,
) -> Result<EntryRef, TournamentError> {
    let at = seed_slot(wc, seed)?;
    let name = name.trim();
    if name.is_empty() {
        clear_seed(wc, teams, seed)?;
        return Ok(at);
    }
    if !teams.contains(team) {
        return Err(TournamentError::UnknownTeam {
            name: team.to_string(),
        });
    }

    let key = WrestlerKey::new(name, team);
    let current = wc.entry(at).and_then(|e| e.wrestler.clone());

    if let Some(cur) = &current {
        if *cur == key {
            return Ok(at);
        }
        if cur.team == team {
            rename_wrestler(wc, teams, team, &cur.name, name)?;
            return Ok(at);
        }
    }

    let seed_round = at.round;
    let taken = wc
        .entries_of(&key)
        .into_iter()
        .any(|other| other.round == seed_round && other != at);
    if taken {
        return Err(TournamentError::DuplicateWrestler {
            team: team.to_string(),
            weight: wc.name.clone(),
            name: name.to_string(),
        });
    }

    if let Some(cur) = current {
        purge(wc, teams, &cur);
    }

    let is_scoring = rules.is_scoring_name(name);
    if let Some(t) = teams.get_mut(team) {
        t.add_wrestler(name, &wc.name, is_scoring);
    }
    if let Some(entry) = wc.entry_mut(at) {
        entry.wrestler = Some(key);
        entry.is_scoring = is_scoring;
        entry.result = None;
    }

    log::debug!("weight {}: seed {} <- {} ({})", wc.name, seed, name, team);
    Ok(at)
}

/// Очистить место посева: борец удаляется из сетки и из ростера.
pub fn clear_seed(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    seed: u32,
) -> Result<Option<WrestlerKey>, TournamentError> {
    let at = seed_slot(wc, seed)?;
    let Some(cur) = wc.entry(at).and_then(|e| e.wrestler.clone()) else {
        return Ok(None);
    };
    purge(wc, teams, &cur);
    Ok(Some(cur))
}

/// Поменять местами двух посеянных. Разрешено, пока ни один из них
/// не продвинулся дальше посева.
pub fn swap_seeds(wc: &mut WeightClass, a: u32, b: u32) -> Result<(), TournamentError> {
    let at_a = seed_slot(wc, a)?;
    let at_b = seed_slot(wc, b)?;
    if at_a == at_b {
        return Ok(());
    }

    for (seed, at) in [(a, at_a), (b, at_b)] {
        let advanced = wc
            .entry(at)
            .and_then(|e| e.wrestler.as_ref())
            .map(|key| wc.entries_of(key).len() > 1)
            .unwrap_or(false);
        if advanced {
            return Err(TournamentError::SeedInUse {
                weight: wc.name.clone(),
                seed,
            });
        }
    }

    let (wa, sa) = match wc.entry(at_a) {
        Some(e) => (e.wrestler.clone(), e.is_scoring),
        None => return Ok(()),
    };
    let (wb, sb) = match wc.entry(at_b) {
        Some(e) => (e.wrestler.clone(), e.is_scoring),
        None => return Ok(()),
    };
    if let Some(e) = wc.entry_mut(at_a) {
        e.wrestler = wb;
        e.is_scoring = sb;
    }
    if let Some(e) = wc.entry_mut(at_b) {
        e.wrestler = wa;
        e.is_scoring = sa;
    }
    Ok(())
}

/// Переименовать борца команды в весовой категории. Записи сетки
/// следуют за ним, результаты сохраняются.
pub fn rename_wrestler(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    team: &str,
    old: &str,
    new: &str,
) -> Result<(), TournamentError> {
    let new = new.trim();
    if new.is_empty() {
        return Err(TournamentError::InvalidConfig("wrestler name is empty".into()));
    }
    if old == new {
        return Ok(());
    }

    let t = teams.get_mut(team).ok_or_else(|| TournamentError::UnknownTeam {
        name: team.to_string(),
    })?;
    if t.wrestler(&wc.name, new).is_some() {
        return Err(TournamentError::DuplicateWrestler {
            team: team.to_string(),
            weight: wc.name.clone(),
            name: new.to_string(),
        });
    }
    let w = t
        .wrestler_mut(&wc.name, old)
        .ok_or_else(|| TournamentError::UnknownWrestler {
            team: team.to_string(),
            name: old.to_string(),
        })?;
    w.name = new.to_string();

    let old_key = WrestlerKey::new(old, team);
    for at in wc.entries_of(&old_key) {
        if let Some(entry) = wc.entry_mut(at) {
            entry.wrestler = Some(WrestlerKey::new(new, team));
        }
    }
    Ok(())
}
