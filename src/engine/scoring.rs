// src/engine/scoring.rs

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::bracket::WeightClass;
use crate::domain::ids::EntryRef;
use crate::domain::points::{Points, ScoringRules};
use crate::domain::result::MatchResult;
use crate::domain::team::TeamRegistry;

/// Звено "нити" борца: результат, с которым он прошёл дальше, и очки
/// раунда, который он при этом выиграл. `result == None` — хвост нити
/// (дальше борец не прошёл) или результат ещё не введён.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreadLink {
    pub result: Option<MatchResult>,
    pub points: Points,
}

/// Строка командной таблицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamScore {
    pub team: String,
    pub score: f64,
}

/// Нить борца, начиная с записи `start`: идём по next_win, пока следующая
/// запись занята тем же борцом.
///
/// Звено попадает в нить, только если схватка приносит очки: флаг
/// `is_scoring` стоит и у текущей записи, и у записи, куда борец прошёл
/// (для хвоста проверяется только текущая).
pub fn entry_thread(wc: &WeightClass, start: EntryRef) -> Vec<ThreadLink> {
    let mut links = Vec::new();
    let mut cur = start;

    // Граф ацикличен, но снапшот мог быть испорчен: не больше шага на раунд.
    for _ in 0..=wc.rounds.len() {
        let Some(entry) = wc.entry(cur) else {
            break;
        };
        let Some(wrestler) = entry.wrestler.as_ref() else {
            break;
        };
        let points = wc.rounds[cur.round].points;

        let advanced = entry
            .next_win
            .and_then(|n| wc.entry(n).map(|next| (n, next)))
            .filter(|(_, next)| next.holds(wrestler));

        match advanced {
            Some((n, next)) => {
                if entry.is_scoring && next.is_scoring {
                    links.push(ThreadLink {
                        result: next.result.clone(),
                        points,
                    });
                }
                cur = n;
            }
            None => {
                if entry.is_scoring {
                    links.push(ThreadLink { result: None, points });
                }
                break;
            }
        }
    }
    links
}

/// Очки нити. Идём с конца; `Bye` до первой настоящей победы
/// откладываются и зачитываются только вместе с ней.
pub fn thread_score(links: &[ThreadLink], rules: &ScoringRules) -> f64 {
    let mut total = 0.0;
    let mut carry = 0.0;
    let mut count_byes = false;

    for link in links.iter().rev() {
        let Some(result) = &link.result else {
            continue;
        };
        let value = result.points(rules) + link.points.total();
        if result.is_bye() && !count_byes {
            carry += value;
        } else {
            total += carry + value;
            carry = 0.0;
            count_byes = true;
        }
    }
    total
}

/// Очки команд в одной весовой категории.
///
/// Нити начинаются в записях без `previous` (посев и записи, куда
/// попадают только проигравшие). Финальные раунды нитей не начинают.
pub fn weight_class_scores(wc: &WeightClass, rules: &ScoringRules) -> BTreeMap<String, f64> {
    let mut scores: BTreeMap<String, f64> = BTreeMap::new();

    for (r, round) in wc.rounds.iter().enumerate() {
        if round.is_terminal() {
            continue;
        }
        for (i, entry) in round.entries.iter().enumerate() {
            if !entry.previous.is_empty() {
                continue;
            }
            let Some(wrestler) = entry.wrestler.as_ref() else {
                continue;
            };
            let score = thread_score(&entry_thread(wc, EntryRef::new(r, i)), rules);
            *scores.entry(wrestler.team.clone()).or_insert(0.0) += score;
        }
    }
    scores
}

/// Таблица команд по убыванию очков. При равенстве — порядок добавления команд.
pub fn standings(teams: &TeamRegistry) -> Vec<TeamScore> {
    let mut table: Vec<TeamScore> = teams
        .iter()
        .map(|t| TeamScore {
            team: t.name.clone(),
            score: t.total_score(),
        })
        .collect();
    table.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    table
}
