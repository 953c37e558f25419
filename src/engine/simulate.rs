// src/engine/simulate.rs

use crate::domain::bracket::WeightClass;
use crate::domain::ids::EntryRef;
use crate::domain::result::MatchResult;
use crate::domain::team::TeamRegistry;
use crate::domain::tournament::{Tournament, TournamentError};
use crate::engine::errors::BracketError;
use crate::engine::results::{self, MatchData};
use crate::engine::RandomSource;

/// Случайный исход схватки: туше, решение (разной разницы) или неявка.
fn random_result<R: RandomSource + ?Sized>(rng: &mut R) -> MatchResult {
    match rng.next_below(10) {
        0..=3 => MatchResult::Pin {
            time_seconds: 10 + rng.next_below(350),
        },
        4..=8 => {
            let loser_score = rng.next_below(10) as i32;
            let margin = 1 + rng.next_below(18) as i32;
            MatchResult::Decision {
                winner_score: loser_score + margin,
                loser_score,
            }
        }
        _ => MatchResult::Default,
    }
}

/// Прогнать весовую категорию до конца: по раундам в порядке объявления
/// проставить автопроходы и разыграть все готовые схватки.
///
/// Возвращает число введённых результатов (включая автопроходы).
pub fn simulate_weight<R: RandomSource + ?Sized>(
    wc: &mut WeightClass,
    teams: &mut TeamRegistry,
    rng: &mut R,
) -> Result<usize, BracketError> {
    let mut stored = 0;

    for r in 0..wc.rounds.len() {
        if wc.rounds[r].is_seed_round() {
            continue;
        }
        for i in 0..wc.rounds[r].num_entries() {
            let at = EntryRef::new(r, i);
            if results::move_in_entry(wc, teams, at)? {
                stored += 1;
                continue;
            }
            if wc.expect_entry(at)?.is_filled() {
                continue;
            }

            let live = wc.live_previous(at);
            if live.len() < 2 {
                continue;
            }
            let w = rng.next_below(live.len() as u32) as usize;
            let winner = live[w].1.clone();
            let loser = live
                .iter()
                .enumerate()
                .find(|(j, _)| *j != w)
                .map(|(_, (_, key))| key.clone());

            // Очки схватки считаются по флагу победителя, JV не приносит.
            let is_scoring = teams
                .wrestler(&wc.name, &winner)
                .map(|w| w.is_scoring)
                .unwrap_or(true);
            let data = MatchData {
                is_scoring,
                ..MatchData::new(winner, loser, random_result(rng))
            };
            results::store_result(wc, teams, at, data)?;
            stored += 1;
        }
    }

    log::info!("weight {}: simulated {} results", wc.name, stored);
    Ok(stored)
}

/// Прогнать все весовые категории турнира и пересчитать очки.
pub fn simulate_tournament<R: RandomSource + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<usize, TournamentError> {
    let mut stored = 0;
    {
        let Tournament {
            weight_classes,
            teams,
            ..
        } = tournament;
        for wc in weight_classes.values_mut() {
            stored += simulate_weight(wc, teams, rng)?;
        }
    }
    tournament.calc_scores(None);
    Ok(stored)
}
