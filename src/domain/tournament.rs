// src/domain/tournament.rs

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::bracket::WeightClass;
use crate::domain::ids::{EntryRef, WrestlerKey};
use crate::domain::points::ScoringRules;
use crate::domain::team::{Team, TeamRegistry};
use crate::engine::errors::BracketError;
use crate::engine::layout::{paint_weight, Renderer};
use crate::engine::placement::{self, Bout, FastFall, PlaceWinners};
use crate::engine::results::{self, MatchData, MoveInPolicy};
use crate::engine::scoring::{self, TeamScore};
use crate::engine::seeding;

/// Турнир: весовые категории (каждая — своя сетка) и реестр команд.
///
/// Весь граф — одно значение: сохраняется и восстанавливается целиком.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tournament {
    pub name: String,
    /// Имя шаблона, по которому построены сетки.
    pub template: String,
    /// Порядок номеров посева в первом раунде.
    pub seeds: Vec<u32>,
    pub rules: ScoringRules,
    pub move_in_policy: MoveInPolicy,
    pub teams: TeamRegistry,
    pub weight_classes: BTreeMap<String, WeightClass>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, template: impl Into<String>, seeds: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            seeds,
            rules: ScoringRules::default(),
            move_in_policy: MoveInPolicy::default(),
            teams: TeamRegistry::new(),
            weight_classes: BTreeMap::new(),
        }
    }

    /// Заменить правила подсчёта (с валидацией).
    pub fn set_rules(&mut self, rules: ScoringRules) -> Result<(), TournamentError> {
        rules.validate().map_err(TournamentError::InvalidConfig)?;
        self.rules = rules;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Весовые категории
    // ---------------------------------------------------------------------

    /// Добавить готовую (уже связанную) весовую категорию.
    pub fn insert_weight_class(&mut self, wc: WeightClass) -> Result<(), TournamentError> {
        if self.weight_classes.contains_key(&wc.name) {
            return Err(TournamentError::DuplicateWeight { weight: wc.name });
        }
        self.weight_classes.insert(wc.name.clone(), wc);
        Ok(())
    }

    pub fn weight_class(&self, weight: &str) -> Option<&WeightClass> {
        self.weight_classes.get(weight)
    }

    pub fn weight_class_mut(&mut self, weight: &str) -> Option<&mut WeightClass> {
        self.weight_classes.get_mut(weight)
    }

    /// Веса по возрастанию: числа сравниваются как числа, остальное — как строки.
    pub fn weights(&self) -> Vec<String> {
        let mut weights: Vec<String> = self.weight_classes.keys().cloned().collect();
        weights.sort_by(|a, b| compare_weights(a, b));
        weights
    }

    /// Имена раундов в порядке объявления (по первой весовой категории).
    pub fn round_names(&self) -> Vec<String> {
        self.weights()
            .first()
            .and_then(|w| self.weight_classes.get(w))
            .map(WeightClass::round_names)
            .unwrap_or_default()
    }

    fn parts_mut(&mut self, weight: &str) -> Option<(&mut WeightClass, &mut TeamRegistry, &ScoringRules)> {
        let Self {
            weight_classes,
            teams,
            rules,
            ..
        } = self;
        let wc = weight_classes.get_mut(weight)?;
        Some((wc, teams, rules))
    }

    fn locate(&self, weight: &str, round: &str, index: usize) -> Option<EntryRef> {
        let wc = self.weight_classes.get(weight)?;
        let r = wc.round_index(round)?;
        Some(EntryRef::new(r, index))
    }

    // ---------------------------------------------------------------------
    // Команды
    // ---------------------------------------------------------------------

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    pub fn team_names(&self) -> Vec<String> {
        self.teams.names()
    }

    /// Добавить команду. Дубликаты и пустые имена отклоняются.
    pub fn add_team(&mut self, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidConfig("team name is empty".into()));
        }
        if self.teams.contains(name) {
            return Err(TournamentError::DuplicateTeam {
                name: name.to_string(),
            });
        }
        self.teams.push(Team::new(name));
        Ok(())
    }

    /// Удалить команду вместе с её борцами во всех сетках.
    /// Последнюю команду удалить нельзя.
    pub fn remove_team(&mut self, name: &str) -> Result<Team, TournamentError> {
        if !self.teams.contains(name) {
            return Err(TournamentError::UnknownTeam {
                name: name.to_string(),
            });
        }
        if self.teams.len() <= 1 {
            return Err(TournamentError::LastTeam);
        }

        for wc in self.weight_classes.values_mut() {
            for at in wc.entry_refs().collect::<Vec<_>>() {
                if let Some(entry) = wc.entry_mut(at) {
                    if entry.wrestler.as_ref().map(|w| w.team == name).unwrap_or(false) {
                        entry.clear();
                    }
                }
            }
        }

        log::info!("tournament {}: team {} removed", self.name, name);
        self.teams.remove(name).ok_or_else(|| TournamentError::UnknownTeam {
            name: name.to_string(),
        })
    }

    /// Переименовать команду. Ссылки во всех записях следуют за ней.
    pub fn rename_team(&mut self, old: &str, new: &str) -> Result<(), TournamentError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(TournamentError::InvalidConfig("team name is empty".into()));
        }
        if old == new {
            return Ok(());
        }
        if self.teams.contains(new) {
            return Err(TournamentError::DuplicateTeam {
                name: new.to_string(),
            });
        }

        let team = self
            .teams
            .get_mut(old)
            .ok_or_else(|| TournamentError::UnknownTeam {
                name: old.to_string(),
            })?;
        team.name = new.to_string();
        for list in team.wrestlers.values_mut() {
            for w in list.iter_mut() {
                w.team = new.to_string();
            }
        }

        for wc in self.weight_classes.values_mut() {
            for round in wc.rounds.iter_mut() {
                for entry in round.entries.iter_mut() {
                    if let Some(w) = entry.wrestler.as_mut() {
                        if w.team == old {
                            w.team = new.to_string();
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Исправить написание имени борца команды (во всех весах, где он есть).
    pub fn rename_wrestler(&mut self, team: &str, old: &str, new: &str) -> Result<(), TournamentError> {
        let weights: Vec<String> = self
            .teams
            .get(team)
            .ok_or_else(|| TournamentError::UnknownTeam {
                name: team.to_string(),
            })?
            .all_wrestlers()
            .filter(|w| w.name == old)
            .map(|w| w.weight.clone())
            .collect();

        if weights.is_empty() {
            return Err(TournamentError::UnknownWrestler {
                team: team.to_string(),
                name: old.to_string(),
            });
        }

        for weight in weights {
            match self.parts_mut(&weight) {
                Some((wc, teams, _)) => seeding::rename_wrestler(wc, teams, team, old, new)?,
                None => {
                    // Борец без сетки (вес удалён): меняем только в ростере.
                    if let Some(w) = self
                        .teams
                        .get_mut(team)
                        .and_then(|t| t.wrestler_mut(&weight, old))
                    {
                        w.name = new.to_string();
                    }
                }
            }
        }
        Ok(())
    }

    /// Добавить (или снять) очки команде вручную.
    pub fn adjust_points(&mut self, team: &str, delta: f64) -> Result<f64, TournamentError> {
        let t = self
            .teams
            .get_mut(team)
            .ok_or_else(|| TournamentError::UnknownTeam {
                name: team.to_string(),
            })?;
        t.point_adjust += delta;
        Ok(t.point_adjust)
    }

    // ---------------------------------------------------------------------
    // Посев
    // ---------------------------------------------------------------------

    /// Поставить борца `(team, name)` на место посева `seed`.
    pub fn set_seed(&mut self, weight: &str, seed: u32, team: &str, name: &str) -> Result<(), TournamentError> {
        let Some((wc, teams, rules)) = self.parts_mut(weight) else {
            log::warn!("set_seed: weight {} not found", weight);
            return Ok(());
        };
        seeding::set_seed(wc, teams, rules, seed, team, name).map(|_| ())
    }

    pub fn clear_seed(&mut self, weight: &str, seed: u32) -> Result<Option<WrestlerKey>, TournamentError> {
        let Some((wc, teams, _)) = self.parts_mut(weight) else {
            log::warn!("clear_seed: weight {} not found", weight);
            return Ok(None);
        };
        seeding::clear_seed(wc, teams, seed)
    }

    pub fn swap_seeds(&mut self, weight: &str, a: u32, b: u32) -> Result<(), TournamentError> {
        let Some(wc) = self.weight_classes.get_mut(weight) else {
            log::warn!("swap_seeds: weight {} not found", weight);
            return Ok(());
        };
        seeding::swap_seeds(wc, a, b)
    }

    // ---------------------------------------------------------------------
    // Результаты
    // ---------------------------------------------------------------------

    /// Кого можно выбрать победителем записи. Пустой список — ввод результата
    /// предлагать нельзя.
    pub fn selectable_winners(&self, weight: &str, round: &str, index: usize) -> Vec<WrestlerKey> {
        match (self.weight_classes.get(weight), self.locate(weight, round, index)) {
            (Some(wc), Some(at)) => wc.live_previous(at).into_iter().map(|(_, w)| w).collect(),
            _ => Vec::new(),
        }
    }

    pub fn store_result(
        &mut self,
        weight: &str,
        round: &str,
        index: usize,
        data: MatchData,
    ) -> Result<(), TournamentError> {
        let Some(at) = self.locate(weight, round, index) else {
            log::warn!("store_result: {} / {} not found", weight, round);
            return Ok(());
        };
        if let Some((wc, teams, _)) = self.parts_mut(weight) {
            results::store_result(wc, teams, at, data)?;
        }
        Ok(())
    }

    pub fn delete_result(
        &mut self,
        weight: &str,
        round: &str,
        index: usize,
    ) -> Result<Option<WrestlerKey>, TournamentError> {
        let Some(at) = self.locate(weight, round, index) else {
            log::warn!("delete_result: {} / {} not found", weight, round);
            return Ok(None);
        };
        match self.parts_mut(weight) {
            Some((wc, teams, _)) => Ok(results::delete_result(wc, teams, at)?),
            None => Ok(None),
        }
    }

    /// Автопроход (bye) по всему раунду. Возвращает число продвинутых борцов.
    pub fn move_in(&mut self, weight: &str, round: &str) -> Result<usize, TournamentError> {
        let policy = self.move_in_policy;
        let Some((wc, teams, _)) = self.parts_mut(weight) else {
            log::warn!("move_in: weight {} not found", weight);
            return Ok(0);
        };
        let Some(r) = wc.round_index(round) else {
            log::warn!("move_in: round {} not found in weight {}", round, weight);
            return Ok(0);
        };
        Ok(results::move_in_round(wc, teams, r, policy)?)
    }

    // ---------------------------------------------------------------------
    // Агрегаты
    // ---------------------------------------------------------------------

    /// Пересчитать очки по весу (или по всем весам при `None`) и вернуть
    /// таблицу команд по убыванию очков.
    pub fn calc_scores(&mut self, weight: Option<&str>) -> Vec<TeamScore> {
        let weights = match weight {
            Some(w) if self.weight_classes.contains_key(w) => vec![w.to_string()],
            Some(w) => {
                log::warn!("calc_scores: weight {} not found", w);
                Vec::new()
            }
            None => self.weights(),
        };

        for w in weights {
            if let Some((wc, teams, rules)) = self.parts_mut(&w) {
                let per_team = scoring::weight_class_scores(wc, rules);
                for team in teams.iter_mut() {
                    let score = per_team.get(&team.name).copied().unwrap_or(0.0);
                    team.set_weight_score(&w, score);
                }
            }
        }

        self.team_scores()
    }

    /// Текущая таблица без пересчёта.
    pub fn team_scores(&self) -> Vec<TeamScore> {
        scoring::standings(&self.teams)
    }

    pub fn get_bouts(&self, weights: &[String], rounds: &[String]) -> Vec<Bout> {
        let mut bouts = Vec::new();
        for weight in weights {
            let Some(wc) = self.weight_classes.get(weight) else {
                continue;
            };
            for round in rounds {
                if let Some(r) = wc.round_index(round) {
                    bouts.extend(placement::round_bouts(wc, r));
                }
            }
        }
        bouts
    }

    pub fn get_place_winners(&self, weights: &[String]) -> Vec<PlaceWinners> {
        weights
            .iter()
            .filter_map(|w| self.weight_classes.get(w))
            .map(placement::place_winners)
            .collect()
    }

    pub fn calc_fast_fall(&self) -> Vec<FastFall> {
        placement::fast_fall(&self.teams)
    }

    pub fn count_bouts(&self) -> usize {
        self.weight_classes.values().map(placement::count_bouts).sum()
    }

    /// Нарисовать сетку веса через рендерер. `None` — веса нет.
    pub fn paint<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        weight: &str,
        refresh_labels: bool,
    ) -> Option<(i32, i32)> {
        let wc = self.weight_classes.get(weight)?;
        Some(paint_weight(wc, renderer, refresh_labels))
    }
}

/// Сравнение весов: "95" < "103" < "Hwt".
pub fn compare_weights(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Ошибки уровня турнира.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TournamentError {
    #[error("Team {name} not found")]
    UnknownTeam { name: String },

    #[error("Team {name} already exists")]
    DuplicateTeam { name: String },

    #[error("You cannot delete the last team")]
    LastTeam,

    #[error("Weight class {weight} already exists")]
    DuplicateWeight { weight: String },

    #[error("Wrestler {name} not found in team {team}")]
    UnknownWrestler { team: String, name: String },

    #[error("Wrestler {name} already exists in team {team} at {weight}")]
    DuplicateWrestler {
        team: String,
        weight: String,
        name: String,
    },

    #[error("Seed {seed} not found in weight {weight}")]
    UnknownSeed { weight: String, seed: u32 },

    #[error("Seed {seed} in weight {weight} has already advanced")]
    SeedInUse { weight: String, seed: u32 },

    #[error("Invalid tournament config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Bracket(#[from] BracketError),
}
