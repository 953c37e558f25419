use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{EntryId, WrestlerKey};
use crate::domain::result::MatchResult;

/// Борец.
///
/// `results` — реестр результатов по ключу записи, в которую борец попал
/// благодаря этому результату. Нужен, чтобы при исправлении/удалении
/// результата симметрично снять его с прежнего обладателя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Wrestler {
    pub name: String,
    pub weight: String,
    pub team: String,
    /// Выводится из префикса имени при создании и больше не меняется.
    pub is_scoring: bool,
    pub results: BTreeMap<EntryId, MatchResult>,
}

impl Wrestler {
    pub fn new(
        name: impl Into<String>,
        weight: impl Into<String>,
        team: impl Into<String>,
        is_scoring: bool,
    ) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
            team: team.into(),
            is_scoring,
            results: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> WrestlerKey {
        WrestlerKey::new(self.name.clone(), self.team.clone())
    }

    pub fn remember(&mut self, id: EntryId, result: MatchResult) {
        self.results.insert(id, result);
    }

    pub fn forget(&mut self, id: &EntryId) -> Option<MatchResult> {
        self.results.remove(id)
    }

    /// (количество туше, суммарное время туше в секундах).
    /// Время вводится вручную, сумма насыщается на `u32::MAX`.
    pub fn pins(&self) -> (u32, u32) {
        self.results
            .values()
            .filter_map(MatchResult::pin_time)
            .fold((0u32, 0u32), |(n, total), t| {
                (n.saturating_add(1), total.saturating_add(t))
            })
    }
}

/// Команда: борцы по весам, очки по весам и ручная корректировка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    /// Вес → борцы этого веса (несколько на вес допускается, например JV).
    pub wrestlers: BTreeMap<String, Vec<Wrestler>>,
    /// Вес → последние подсчитанные очки.
    pub scores: BTreeMap<String, f64>,
    pub point_adjust: f64,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wrestlers: BTreeMap::new(),
            scores: BTreeMap::new(),
            point_adjust: 0.0,
        }
    }

    /// Сумма очков по весам + ручная корректировка.
    pub fn total_score(&self) -> f64 {
        self.point_adjust + self.scores.values().sum::<f64>()
    }

    pub fn set_weight_score(&mut self, weight: &str, score: f64) {
        self.scores.insert(weight.to_string(), score);
    }

    pub fn wrestler(&self, weight: &str, name: &str) -> Option<&Wrestler> {
        self.wrestlers
            .get(weight)
            .and_then(|list| list.iter().find(|w| w.name == name))
    }

    pub fn wrestler_mut(&mut self, weight: &str, name: &str) -> Option<&mut Wrestler> {
        self.wrestlers
            .get_mut(weight)
            .and_then(|list| list.iter_mut().find(|w| w.name == name))
    }

    /// Добавить борца. Если борец с таким именем в этом весе уже есть, возвращаем его.
    pub fn add_wrestler(&mut self, name: &str, weight: &str, is_scoring: bool) -> &mut Wrestler {
        let list = self.wrestlers.entry(weight.to_string()).or_default();
        match list.iter().position(|w| w.name == name) {
            Some(pos) => &mut list[pos],
            None => {
                list.push(Wrestler::new(name, weight, self.name.clone(), is_scoring));
                let last = list.len() - 1;
                &mut list[last]
            }
        }
    }

    pub fn remove_wrestler(&mut self, weight: &str, name: &str) -> Option<Wrestler> {
        let list = self.wrestlers.get_mut(weight)?;
        let pos = list.iter().position(|w| w.name == name)?;
        let removed = list.remove(pos);
        if list.is_empty() {
            self.wrestlers.remove(weight);
        }
        Some(removed)
    }

    pub fn all_wrestlers(&self) -> impl Iterator<Item = &Wrestler> {
        self.wrestlers.values().flat_map(|list| list.iter())
    }
}

/// Реестр команд. Порядок вставки сохраняется: он же порядок
/// при равенстве очков в таблице.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Вставка без проверки на дубликат — проверяет вызывающий (Tournament).
    pub(crate) fn push(&mut self, team: Team) {
        self.teams.push(team);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Team> {
        let pos = self.teams.iter().position(|t| t.name == name)?;
        Some(self.teams.remove(pos))
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    pub fn names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    pub fn wrestler(&self, weight: &str, key: &WrestlerKey) -> Option<&Wrestler> {
        self.get(&key.team)?.wrestler(weight, &key.name)
    }

    pub fn wrestler_mut(&mut self, weight: &str, key: &WrestlerKey) -> Option<&mut Wrestler> {
        self.get_mut(&key.team)?.wrestler_mut(weight, &key.name)
    }

    /// Запомнить результат у борца. Неизвестный борец молча пропускается.
    pub fn remember(&mut self, weight: &str, key: &WrestlerKey, id: EntryId, result: MatchResult) {
        match self.wrestler_mut(weight, key) {
            Some(w) => w.remember(id, result),
            None => log::warn!("remember: wrestler {} not found in weight {}", key, weight),
        }
    }

    /// Забыть результат у борца по ключу записи.
    pub fn forget(&mut self, weight: &str, key: &WrestlerKey, id: &EntryId) -> Option<MatchResult> {
        self.wrestler_mut(weight, key).and_then(|w| w.forget(id))
    }
}
