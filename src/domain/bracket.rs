// src/domain/bracket.rs

use serde::{Deserialize, Serialize};

use crate::domain::ids::{EntryId, EntryRef, WrestlerKey};
use crate::domain::points::Points;
use crate::domain::result::MatchResult;
use crate::domain::RoundIndex;
use crate::engine::errors::BracketError;

/// Как создавать записи раунда.
///
/// - `Seeds` — явный список номеров посева (только первый раунд);
/// - `Count` — столько-то записей-схваток по порядку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntrySpec {
    Seeds(Vec<u32>),
    Count(usize),
}

impl EntrySpec {
    pub fn len(&self) -> usize {
        match self {
            EntrySpec::Seeds(seeds) => seeds.len(),
            EntrySpec::Count(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Вид записи. Внутри одного раунда все записи одного вида.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    /// Место посева, заполняется пользователем.
    Seed { seed: u32 },
    /// Место, куда попадает победитель (или проигравший по lose-ребру).
    Match,
}

/// Слот сетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub kind: EntryKind,
    /// Текущий обладатель слота.
    pub wrestler: Option<WrestlerKey>,
    /// Приносит ли обладатель очки за схватку, которая привела его сюда
    /// (для посева — из префикса имени).
    pub is_scoring: bool,
    /// Результат, с которым текущий обладатель попал в этот слот.
    pub result: Option<MatchResult>,
    pub next_win: Option<EntryRef>,
    pub next_lose: Option<EntryRef>,
    /// Записи, чьи победители попадают сюда. Заполняется только при связывании.
    pub previous: Vec<EntryRef>,
}

impl Entry {
    fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            wrestler: None,
            is_scoring: true,
            result: None,
            next_win: None,
            next_lose: None,
            previous: Vec::new(),
        }
    }

    pub fn is_seed(&self) -> bool {
        matches!(self.kind, EntryKind::Seed { .. })
    }

    pub fn is_match(&self) -> bool {
        matches!(self.kind, EntryKind::Match)
    }

    pub fn seed_number(&self) -> Option<u32> {
        match self.kind {
            EntryKind::Seed { seed } => Some(seed),
            EntryKind::Match => None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.wrestler.is_some()
    }

    pub fn holds(&self, key: &WrestlerKey) -> bool {
        self.wrestler.as_ref() == Some(key)
    }

    /// Очистить слот. Возвращает прежнего обладателя.
    pub fn clear(&mut self) -> Option<WrestlerKey> {
        self.result = None;
        self.is_scoring = true;
        self.wrestler.take()
    }
}

/// Раунд: очки, записи и раунды, куда ведут победа и поражение.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Round {
    pub name: String,
    pub points: Points,
    pub entries: Vec<Entry>,
    pub next_win: Option<RoundIndex>,
    pub next_lose: Option<RoundIndex>,
}

impl Round {
    fn new(name: String, points: Points) -> Self {
        Self {
            name,
            points,
            entries: Vec::new(),
            next_win: None,
            next_lose: None,
        }
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Финальный (местовой) раунд: дальше по победе идти некуда.
    pub fn is_terminal(&self) -> bool {
        self.next_win.is_none()
    }

    pub fn is_seed_round(&self) -> bool {
        self.entries.first().map(Entry::is_seed).unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Win,
    Lose,
}

impl Edge {
    fn label(self) -> &'static str {
        match self {
            Edge::Win => "next_win",
            Edge::Lose => "next_lose",
        }
    }
}

/// Весовая категория: арена раундов и записей.
///
/// Раунды лежат в порядке объявления (от посева к финалу, утешительные — после
/// точки ветвления). Все ссылки между записями — `EntryRef` внутрь этой арены.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightClass {
    pub name: String,
    pub rounds: Vec<Round>,
}

impl WeightClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rounds: Vec::new(),
        }
    }

    /// NewRound: добавить пустой раунд в конец порядка.
    pub fn new_round(&mut self, name: &str, points: Points) -> Result<RoundIndex, BracketError> {
        if self.round_index(name).is_some() {
            return Err(BracketError::DuplicateRound {
                name: name.to_string(),
            });
        }
        self.rounds.push(Round::new(name.to_string(), points));
        Ok(self.rounds.len() - 1)
    }

    /// NewEntries: создать записи раунда по спецификации.
    pub fn new_entries(&mut self, round: RoundIndex, spec: &EntrySpec) -> Result<(), BracketError> {
        let r = self.round_at_mut(round)?;

        let wants_seeds = matches!(spec, EntrySpec::Seeds(_));
        if r.entries.iter().any(|e| e.is_seed() != wants_seeds) {
            return Err(BracketError::MixedEntryKinds {
                round: r.name.clone(),
            });
        }

        match spec {
            EntrySpec::Seeds(seeds) => {
                r.entries
                    .extend(seeds.iter().map(|&seed| Entry::new(EntryKind::Seed { seed })));
            }
            EntrySpec::Count(n) => {
                r.entries.extend((0..*n).map(|_| Entry::new(EntryKind::Match)));
            }
        }
        Ok(())
    }

    pub fn round_index(&self, name: &str) -> Option<RoundIndex> {
        self.rounds.iter().position(|r| r.name == name)
    }

    pub fn round(&self, index: RoundIndex) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn round_by_name(&self, name: &str) -> Option<&Round> {
        self.rounds.iter().find(|r| r.name == name)
    }

    pub fn round_names(&self) -> Vec<String> {
        self.rounds.iter().map(|r| r.name.clone()).collect()
    }

    fn round_at_mut(&mut self, index: RoundIndex) -> Result<&mut Round, BracketError> {
        self.rounds
            .get_mut(index)
            .ok_or_else(|| BracketError::UnknownRound {
                name: format!("#{}", index),
            })
    }

    pub fn entry(&self, at: EntryRef) -> Option<&Entry> {
        self.rounds.get(at.round)?.entries.get(at.entry)
    }

    pub fn entry_mut(&mut self, at: EntryRef) -> Option<&mut Entry> {
        self.rounds.get_mut(at.round)?.entries.get_mut(at.entry)
    }

    /// Запись либо ошибка `EntryNotFound`.
    pub fn expect_entry(&self, at: EntryRef) -> Result<&Entry, BracketError> {
        self.entry(at).ok_or_else(|| self.entry_not_found(at))
    }

    pub(crate) fn entry_not_found(&self, at: EntryRef) -> BracketError {
        BracketError::EntryNotFound {
            round: self.round_label(at.round),
            index: at.entry,
        }
    }

    pub(crate) fn round_label(&self, round: RoundIndex) -> String {
        self.rounds
            .get(round)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("#{}", round))
    }

    /// Стабильный ключ записи: (имя раунда, индекс).
    pub fn entry_id(&self, at: EntryRef) -> Option<EntryId> {
        let round = self.rounds.get(at.round)?;
        round.entries.get(at.entry)?;
        Some(EntryId::new(round.name.clone(), at.entry))
    }

    /// Найти запись по имени раунда и индексу.
    pub fn find_entry(&self, round: &str, index: usize) -> Option<EntryRef> {
        let r = self.round_index(round)?;
        self.rounds[r].entries.get(index)?;
        Some(EntryRef::new(r, index))
    }

    /// SetNextWinRound: связать записи раунда `src` с раундом `dst` по победе.
    ///
    /// `to_map[i]` — индекс в `dst`, куда уходит победитель записи `i`.
    /// Регистрирует обратное ребро `previous` у цели (добавлением).
    pub fn set_next_win_round(
        &mut self,
        src: RoundIndex,
        dst: RoundIndex,
        to_map: &[usize],
    ) -> Result<(), BracketError> {
        self.link(src, dst, to_map, Edge::Win)
    }

    /// SetNextLoseRound: то же для проигравших. `previous` не трогается.
    pub fn set_next_lose_round(
        &mut self,
        src: RoundIndex,
        dst: RoundIndex,
        to_map: &[usize],
    ) -> Result<(), BracketError> {
        self.link(src, dst, to_map, Edge::Lose)
    }

    fn link(
        &mut self,
        src: RoundIndex,
        dst: RoundIndex,
        to_map: &[usize],
        edge: Edge,
    ) -> Result<(), BracketError> {
        let src_round = self.rounds.get(src).ok_or_else(|| BracketError::UnknownRound {
            name: format!("#{}", src),
        })?;
        let dst_round = self.rounds.get(dst).ok_or_else(|| BracketError::UnknownRound {
            name: format!("#{}", dst),
        })?;

        // Всё проверяем до первой мутации: либо раунд связан целиком, либо никак.
        if to_map.len() != src_round.num_entries() {
            return Err(BracketError::LinkCountMismatch {
                round: src_round.name.clone(),
                expected: src_round.num_entries(),
                actual: to_map.len(),
            });
        }

        let already = match edge {
            Edge::Win => src_round.next_win.is_some(),
            Edge::Lose => src_round.next_lose.is_some(),
        };
        if already {
            return Err(BracketError::AlreadyLinked {
                round: src_round.name.clone(),
                edge: edge.label(),
            });
        }

        if let Some(&bad) = to_map.iter().find(|&&t| t >= dst_round.num_entries()) {
            return Err(BracketError::LinkTargetOutOfRange {
                round: src_round.name.clone(),
                target_round: dst_round.name.clone(),
                index: bad,
                len: dst_round.num_entries(),
            });
        }

        log::debug!(
            "weight {}: {} {} -> {} ({} links)",
            self.name,
            src_round.name,
            edge.label(),
            dst_round.name,
            to_map.len()
        );

        match edge {
            Edge::Win => self.rounds[src].next_win = Some(dst),
            Edge::Lose => self.rounds[src].next_lose = Some(dst),
        }

        for (i, &t) in to_map.iter().enumerate() {
            let target = EntryRef::new(dst, t);
            match edge {
                Edge::Win => {
                    self.rounds[src].entries[i].next_win = Some(target);
                    self.rounds[dst].entries[t].previous.push(EntryRef::new(src, i));
                }
                Edge::Lose => {
                    self.rounds[src].entries[i].next_lose = Some(target);
                }
            }
        }

        Ok(())
    }

    /// Развернуть lose-рёбра раунда в обратном порядке (запись i получает
    /// цель записи n-1-i). Исправляет перекрёст утешительной сетки
    /// в турнирах, построенных со старыми картами.
    pub fn reverse_lose_links(&mut self, round: RoundIndex) -> Result<(), BracketError> {
        let r = self.round_at_mut(round)?;
        let mut targets: Vec<Option<EntryRef>> = r.entries.iter().map(|e| e.next_lose).collect();
        targets.reverse();
        for (entry, target) in r.entries.iter_mut().zip(targets) {
            entry.next_lose = target;
        }
        log::info!("weight {}: lose links of round #{} reversed", self.name, round);
        Ok(())
    }

    /// Предшественники записи, в которых сейчас кто-то стоит.
    pub fn live_previous(&self, at: EntryRef) -> Vec<(EntryRef, WrestlerKey)> {
        let Some(entry) = self.entry(at) else {
            return Vec::new();
        };

        entry
            .previous
            .iter()
            .filter_map(|&p| {
                self.entry(p)
                    .and_then(|e| e.wrestler.clone())
                    .map(|w| (p, w))
            })
            .collect()
    }

    /// Первый раунд (раунд посева), если он есть.
    pub fn seed_round(&self) -> Option<RoundIndex> {
        self.rounds.iter().position(Round::is_seed_round)
    }

    /// Слот посева с номером `seed` (по номеру, а не по позиции в раунде).
    pub fn seed_slot(&self, seed: u32) -> Option<EntryRef> {
        let r = self.seed_round()?;
        self.rounds[r]
            .entries
            .iter()
            .position(|e| e.seed_number() == Some(seed))
            .map(|i| EntryRef::new(r, i))
    }

    /// Все записи (в порядке раундов).
    pub fn entry_refs(&self) -> impl Iterator<Item = EntryRef> + '_ {
        self.rounds.iter().enumerate().flat_map(|(r, round)| {
            (0..round.entries.len()).map(move |i| EntryRef::new(r, i))
        })
    }

    /// Все записи, где стоит данный борец.
    pub fn entries_of(&self, key: &WrestlerKey) -> Vec<EntryRef> {
        self.entry_refs()
            .filter(|&at| self.entry(at).map(|e| e.holds(key)).unwrap_or(false))
            .collect()
    }

    /// Проверка целостности арены: все ссылки указывают внутрь.
    ///
    /// Вызывается после восстановления из снапшота.
    pub fn validate_links(&self) -> Result<(), BracketError> {
        let dangling = |detail: String| BracketError::DanglingLink {
            weight: self.name.clone(),
            detail,
        };

        for (ri, round) in self.rounds.iter().enumerate() {
            for (label, target) in [("next_win", round.next_win), ("next_lose", round.next_lose)] {
                if let Some(t) = target {
                    if t >= self.rounds.len() {
                        return Err(dangling(format!("{}.{} -> #{}", round.name, label, t)));
                    }
                }
            }

            for (ei, entry) in round.entries.iter().enumerate() {
                let refs = entry
                    .next_win
                    .iter()
                    .chain(entry.next_lose.iter())
                    .chain(entry.previous.iter());
                for &r in refs {
                    if self.entry(r).is_none() {
                        return Err(dangling(format!(
                            "{}#{} -> ({}, {})",
                            self.rounds[ri].name, ei, r.round, r.entry
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
