use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{EntryIndex, RoundIndex};

/// Адрес записи внутри арены весовой категории: индекс раунда + индекс записи в раунде.
///
/// Все рёбра графа (next_win / next_lose / previous) хранятся именно так,
/// поэтому снапшот сохраняет "идентичность" общих целей без дополнительной работы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryRef {
    pub round: RoundIndex,
    pub entry: EntryIndex,
}

impl EntryRef {
    pub fn new(round: RoundIndex, entry: EntryIndex) -> Self {
        Self { round, entry }
    }
}

/// Стабильный ключ записи: (имя раунда, индекс).
///
/// Используется в реестре результатов борца. Совпадает для одинаковых
/// записей разных весовых категорий. В JSON — строка "round#index",
/// чтобы годиться в ключ словаря.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct EntryId {
    pub round: String,
    pub index: EntryIndex,
}

impl EntryId {
    pub fn new(round: impl Into<String>, index: EntryIndex) -> Self {
        Self {
            round: round.into(),
            index,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.round, self.index)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EntryId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // Имя раунда может содержать '#', индекс — всегда после последнего.
        let (round, index) = value
            .rsplit_once('#')
            .ok_or_else(|| format!("entry id without index: {}", value))?;
        let index = index
            .parse()
            .map_err(|_| format!("entry id with bad index: {}", value))?;
        Ok(EntryId::new(round, index))
    }
}

/// Идентичность борца: (имя, команда).
///
/// Не ссылка на объект: борцы пересоздаются при редактировании посева,
/// а сравнение должно оставаться корректным.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WrestlerKey {
    pub name: String,
    pub team: String,
}

impl WrestlerKey {
    pub fn new(name: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
        }
    }
}

impl fmt::Display for WrestlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.team)
    }
}
