use thiserror::Error;

use crate::domain::EntryIndex;

/// Ошибки графа сетки: построение, связывание раундов, ввод результатов.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("This round ({round}) has {expected} entries and the to_map has {actual} links")]
    LinkCountMismatch {
        round: String,
        expected: usize,
        actual: usize,
    },

    #[error("Round {round}: link target {index} is out of range for round {target_round} ({len} entries)")]
    LinkTargetOutOfRange {
        round: String,
        target_round: String,
        index: usize,
        len: usize,
    },

    #[error("Round {round} is already linked ({edge})")]
    AlreadyLinked { round: String, edge: &'static str },

    #[error("Round {name} not found")]
    UnknownRound { name: String },

    #[error("Round {name} already exists")]
    DuplicateRound { name: String },

    #[error("Round {round} has no entries")]
    EmptyRound { round: String },

    #[error("Round {round} already holds entries of another kind")]
    MixedEntryKinds { round: String },

    #[error("Entry {index} not found in round {round}")]
    EntryNotFound { round: String, index: EntryIndex },

    #[error("Entry {index} of round {round} is not a match entry")]
    NotAMatchEntry { round: String, index: EntryIndex },

    #[error("Entry {index} of round {round} is not a seed entry")]
    NotASeedEntry { round: String, index: EntryIndex },

    #[error("Entry {index} of round {round} has no competitors to choose a winner from")]
    NoCompetitors { round: String, index: EntryIndex },

    #[error("{wrestler} cannot win entry {index} of round {round}")]
    InvalidWinner {
        round: String,
        index: EntryIndex,
        wrestler: String,
    },

    #[error("{wrestler} cannot lose entry {index} of round {round}")]
    InvalidLoser {
        round: String,
        index: EntryIndex,
        wrestler: String,
    },

    #[error("The tournament configuration {name} is invalid")]
    UnknownTemplate { name: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Weight class {weight}: dangling link {detail}")]
    DanglingLink { weight: String, detail: String },
}
