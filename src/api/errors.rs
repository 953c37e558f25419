use serde::{Deserialize, Serialize};

use crate::domain::tournament::TournamentError;
use crate::engine::BracketError;
use crate::infra::persistence::PersistenceError;

/// Ошибки внешнего API (то, что отдаём UI / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Весовая категория, раунд, команда или борец не найдены.
    NotFound(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Ошибка графа сетки (связи, ввод результата).
    BracketError(String),

    /// Ошибка хранения.
    Storage(String),
}

impl From<BracketError> for ApiError {
    fn from(err: BracketError) -> Self {
        ApiError::BracketError(err.to_string())
    }
}

impl From<TournamentError> for ApiError {
    fn from(err: TournamentError) -> Self {
        match err {
            TournamentError::Bracket(e) => e.into(),
            e @ (TournamentError::UnknownTeam { .. }
            | TournamentError::UnknownWrestler { .. }
            | TournamentError::UnknownSeed { .. }) => ApiError::NotFound(e.to_string()),
            TournamentError::InvalidConfig(msg) => ApiError::BadRequest(msg),
            other => ApiError::InvalidCommand(other.to_string()),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(key) => ApiError::NotFound(key),
            other => ApiError::Storage(other.to_string()),
        }
    }
}
