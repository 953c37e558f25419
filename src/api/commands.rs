use serde::{Deserialize, Serialize};

use crate::domain::ids::WrestlerKey;
use crate::domain::points::ScoringRules;
use crate::domain::result::MatchResult;
use crate::domain::tournament::Tournament;
use crate::engine::results::{MatchData, MoveInPolicy};
use crate::infra::mapping::map_scores_to_dto;

use super::dto::CommandResponse;
use super::errors::ApiError;

/// Команда верхнего уровня: всё, что меняет состояние турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Команды над реестром команд.
    Team(TeamCommand),

    /// Посев в весовой категории.
    Seed(SeedCommand),

    /// Ввести результат схватки.
    StoreResult(StoreResultCommand),

    /// Отменить результат схватки.
    DeleteResult {
        weight: String,
        round: String,
        index: usize,
    },

    /// Автопроход по раунду.
    MoveIn { weight: String, round: String },

    /// Пересчитать очки (по весу или по всем при `None`).
    CalcScores { weight: Option<String> },

    /// Заменить правила подсчёта.
    SetRules(ScoringRules),

    SetMoveInPolicy(MoveInPolicy),
}

/// Команды, которые относятся к командам-участникам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum TeamCommand {
    Add { name: String },
    Remove { name: String },
    Rename { old: String, new: String },
    /// Исправить имя борца команды.
    RenameWrestler { team: String, old: String, new: String },
    /// Ручная корректировка очков (может быть отрицательной).
    AdjustPoints { team: String, delta: f64 },
}

/// Команды посева.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SeedCommand {
    /// Пустое имя очищает место.
    Set {
        weight: String,
        seed: u32,
        team: String,
        name: String,
    },
    Clear { weight: String, seed: u32 },
    Swap { weight: String, a: u32, b: u32 },
}

/// Ввод результата.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoreResultCommand {
    pub weight: String,
    pub round: String,
    pub index: usize,
    pub winner: WrestlerKey,
    pub loser: Option<WrestlerKey>,
    pub result: MatchResult,
    /// Приносит ли схватка очки команде победителя.
    pub is_scoring: bool,
}

fn require_weight(tournament: &Tournament, weight: &str) -> Result<(), ApiError> {
    if tournament.weight_class(weight).is_some() {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("weight class {}", weight)))
    }
}

fn require_round(tournament: &Tournament, weight: &str, round: &str) -> Result<(), ApiError> {
    require_weight(tournament, weight)?;
    match tournament.weight_class(weight).and_then(|wc| wc.round_index(round)) {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(format!("round {} in weight class {}", round, weight))),
    }
}

/// Выполнить команду над турниром.
///
/// В отличие от методов `Tournament`, неизвестные вес/раунд здесь —
/// ошибка `NotFound`, а не молчаливый no-op.
pub fn execute(tournament: &mut Tournament, command: Command) -> Result<CommandResponse, ApiError> {
    match command {
        Command::Team(cmd) => execute_team(tournament, cmd),
        Command::Seed(cmd) => execute_seed(tournament, cmd),

        Command::StoreResult(cmd) => {
            require_round(tournament, &cmd.weight, &cmd.round)?;
            let data = MatchData {
                winner: cmd.winner,
                loser: cmd.loser,
                result: cmd.result,
                is_scoring: cmd.is_scoring,
            };
            tournament.store_result(&cmd.weight, &cmd.round, cmd.index, data)?;
            Ok(CommandResponse::Ok)
        }

        Command::DeleteResult { weight, round, index } => {
            require_round(tournament, &weight, &round)?;
            tournament.delete_result(&weight, &round, index)?;
            Ok(CommandResponse::Ok)
        }

        Command::MoveIn { weight, round } => {
            require_round(tournament, &weight, &round)?;
            let moved = tournament.move_in(&weight, &round)?;
            Ok(CommandResponse::MovedIn(moved))
        }

        Command::CalcScores { weight } => {
            if let Some(w) = &weight {
                require_weight(tournament, w)?;
            }
            let scores = tournament.calc_scores(weight.as_deref());
            Ok(CommandResponse::Scores(map_scores_to_dto(&scores)))
        }

        Command::SetRules(rules) => {
            tournament.set_rules(rules)?;
            Ok(CommandResponse::Ok)
        }

        Command::SetMoveInPolicy(policy) => {
            tournament.move_in_policy = policy;
            Ok(CommandResponse::Ok)
        }
    }
}

fn execute_team(tournament: &mut Tournament, cmd: TeamCommand) -> Result<CommandResponse, ApiError> {
    match cmd {
        TeamCommand::Add { name } => tournament.add_team(&name)?,
        TeamCommand::Remove { name } => {
            tournament.remove_team(&name)?;
        }
        TeamCommand::Rename { old, new } => tournament.rename_team(&old, &new)?,
        TeamCommand::RenameWrestler { team, old, new } => tournament.rename_wrestler(&team, &old, &new)?,
        TeamCommand::AdjustPoints { team, delta } => {
            let total = tournament.adjust_points(&team, delta)?;
            return Ok(CommandResponse::PointAdjust(total));
        }
    }
    Ok(CommandResponse::Ok)
}

fn execute_seed(tournament: &mut Tournament, cmd: SeedCommand) -> Result<CommandResponse, ApiError> {
    match cmd {
        SeedCommand::Set {
            weight,
            seed,
            team,
            name,
        } => {
            require_weight(tournament, &weight)?;
            tournament.set_seed(&weight, seed, &team, &name)?;
        }
        SeedCommand::Clear { weight, seed } => {
            require_weight(tournament, &weight)?;
            tournament.clear_seed(&weight, seed)?;
        }
        SeedCommand::Swap { weight, a, b } => {
            require_weight(tournament, &weight)?;
            tournament.swap_seeds(&weight, a, b)?;
        }
    }
    Ok(CommandResponse::Ok)
}
