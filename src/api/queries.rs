use serde::{Deserialize, Serialize};

use crate::builder::TournamentBuilder;
use crate::domain::tournament::Tournament;
use crate::engine::placement::{Bout, FastFall, PlaceWinners};
use crate::infra::mapping::{map_scores_to_dto, map_template_to_dto, map_tournament_to_dto, map_weight_class_to_dto};

use super::dto::{TeamScoreDto, TemplateSummaryDto, TournamentViewDto, WeightClassViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Query {
    /// Краткая информация о турнире.
    GetTournament,

    /// Сетка одной весовой категории.
    GetWeightClass { weight: String },

    /// Текущая таблица (без пересчёта).
    TeamScores,

    /// Готовые схватки в выбранных весах и раундах.
    Bouts { weights: Vec<String>, rounds: Vec<String> },

    /// Призёры выбранных весов (пустой список — все веса).
    PlaceWinners { weights: Vec<String> },

    FastFall,

    /// "There are N bouts..."
    CountBouts,

    /// Шаблоны сеток, доступные для новых турниров.
    Templates,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Tournament(TournamentViewDto),
    WeightClass(WeightClassViewDto),
    Scores(Vec<TeamScoreDto>),
    Bouts(Vec<Bout>),
    PlaceWinners(Vec<PlaceWinners>),
    FastFall(Vec<FastFall>),
    BoutCount(usize),
    Templates(Vec<TemplateSummaryDto>),
    NotFound(String),
}

pub fn run_query(tournament: &Tournament, query: Query) -> QueryResponse {
    match query {
        Query::GetTournament => QueryResponse::Tournament(map_tournament_to_dto(tournament)),

        Query::GetWeightClass { weight } => match tournament.weight_class(&weight) {
            Some(wc) => QueryResponse::WeightClass(map_weight_class_to_dto(wc)),
            None => QueryResponse::NotFound(format!("weight class {}", weight)),
        },

        Query::TeamScores => QueryResponse::Scores(map_scores_to_dto(&tournament.team_scores())),

        Query::Bouts { weights, rounds } => QueryResponse::Bouts(tournament.get_bouts(&weights, &rounds)),

        Query::PlaceWinners { weights } => {
            let weights = if weights.is_empty() {
                tournament.weights()
            } else {
                weights
            };
            QueryResponse::PlaceWinners(tournament.get_place_winners(&weights))
        }

        Query::FastFall => QueryResponse::FastFall(tournament.calc_fast_fall()),

        Query::CountBouts => QueryResponse::BoutCount(tournament.count_bouts()),

        Query::Templates => QueryResponse::Templates(
            TournamentBuilder::new()
                .templates()
                .iter()
                .map(map_template_to_dto)
                .collect(),
        ),
    }
}

/// Текст для диалога подсчёта схваток.
pub fn bout_count_message(count: usize) -> String {
    match count {
        1 => "There is 1 bout in the tournament.".to_string(),
        n => format!("There are {} bouts in the tournament.", n),
    }
}
