use crate::api::dto::{
    EntryViewDto, RoundViewDto, TeamScoreDto, TemplateSummaryDto, TournamentViewDto, WeightClassViewDto,
};
use crate::builder::templates::TournamentTemplate;
use crate::domain::bracket::{Entry, Round, WeightClass};
use crate::domain::tournament::Tournament;
use crate::engine::scoring::TeamScore;

/// Маппинг записи сетки в DTO.
pub fn map_entry_to_dto(index: usize, entry: &Entry) -> EntryViewDto {
    EntryViewDto {
        index,
        seed: entry.seed_number(),
        wrestler: entry.wrestler.as_ref().map(|w| w.name.clone()),
        team: entry.wrestler.as_ref().map(|w| w.team.clone()),
        result: entry.result.as_ref().map(|r| r.to_string()),
        is_scoring: entry.is_scoring,
    }
}

fn round_name(wc: &WeightClass, index: Option<usize>) -> Option<String> {
    index.and_then(|i| wc.round(i)).map(|r| r.name.clone())
}

pub fn map_round_to_dto(wc: &WeightClass, round: &Round) -> RoundViewDto {
    RoundViewDto {
        name: round.name.clone(),
        adv_points: round.points.adv_points,
        place_points: round.points.place_points,
        next_win: round_name(wc, round.next_win),
        next_lose: round_name(wc, round.next_lose),
        entries: round
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| map_entry_to_dto(i, e))
            .collect(),
    }
}

pub fn map_weight_class_to_dto(wc: &WeightClass) -> WeightClassViewDto {
    WeightClassViewDto {
        weight: wc.name.clone(),
        rounds: wc.rounds.iter().map(|r| map_round_to_dto(wc, r)).collect(),
    }
}

/// Таблица с местами (1, 2, ...). Таблица уже отсортирована.
pub fn map_scores_to_dto(scores: &[TeamScore]) -> Vec<TeamScoreDto> {
    scores
        .iter()
        .enumerate()
        .map(|(i, s)| TeamScoreDto {
            rank: i + 1,
            team: s.team.clone(),
            score: s.score,
        })
        .collect()
}

pub fn map_tournament_to_dto(tournament: &Tournament) -> TournamentViewDto {
    TournamentViewDto {
        name: tournament.name.clone(),
        template: tournament.template.clone(),
        weights: tournament.weights(),
        rounds: tournament.round_names(),
        teams: tournament.team_names(),
        bouts_ready: tournament.count_bouts(),
    }
}

pub fn map_template_to_dto(template: &TournamentTemplate) -> TemplateSummaryDto {
    TemplateSummaryDto {
        name: template.name.clone(),
        description: template.description.clone(),
        seed_slots: template.seeds.len(),
        rounds: template.rounds.len(),
    }
}
