use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::points::ScoringRules;

/// Исход схватки.
///
/// Счёт решения и время туше хранятся как ввёл пользователь,
/// `winner_score > loser_score` не проверяется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchResult {
    /// Туше, время в секундах.
    Pin { time_seconds: u32 },
    /// Победа по очкам.
    Decision { winner_score: i32, loser_score: i32 },
    /// Проход без соперника.
    Bye,
    /// Техническая победа (неявка / снятие).
    Default,
}

impl MatchResult {
    /// Командные очки за сам исход (без очков раунда).
    pub fn points(&self, rules: &ScoringRules) -> f64 {
        match self {
            MatchResult::Pin { .. } => rules.pin_points,
            MatchResult::Default => rules.default_points,
            MatchResult::Bye => rules.bye_points,
            MatchResult::Decision {
                winner_score,
                loser_score,
            } => rules.decision_points(*winner_score, *loser_score),
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, MatchResult::Bye)
    }

    pub fn pin_time(&self) -> Option<u32> {
        match self {
            MatchResult::Pin { time_seconds } => Some(*time_seconds),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatchResult::Pin { .. } => "Pin",
            MatchResult::Decision { .. } => "Decision",
            MatchResult::Bye => "Bye",
            MatchResult::Default => "Default",
        }
    }

    /// Короткое значение для таблиц: " 1:30" для туше, "21-10" для решения.
    pub fn text_value(&self) -> Option<String> {
        match self {
            MatchResult::Pin { time_seconds } => Some(format_pin_time(*time_seconds)),
            MatchResult::Decision {
                winner_score,
                loser_score,
            } => Some(format!("{:>2}-{:>2}", winner_score, loser_score)),
            MatchResult::Bye | MatchResult::Default => None,
        }
    }
}

/// Время туше в виде "MM:SS", минуты выровнены вправо на две позиции.
pub fn format_pin_time(time_seconds: u32) -> String {
    format!("{:>2}:{:02}", time_seconds / 60, time_seconds % 60)
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Pin { time_seconds } => {
                write!(f, "Pin {}:{:02}", time_seconds / 60, time_seconds % 60)
            }
            MatchResult::Decision {
                winner_score,
                loser_score,
            } => write!(f, "Decision {}-{}", winner_score, loser_score),
            MatchResult::Bye | MatchResult::Default => f.write_str(self.name()),
        }
    }
}
