use serde::{Deserialize, Serialize};

/// Очки раунда: (за продвижение, за место).
///
/// Начисляются каждому, кто выиграл схватку этого раунда и прошёл дальше.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Points {
    pub adv_points: f64,
    pub place_points: f64,
}

impl Points {
    pub const ZERO: Points = Points {
        adv_points: 0.0,
        place_points: 0.0,
    };

    pub fn new(adv_points: f64, place_points: f64) -> Self {
        Self {
            adv_points,
            place_points,
        }
    }

    pub fn total(&self) -> f64 {
        self.adv_points + self.place_points
    }
}

/// Правила подсчёта командных очков.
///
/// Значения по умолчанию — школьная система (pin = 2, default = 2,
/// tech fall по решению = 1.5, major = 1.0).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringRules {
    pub pin_points: f64,
    pub default_points: f64,
    pub bye_points: f64,

    /// Разница в счёте, начиная с которой решение приносит `tech_fall_points`.
    pub tech_fall_margin: i32,
    pub tech_fall_points: f64,

    /// Разница в счёте, начиная с которой решение приносит `major_points`.
    pub major_margin: i32,
    pub major_points: f64,

    /// Префикс имени, помечающий борца как не приносящего очки (JV и т.п.).
    pub non_scoring_prefix: String,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            pin_points: 2.0,
            default_points: 2.0,
            bye_points: 0.0,
            tech_fall_margin: 15,
            tech_fall_points: 1.5,
            major_margin: 8,
            major_points: 1.0,
            non_scoring_prefix: "JV".to_string(),
        }
    }
}

impl ScoringRules {
    pub fn validate(&self) -> Result<(), String> {
        if self.major_margin <= 0 {
            return Err("ScoringRules: major_margin must be positive".into());
        }
        if self.tech_fall_margin < self.major_margin {
            return Err("ScoringRules: tech_fall_margin < major_margin".into());
        }
        let all = [
            self.pin_points,
            self.default_points,
            self.bye_points,
            self.tech_fall_points,
            self.major_points,
        ];
        if all.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err("ScoringRules: points must be finite and non-negative".into());
        }
        Ok(())
    }

    /// Приносит ли борец с таким именем очки команде.
    ///
    /// Пустой префикс означает "все приносят очки".
    pub fn is_scoring_name(&self, name: &str) -> bool {
        let prefix = self.non_scoring_prefix.trim();
        if prefix.is_empty() {
            return true;
        }
        !name.trim_start().starts_with(prefix)
    }

    /// Очки за решение с заданным счётом.
    pub fn decision_points(&self, winner_score: i32, loser_score: i32) -> f64 {
        let margin = i64::from(winner_score) - i64::from(loser_score);
        if margin >= i64::from(self.tech_fall_margin) {
            self.tech_fall_points
        } else if margin >= i64::from(self.major_margin) {
            self.major_points
        } else {
            0.0
        }
    }
}
