use serde::{Deserialize, Serialize};

/// DTO записи сетки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EntryViewDto {
    pub index: usize,
    /// Номер посева (только для записей первого раунда).
    pub seed: Option<u32>,
    pub wrestler: Option<String>,
    pub team: Option<String>,
    /// Результат в виде текста ("Pin 1:30", "Decision 9-2").
    pub result: Option<String>,
    pub is_scoring: bool,
}

/// DTO раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundViewDto {
    pub name: String,
    pub adv_points: f64,
    pub place_points: f64,
    pub next_win: Option<String>,
    pub next_lose: Option<String>,
    pub entries: Vec<EntryViewDto>,
}

/// DTO весовой категории.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightClassViewDto {
    pub weight: String,
    pub rounds: Vec<RoundViewDto>,
}

/// Строка командной таблицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamScoreDto {
    pub rank: usize,
    pub team: String,
    pub score: f64,
}

/// Краткая информация о турнире.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TournamentViewDto {
    pub name: String,
    pub template: String,
    pub weights: Vec<String>,
    pub rounds: Vec<String>,
    pub teams: Vec<String>,
    /// Сколько схваток можно проводить прямо сейчас.
    pub bouts_ready: usize,
}

/// Шаблон сетки для выбора в мастере.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TemplateSummaryDto {
    pub name: String,
    pub description: String,
    pub seed_slots: usize,
    pub rounds: usize,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    Ok,
    /// Сколько борцов продвинуто автопроходом.
    MovedIn(usize),
    /// Новая ручная корректировка очков команды.
    PointAdjust(f64),
    Scores(Vec<TeamScoreDto>),
}
