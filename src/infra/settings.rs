use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::points::ScoringRules;
use crate::engine::results::MoveInPolicy;

/// Размеры раскладки сетки (в пикселях рендерера).
///
/// Неизменяемая конфигурация: передаётся рендереру при создании.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutSettings {
    /// Y первой линии посева.
    pub seed_start: i32,
    /// Длина линий раунда посева (под полное имя и команду).
    pub seed_length: i32,
    pub seed_height: i32,
    /// Отступ поля посева от начала линии.
    pub seed_offset: i32,
    pub match_length: i32,
    pub match_height: i32,
    pub match_offset: i32,
    /// Шаг между линиями посева; задаёт высоту всей сетки.
    pub initial_step: i32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            seed_start: 20,
            seed_length: 300,
            seed_height: 14,
            seed_offset: 20,
            match_length: 135,
            match_height: 14,
            match_offset: 3,
            initial_step: 25,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), String> {
        let sizes = [
            ("seed_length", self.seed_length),
            ("seed_height", self.seed_height),
            ("match_length", self.match_length),
            ("match_height", self.match_height),
            ("initial_step", self.initial_step),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v <= 0) {
            return Err(format!("LayoutSettings: {} must be positive", name));
        }
        if self.match_offset < 0 || self.seed_offset < 0 || self.seed_start < 0 {
            return Err("LayoutSettings: offsets must be non-negative".into());
        }
        if self.match_offset * 2 >= self.match_length {
            return Err("LayoutSettings: match_offset leaves no room for the text box".into());
        }
        Ok(())
    }
}

/// Настройки приложения: правила подсчёта, автопроходы, раскладка.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub scoring: ScoringRules,
    pub move_in_policy: MoveInPolicy,
    pub layout: LayoutSettings,
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), String> {
        self.scoring.validate()?;
        self.layout.validate()
    }

    /// Загрузить из JSON. Отсутствующие поля берутся по умолчанию.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let settings: AppSettings = serde_json::from_str(json).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Загрузить из файла; файла нет — настройки по умолчанию.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::debug!("settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_json(&json)
    }
}
