//! Движок сетки: ввод результатов, посев, подсчёт очков, агрегаты, отрисовка.
//!
//! Все операции работают над одной весовой категорией (`WeightClass`)
//! и реестром команд, которые передаются явно.
//! Основные операции:
//!   - `store_result` / `delete_result` – ввод и отмена результата;
//!   - `move_in_round` – автопроход (bye) по раунду;
//!   - `weight_class_scores` – командные очки по весу;
//!   - `paint_weight` – обход раскладки сетки для рендерера.

pub mod errors;
pub mod layout;
pub mod placement;
pub mod results;
pub mod scoring;
pub mod seeding;
pub mod simulate;

pub use errors::BracketError;
pub use layout::{paint_weight, Renderer, TextControl};
pub use placement::{Bout, FastFall, PlaceWinner, PlaceWinners};
pub use results::{MatchData, MoveInPolicy};
pub use scoring::{TeamScore, ThreadLink};
pub use simulate::{simulate_tournament, simulate_weight};

/// RNG интерфейс для движка.
/// Реализации — в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Случайное число в диапазоне `0..upper` (`upper > 0`).
    fn next_below(&mut self, upper: u32) -> u32;
}
