//! Движок турнирных сеток по борьбе.
//!
//! Турнир — набор весовых категорий; у каждой своя сетка (граф раундов
//! и записей), построенная по шаблону. Результаты вводятся в записи,
//! победители продвигаются по next_win, проигравшие — по next_lose,
//! командные очки считаются по "нитям" продвижения борцов.
//!
//! Слои:
//! - `domain` — модель (сетка, результаты, команды, турнир);
//! - `engine` — операции над сеткой (ввод результатов, подсчёт, отрисовка);
//! - `builder` — построение турниров по шаблонам;
//! - `api` — команды/запросы для внешнего UI;
//! - `infra` — хранение, экспорт, настройки, RNG.

pub mod api;
pub mod builder;
pub mod domain;
pub mod engine;
pub mod infra;

pub use builder::{TournamentBuilder, TournamentTemplate};
pub use domain::{MatchResult, Tournament, TournamentError, WeightClass, WrestlerKey};
pub use engine::{BracketError, MatchData, MoveInPolicy};
