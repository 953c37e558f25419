//! Доменная модель турнира по борьбе: сетки, записи, результаты, команды.

pub mod bracket;
pub mod ids;
pub mod points;
pub mod result;
pub mod team;
pub mod tournament;

// Индексы внутри арены весовой категории.
pub type RoundIndex = usize;
pub type EntryIndex = usize;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Entry и т.п.
pub use bracket::*;
pub use ids::*;
pub use points::*;
pub use result::*;
pub use team::*;
pub use tournament::*;
