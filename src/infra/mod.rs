//! Инфраструктурный слой вокруг движка сетки:
//! - RNG-реализации для симуляции;
//! - хранение снапшотов (in-memory / файлы);
//! - текстовый экспорт;
//! - настройки;
//! - маппинги между API и domain.

pub mod export;
pub mod mapping;
pub mod persistence;
pub mod rng;
pub mod settings;

pub use export::*;
pub use mapping::*;
pub use persistence::*;
pub use rng::*;
pub use settings::*;
