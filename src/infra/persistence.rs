use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::tournament::Tournament;
use crate::engine::errors::BracketError;

/// Расширение файлов турниров.
pub const SNAPSHOT_EXTENSION: &str = "wnd.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is inconsistent: {0}")]
    Corrupt(#[from] BracketError),

    #[error("tournament {0} not found")]
    NotFound(String),
}

/// Весь граф турнира в JSON.
pub fn to_snapshot(tournament: &Tournament) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(tournament)?)
}

/// Восстановить турнир из JSON. Ссылки арены проверяются.
pub fn from_snapshot(json: &str) -> Result<Tournament, PersistenceError> {
    let tournament: Tournament = serde_json::from_str(json)?;
    for wc in tournament.weight_classes.values() {
        wc.validate_links()?;
    }
    Ok(tournament)
}

/// Абстракция хранилища турниров.
///
/// Удобна:
/// - для тестов (in-memory);
/// - для CLI (файлы в каталоге).
pub trait TournamentStorage {
    /// Загрузить турнир по ключу.
    fn load(&self, key: &str) -> Result<Tournament, PersistenceError>;

    /// Сохранить (перезаписать) турнир.
    fn save(&mut self, key: &str, tournament: &Tournament) -> Result<(), PersistenceError>;

    /// Ключи сохранённых турниров.
    fn keys(&self) -> Result<Vec<String>, PersistenceError>;
}

/// Простая in-memory реализация. Хранит снапшоты, а не живые объекты,
/// чтобы тесты проходили через ту же сериализацию, что и файлы.
#[derive(Debug, Default)]
pub struct InMemoryTournamentStorage {
    snapshots: HashMap<String, String>,
}

impl InMemoryTournamentStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentStorage for InMemoryTournamentStorage {
    fn load(&self, key: &str) -> Result<Tournament, PersistenceError> {
        let json = self
            .snapshots
            .get(key)
            .ok_or_else(|| PersistenceError::NotFound(key.to_string()))?;
        from_snapshot(json)
    }

    fn save(&mut self, key: &str, tournament: &Tournament) -> Result<(), PersistenceError> {
        self.snapshots.insert(key.to_string(), to_snapshot(tournament)?);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        let mut keys: Vec<String> = self.snapshots.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Хранилище в каталоге: `<dir>/<key>.wnd.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, SNAPSHOT_EXTENSION))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TournamentStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Tournament, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(PersistenceError::NotFound(key.to_string()));
        }
        let json = fs::read_to_string(&path)?;
        log::debug!("loaded {}", path.display());
        from_snapshot(&json)
    }

    fn save(&mut self, key: &str, tournament: &Tournament) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, to_snapshot(tournament)?)?;
        log::info!("tournament {} saved to {}", tournament.name, path.display());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PersistenceError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let suffix = format!(".{}", SNAPSHOT_EXTENSION);
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if let Some(key) = name.strip_suffix(&suffix) {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
