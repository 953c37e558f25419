// src/builder/templates.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::bracket::EntrySpec;
use crate::domain::points::Points;
use crate::engine::errors::BracketError;

/// Порядок посева для сетки на 32 места.
pub const SEEDS_32: [u32; 32] = [
    1, 32, 17, 16, 9, 24, 25, 8, 5, 28, 21, 12, 13, 20, 29, 4, 3, 30, 19, 14, 11, 22, 27, 6, 7, 26,
    23, 10, 15, 18, 31, 2,
];

/// Порядок посева для сетки на 16 мест.
pub const SEEDS_16: [u32; 16] = [1, 16, 9, 8, 5, 12, 13, 4, 3, 14, 11, 6, 7, 10, 15, 2];

/// Ссылка раунда на следующий: имя раунда-цели и карта индексов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundLink {
    pub round: String,
    pub map: Vec<usize>,
}

/// Описание одного раунда шаблона.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundSetup {
    pub name: String,
    pub points: Points,
    pub entries: EntrySpec,
    pub next_win: Option<RoundLink>,
    pub next_lose: Option<RoundLink>,
}

impl RoundSetup {
    pub fn new(name: &str, adv_points: f64, place_points: f64, entries: EntrySpec) -> Self {
        Self {
            name: name.to_string(),
            points: Points::new(adv_points, place_points),
            entries,
            next_win: None,
            next_lose: None,
        }
    }

    pub fn win(mut self, round: &str, map: Vec<usize>) -> Self {
        self.next_win = Some(RoundLink {
            round: round.to_string(),
            map,
        });
        self
    }

    pub fn lose(mut self, round: &str, map: Vec<usize>) -> Self {
        self.next_lose = Some(RoundLink {
            round: round.to_string(),
            map,
        });
        self
    }
}

/// Шаблон сетки: раунды в порядке объявления и связи между ними.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TournamentTemplate {
    pub name: String,
    pub description: String,
    pub seeds: Vec<u32>,
    pub rounds: Vec<RoundSetup>,
}

impl TournamentTemplate {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn round(&self, name: &str) -> Option<&RoundSetup> {
        self.rounds.iter().find(|r| r.name == name)
    }

    /// Полная проверка шаблона до построения сетки: если шаблон прошёл
    /// проверку, связывание не может упасть на полпути.
    pub fn validate(&self) -> Result<(), BracketError> {
        if self.rounds.is_empty() {
            return Err(BracketError::InvalidTemplate(format!(
                "{}: template has no rounds",
                self.name
            )));
        }

        let mut names = HashSet::new();
        for (i, round) in self.rounds.iter().enumerate() {
            if !names.insert(round.name.as_str()) {
                return Err(BracketError::DuplicateRound {
                    name: round.name.clone(),
                });
            }
            if round.entries.is_empty() {
                return Err(BracketError::EmptyRound {
                    round: round.name.clone(),
                });
            }
            if i > 0 && matches!(round.entries, EntrySpec::Seeds(_)) {
                return Err(BracketError::InvalidTemplate(format!(
                    "{}: only the first round may hold seeds",
                    round.name
                )));
            }
        }

        for round in &self.rounds {
            for link in round.next_win.iter().chain(round.next_lose.iter()) {
                let target = self
                    .round(&link.round)
                    .ok_or_else(|| BracketError::UnknownRound {
                        name: link.round.clone(),
                    })?;

                if link.map.len() != round.entries.len() {
                    return Err(BracketError::LinkCountMismatch {
                        round: round.name.clone(),
                        expected: round.entries.len(),
                        actual: link.map.len(),
                    });
                }

                if let Some(&bad) = link.map.iter().find(|&&t| t >= target.entries.len()) {
                    return Err(BracketError::LinkTargetOutOfRange {
                        round: round.name.clone(),
                        target_round: target.name.clone(),
                        index: bad,
                        len: target.entries.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// `[0, 0, 1, 1, ..., n-1, n-1]`: пары уходят в одну запись.
pub fn pairs(n: usize) -> Vec<usize> {
    (0..n).flat_map(|i| [i, i]).collect()
}

fn seeds(list: &[u32]) -> EntrySpec {
    EntrySpec::Seeds(list.to_vec())
}

pub fn bc_invitational() -> TournamentTemplate {
    TournamentTemplate {
        name: "Bristol Central Invitational".into(),
        description: "The bracket format used in the Bristol Central Invitational tournaments. \
                      The outbracket has 32 seed slots, and double-elimination begins in the \
                      quarter finals. There are six places."
            .into(),
        seeds: SEEDS_32.to_vec(),
        rounds: vec![
            RoundSetup::new("Rat-Tails", 0.0, 0.0, seeds(&SEEDS_32)).win("Sixteen Champion", pairs(16)),
            RoundSetup::new("Sixteen Champion", 2.0, 0.0, EntrySpec::Count(16))
                .win("Quarter-Finals Champion", pairs(8)),
            RoundSetup::new("Quarter-Finals Champion", 2.0, 0.0, EntrySpec::Count(8))
                .win("Semi-Finals Champion", pairs(4))
                .lose("Quarter-Finals Consolation", pairs(4)),
            RoundSetup::new("Semi-Finals Champion", 2.0, 3.0, EntrySpec::Count(4))
                .win("Finals Champion", pairs(2))
                .lose("Semi-Finals Consolation", vec![3, 3, 1, 1]),
            RoundSetup::new("Finals Champion", 2.0, 9.0, EntrySpec::Count(2)).win("First Place", pairs(1)),
            RoundSetup::new("First Place", 0.0, 4.0, EntrySpec::Count(1)),
            RoundSetup::new("Quarter-Finals Consolation", 1.0, 0.0, EntrySpec::Count(4))
                .win("Semi-Finals Consolation", vec![0, 0, 2, 2]),
            RoundSetup::new("Semi-Finals Consolation", 1.0, 3.0, EntrySpec::Count(4))
                .win("Finals Consolation", pairs(2))
                .lose("Finals Fifth", pairs(2)),
            RoundSetup::new("Finals Consolation", 1.0, 4.0, EntrySpec::Count(2)).win("Third Place", pairs(1)),
            RoundSetup::new("Third Place", 0.0, 2.0, EntrySpec::Count(1)),
            RoundSetup::new("Finals Fifth", 0.0, 0.0, EntrySpec::Count(2)).win("Fifth Place", pairs(1)),
            RoundSetup::new("Fifth Place", 0.0, 2.0, EntrySpec::Count(1)),
        ],
    }
}

/// Общий хвост обоих коннектикутских форматов (от четвертьфинала).
fn ct_tail() -> Vec<RoundSetup> {
    vec![
        RoundSetup::new("Quarter-Finals Champion", 2.0, 0.0, EntrySpec::Count(8))
            .win("Semi-Finals Champion", pairs(4))
            .lose("Eight Consolation", vec![7, 7, 5, 5, 3, 3, 1, 1]),
        RoundSetup::new("Semi-Finals Champion", 2.0, 3.0, EntrySpec::Count(4))
            .win("Finals Champion", pairs(2))
            .lose("Semi-Finals Consolation", vec![1, 1, 3, 3]),
        RoundSetup::new("Finals Champion", 2.0, 9.0, EntrySpec::Count(2)).win("First Place", pairs(1)),
        RoundSetup::new("First Place", 0.0, 4.0, EntrySpec::Count(1)),
        RoundSetup::new("Rat-Tails Consolation", 1.0, 0.0, EntrySpec::Count(8))
            .win("Eight Consolation", vec![0, 0, 2, 2, 4, 4, 6, 6]),
        RoundSetup::new("Eight Consolation", 1.0, 0.0, EntrySpec::Count(8))
            .win("Quarter-Finals Consolation", pairs(4)),
        RoundSetup::new("Quarter-Finals Consolation", 1.0, 0.0, EntrySpec::Count(4))
            .win("Semi-Finals Consolation", vec![0, 0, 2, 2]),
        RoundSetup::new("Semi-Finals Consolation", 1.0, 3.0, EntrySpec::Count(4))
            .win("Finals Consolation", pairs(2))
            .lose("Finals Fifth", pairs(2)),
        RoundSetup::new("Finals Consolation", 1.0, 4.0, EntrySpec::Count(2)).win("Third Place", pairs(1)),
        RoundSetup::new("Third Place", 0.0, 2.0, EntrySpec::Count(1)),
        RoundSetup::new("Finals Fifth", 0.0, 0.0, EntrySpec::Count(2)).win("Fifth Place", pairs(1)),
        RoundSetup::new("Fifth Place", 0.0, 2.0, EntrySpec::Count(1)),
    ]
}

pub fn ct_championship() -> TournamentTemplate {
    let mut rounds = vec![
        RoundSetup::new("Rat-Tails Champion", 0.0, 0.0, seeds(&SEEDS_32)).win("Sixteen Champion", pairs(16)),
        RoundSetup::new("Sixteen Champion", 2.0, 0.0, EntrySpec::Count(16))
            .win("Quarter-Finals Champion", pairs(8))
            .lose("Rat-Tails Consolation", pairs(8)),
    ];
    rounds.extend(ct_tail());

    TournamentTemplate {
        name: "Connecticut State Championships".into(),
        description: "The bracket format used in the Connecticut State Division Championship \
                      tournaments. The outbracket has 32 seed slots, and double-elimination begins in the round \
                      of sixteen. There are six places."
            .into(),
        seeds: SEEDS_32.to_vec(),
        rounds,
    }
}

pub fn ct_open() -> TournamentTemplate {
    let mut rounds = vec![RoundSetup::new("Sixteen Champion", 2.0, 0.0, seeds(&SEEDS_16))
        .win("Quarter-Finals Champion", pairs(8))
        .lose("Rat-Tails Consolation", pairs(8))];
    rounds.extend(ct_tail());

    TournamentTemplate {
        name: "Connecticut State Open".into(),
        description: "The bracket format used in the Connecticut State Open tournament. The \
                      outbracket has 16 seed slots, and double-elimination begins immediately. There are six \
                      places."
            .into(),
        seeds: SEEDS_16.to_vec(),
        rounds,
    }
}

/// Встроенные шаблоны.
pub fn builtin_templates() -> Vec<TournamentTemplate> {
    vec![bc_invitational(), ct_championship(), ct_open()]
}
