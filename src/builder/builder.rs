// src/builder/builder.rs

use crate::builder::templates::{builtin_templates, TournamentTemplate};
use crate::domain::bracket::WeightClass;
use crate::domain::tournament::{Tournament, TournamentError};
use crate::engine::errors::BracketError;

/// Построить сетку одной весовой категории по шаблону.
///
/// Два прохода: сначала все раунды и записи, затем связи. Шаблон
/// проверяется заранее, поэтому частично связанной сетки не бывает.
pub fn build_weight_class(template: &TournamentTemplate, weight: &str) -> Result<WeightClass, BracketError> {
    template.validate()?;

    let mut wc = WeightClass::new(weight);
    for setup in &template.rounds {
        let r = wc.new_round(&setup.name, setup.points)?;
        wc.new_entries(r, &setup.entries)?;
    }

    for setup in &template.rounds {
        let src = wc
            .round_index(&setup.name)
            .ok_or_else(|| BracketError::UnknownRound {
                name: setup.name.clone(),
            })?;

        if let Some(link) = &setup.next_win {
            let dst = target(&wc, &link.round)?;
            wc.set_next_win_round(src, dst, &link.map)?;
        }
        if let Some(link) = &setup.next_lose {
            let dst = target(&wc, &link.round)?;
            wc.set_next_lose_round(src, dst, &link.map)?;
        }
    }

    Ok(wc)
}

fn target(wc: &WeightClass, name: &str) -> Result<usize, BracketError> {
    wc.round_index(name).ok_or_else(|| BracketError::UnknownRound {
        name: name.to_string(),
    })
}

/// Фабрика турниров по известным шаблонам.
#[derive(Clone, Debug)]
pub struct TournamentBuilder {
    templates: Vec<TournamentTemplate>,
}

impl Default for TournamentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TournamentBuilder {
    /// Билдер со встроенными шаблонами.
    pub fn new() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Билдер без шаблонов (для собственных форматов).
    pub fn empty() -> Self {
        Self { templates: Vec::new() }
    }

    /// Зарегистрировать шаблон. Шаблон с тем же именем заменяется.
    pub fn register(&mut self, template: TournamentTemplate) -> Result<(), BracketError> {
        template.validate()?;
        self.templates.retain(|t| t.name != template.name);
        self.templates.push(template);
        Ok(())
    }

    pub fn templates(&self) -> &[TournamentTemplate] {
        &self.templates
    }

    pub fn template(&self, name: &str) -> Option<&TournamentTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Create: турнир по имени шаблона.
    pub fn create<W, T>(&self, template: &str, name: &str, weights: &[W], teams: &[T]) -> Result<Tournament, TournamentError>
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let config = self
            .template(template)
            .ok_or_else(|| BracketError::UnknownTemplate {
                name: template.to_string(),
            })?;
        Self::create_from(config, name, weights, teams)
    }

    /// Турнир по явно переданному шаблону.
    pub fn create_from<W, T>(
        template: &TournamentTemplate,
        name: &str,
        weights: &[W],
        teams: &[T],
    ) -> Result<Tournament, TournamentError>
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        template.validate()?;

        let mut tournament = Tournament::new(name, template.name.clone(), template.seeds.clone());
        for weight in weights {
            let wc = build_weight_class(template, weight.as_ref())?;
            tournament.insert_weight_class(wc)?;
        }
        for team in teams {
            tournament.add_team(team.as_ref())?;
        }

        log::info!(
            "tournament {} created from {}: {} weights, {} teams",
            tournament.name,
            template.name,
            tournament.weight_classes.len(),
            tournament.teams.len()
        );
        Ok(tournament)
    }
}
