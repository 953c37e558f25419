//! Построение турниров по шаблонам сеток.

#[allow(clippy::module_inception)]
pub mod builder;
pub mod templates;

pub use builder::{build_weight_class, TournamentBuilder};
pub use templates::{
    bc_invitational, builtin_templates, ct_championship, ct_open, pairs, RoundLink, RoundSetup, TournamentTemplate,
    SEEDS_16, SEEDS_32,
};
