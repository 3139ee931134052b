//! Errors raised while assembling a battle.
//!
//! Errors raised while a battle runs are [`battle_core::BattleError`]s; this
//! type covers what can go wrong before the first turn.
use thiserror::Error;

use battle_core::{BattleError, Side};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{side} roster is empty")]
    EmptyRoster { side: Side },

    #[error("roster has {count} members, at most {max} are supported")]
    RosterTooLarge { count: usize, max: usize },

    #[error("battle requires oracles to be configured before building")]
    MissingEnv,

    #[error(transparent)]
    Battle(#[from] BattleError),
}
