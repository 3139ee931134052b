//! Combat resolution rules.
//!
//! Pure functions and tables used by the battle manager when resolving hits.
//!
//! - [`formula`]: damage formula library and affinity/critical pipeline
//! - [`hit`]: accuracy, critical and status infliction checks
//! - [`technical`]: status/knockdown × element combo table

pub mod formula;
pub mod hit;
pub mod technical;

pub use formula::{Combatant, DamageFormula, DamageOutcome, HitEffect, calculate};
pub use hit::{calculate_hit_chance, check_critical, check_hit, infliction_chance};
pub use technical::{TechnicalIncoming, TechnicalRule, TechnicalTable, TechnicalTrigger};
