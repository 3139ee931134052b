//! Utility-based AI for enemy (and optionally party) members.
//!
//! Decisions are built from the four-component utility [`Score`]:
//!
//! 1. **Profile**: the pattern's personality phase for the current HP picks a
//!    behaviour and a target priority.
//! 2. **Ranking**: opponents are ordered by the priority's ranking function
//!    ([`rank_targets`]).
//! 3. **Candidates**: attacks, usable skills, guard and escape are generated
//!    and scored; every enabled capability adjusts the modifier.
//! 4. **Selection**: the highest score wins, ties go to the first candidate.
//!
//! # Core Components
//!
//! - [`AiContext`]: read-only blackboard for one decision
//! - [`AiMemory`]: per-member learned affinities, player pattern and plan
//! - [`CoordinationBoard`]: round-scoped claims shared by one side
//! - [`Strategy`]: behaviour weight table
//! - [`decide`]: the full pipeline

pub mod context;
pub mod coordination;
pub mod memory;
pub mod planner;
pub mod scoring;
pub mod strategy;
pub mod targeting;

pub use context::AiContext;
pub use coordination::CoordinationBoard;
pub use memory::{AiMemory, PlanStep, PlayerPattern};
pub use planner::{Decision, decide, fallback_action};
pub use scoring::Score;
pub use strategy::{Intent, Strategy};
pub use targeting::{RankInput, rank_targets};
