//! Battle runtime: turn scheduling, action resolution, combo chain and AI.
//!
//! [`BattleManager`] owns one battle: its roster copies, the round queue,
//! combo state and every AI-controlled member's memory. Rules and numbers
//! come from `battle-core`; content comes from `battle-content` or any
//! [`battle_core::BattleEnv`].
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the scheduler, executor and combo chain
//! - [`providers`] decides actions for AI-controlled members
//! - [`events`] provides the topic-based event bus
//! - [`inventory`] holds the party's items and gold during a battle
//! - [`telemetry`] installs a tracing subscriber for binaries and tests
pub mod error;
pub mod events;
pub mod inventory;
pub mod manager;
pub mod providers;
pub mod telemetry;

pub use error::{Result, RuntimeError};
pub use events::{BattleEvent, EventBus, Topic};
pub use inventory::MemoryInventory;
pub use manager::{
    ActionCategory, ActionReport, BattleBuilder, BattleManager, BattleOutcome, BattlePhase,
    BattleResults, HitReport, MemberResult, TurnKind, TurnStart,
};
pub use providers::{ActionProvider, DecisionRequest, UtilityAiProvider};
pub use telemetry::init_tracing;
