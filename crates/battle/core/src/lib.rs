//! Deterministic battle rules and data types.
//!
//! `battle-core` defines the canonical combat rules (stats, affinities,
//! statuses, damage formulas, the technical table) and the battle member
//! model. It performs no I/O and no logging; the runtime drives it and the
//! content crate feeds it data through the oracles in [`env`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod element;
pub mod env;
pub mod error;
pub mod item;
pub mod member;
pub mod showtime;
pub mod skill;
pub mod stats;
pub mod status;

pub use action::{ActionKind, BattleAction};
pub use ai::{AiCapabilities, AiPattern, BehaviorType, PersonalityPhase, TargetPriority};
pub use combat::{
    Combatant, DamageFormula, DamageOutcome, HitEffect, TechnicalIncoming, TechnicalRule,
    TechnicalTable, TechnicalTrigger, calculate, calculate_hit_chance, check_critical, check_hit,
    infliction_chance,
};
pub use config::BattleConfig;
pub use element::{Affinity, AffinityTable, Element};
pub use env::{
    BattleEnv, CharacterId, CharacterOracle, CharacterTemplate, EquipmentOracle, InventoryOracle,
    ItemOracle, NoEquipment, PcgRng, RngOracle, RollKind, SkillOracle, compute_seed, roll_context,
};
pub use error::{BattleError, ErrorSeverity};
pub use item::{ItemData, ItemEffect, ItemId};
pub use member::{BatonPassData, BattleMember, MemberId, Side};
pub use showtime::ShowtimeDefinition;
pub use skill::{
    DamageKind, SkillCost, SkillData, SkillId, StatusInfliction, TargetScope, TargetShape,
    TargetSide,
};
pub use stats::{BuffDelta, BuffEntry, BuffLedger, BuffStat, CharacterStats, StatModifiers};
pub use status::{StatusApplication, StatusInstance, StatusKind, StatusLedger, StatusReapply};
