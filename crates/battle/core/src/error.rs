//! Error taxonomy for battle resolution.
//!
//! Every rejection carries a [`ErrorSeverity`] so the caller can pick a
//! recovery strategy:
//! - **User**: the submitted action is illegal right now; nothing changed and
//!   the scheduler keeps waiting for a new action.
//! - **Configuration**: content is missing or malformed; the engine logs it and
//!   substitutes a safe default.
//! - **Invariant**: internal state is inconsistent; the battle is aborted.

use crate::env::CharacterId;
use crate::item::ItemId;
use crate::member::MemberId;
use crate::skill::SkillId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    User,
    Configuration,
    Invariant,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Configuration => "configuration",
            Self::Invariant => "invariant",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("{actor} needs {required} MP but has {available}")]
    InsufficientMp {
        actor: MemberId,
        required: u32,
        available: u32,
    },

    #[error("{actor} cannot pay {required} HP with {available} remaining")]
    InsufficientHp {
        actor: MemberId,
        required: u32,
        available: u32,
    },

    #[error("party needs {required} gold but has {available}")]
    InsufficientGold { required: u32, available: u32 },

    #[error("{item} is not in the inventory")]
    MissingItem { item: ItemId },

    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget {
        target: Option<MemberId>,
        reason: &'static str,
    },

    #[error("{actor} has fallen and cannot act")]
    ActorFallen { actor: MemberId },

    #[error("{actor} is locked by a status and cannot act")]
    ActorLocked { actor: MemberId },

    #[error("{actor} does not know {skill}")]
    SkillNotLearned { actor: MemberId, skill: SkillId },

    #[error("{actor} is not the current actor")]
    NotCurrentActor { actor: MemberId },

    #[error("battle is not waiting for an action")]
    NotAwaitingAction,

    #[error("escape is not allowed in this encounter")]
    EscapeForbidden,

    #[error("baton pass unavailable: {reason}")]
    BatonPassUnavailable { reason: &'static str },

    #[error("all-out attack is not available")]
    AllOutAttackUnavailable,

    #[error("battle is over")]
    BattleOver,

    #[error("unknown skill {0}")]
    UnknownSkill(SkillId),

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),

    #[error("malformed AI pattern: {0}")]
    MalformedPattern(String),

    #[error("invalid battle config: {0}")]
    InvalidConfig(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl BattleError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientMp { .. }
            | Self::InsufficientHp { .. }
            | Self::InsufficientGold { .. }
            | Self::MissingItem { .. }
            | Self::InvalidTarget { .. }
            | Self::ActorFallen { .. }
            | Self::ActorLocked { .. }
            | Self::SkillNotLearned { .. }
            | Self::NotCurrentActor { .. }
            | Self::NotAwaitingAction
            | Self::EscapeForbidden
            | Self::BatonPassUnavailable { .. }
            | Self::AllOutAttackUnavailable
            | Self::BattleOver => ErrorSeverity::User,
            Self::UnknownSkill(_)
            | Self::UnknownItem(_)
            | Self::UnknownCharacter(_)
            | Self::MalformedPattern(_)
            | Self::InvalidConfig(_) => ErrorSeverity::Configuration,
            Self::InvariantViolation(_) => ErrorSeverity::Invariant,
        }
    }

    /// Stable identifier for logs and assertions.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientMp { .. } => "INSUFFICIENT_MP",
            Self::InsufficientHp { .. } => "INSUFFICIENT_HP",
            Self::InsufficientGold { .. } => "INSUFFICIENT_GOLD",
            Self::MissingItem { .. } => "MISSING_ITEM",
            Self::InvalidTarget { .. } => "INVALID_TARGET",
            Self::ActorFallen { .. } => "ACTOR_FALLEN",
            Self::ActorLocked { .. } => "ACTOR_LOCKED",
            Self::SkillNotLearned { .. } => "SKILL_NOT_LEARNED",
            Self::NotCurrentActor { .. } => "NOT_CURRENT_ACTOR",
            Self::NotAwaitingAction => "NOT_AWAITING_ACTION",
            Self::EscapeForbidden => "ESCAPE_FORBIDDEN",
            Self::BatonPassUnavailable { .. } => "BATON_PASS_UNAVAILABLE",
            Self::AllOutAttackUnavailable => "ALL_OUT_ATTACK_UNAVAILABLE",
            Self::BattleOver => "BATTLE_OVER",
            Self::UnknownSkill(_) => "UNKNOWN_SKILL",
            Self::UnknownItem(_) => "UNKNOWN_ITEM",
            Self::UnknownCharacter(_) => "UNKNOWN_CHARACTER",
            Self::MalformedPattern(_) => "MALFORMED_PATTERN",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}
