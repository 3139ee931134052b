//! Status effect ledger.
//!
//! Status effects are turn-counted conditions attached to a battle member.
//! A member holds at most one instance per [`StatusKind`]; what happens on
//! re-application is decided by [`StatusReapply`].
//!
//! # Expiry
//!
//! Every kind except [`StatusKind::Guard`] loses one turn at its owner's turn
//! end and disappears when it reaches zero. Guard lasts until the owner's next
//! turn start.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::member::MemberId;

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Fire damage at turn end.
    Burn,
    /// Cannot act.
    Freeze,
    /// Cannot act.
    Shock,
    /// Cannot act.
    Sleep,
    /// HP loss at turn end, never lethal.
    Poison,
    /// Vulnerable to psychic follow-ups.
    Confuse,
    /// Incoming damage reduced, cannot be knocked down.
    Guard,
}

impl StatusKind {
    /// Locking statuses forfeit the owner's turn.
    pub fn locks_actions(self) -> bool {
        matches!(self, StatusKind::Freeze | StatusKind::Shock | StatusKind::Sleep)
    }

    /// Turn-end HP loss in percent of max HP.
    pub fn damage_over_time_percent(self) -> Option<u32> {
        match self {
            StatusKind::Burn => Some(6),
            StatusKind::Poison => Some(10),
            _ => None,
        }
    }

    /// Whether the turn-end damage may reduce HP to zero.
    pub fn damage_over_time_is_lethal(self) -> bool {
        matches!(self, StatusKind::Burn)
    }

    /// Guard ends at the owner's next turn start instead of turn end.
    pub fn expires_at_turn_start(self) -> bool {
        matches!(self, StatusKind::Guard)
    }
}

/// Re-infection rule for a status the member already has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusReapply {
    /// Replace the remaining duration with the new application's duration.
    #[default]
    Refresh,
    /// Keep the existing instance and refuse the new one.
    Reject,
}

/// A single active status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub kind: StatusKind,
    pub remaining_turns: u8,
    pub source: Option<MemberId>,
}

/// Result of [`StatusLedger::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplication {
    Applied,
    Refreshed,
    Rejected,
}

impl StatusApplication {
    pub fn took_effect(self) -> bool {
        !matches!(self, StatusApplication::Rejected)
    }
}

/// Active statuses of one member, keyed by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger {
    effects: ArrayVec<StatusInstance, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusInstance> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Applies a status following the re-application policy.
    ///
    /// A zero duration is rejected outright.
    pub fn apply(
        &mut self,
        kind: StatusKind,
        duration: u8,
        source: Option<MemberId>,
        policy: StatusReapply,
    ) -> StatusApplication {
        if duration == 0 {
            return StatusApplication::Rejected;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            return match policy {
                StatusReapply::Refresh => {
                    existing.remaining_turns = duration;
                    existing.source = source;
                    StatusApplication::Refreshed
                }
                StatusReapply::Reject => StatusApplication::Rejected,
            };
        }

        let instance = StatusInstance {
            kind,
            remaining_turns: duration,
            source,
        };
        match self.effects.try_push(instance) {
            Ok(()) => StatusApplication::Applied,
            Err(_) => StatusApplication::Rejected,
        }
    }

    /// Removes a status immediately. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before != self.effects.len()
    }

    /// Removes statuses that end when the owner's turn starts.
    pub fn expire_at_turn_start(&mut self) -> Vec<StatusKind> {
        let expired: Vec<StatusKind> = self
            .effects
            .iter()
            .filter(|e| e.kind.expires_at_turn_start())
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| !e.kind.expires_at_turn_start());
        expired
    }

    /// Decrements every turn-end status once and drops the finished ones.
    ///
    /// Returns the kinds that expired.
    pub fn tick_turn_end(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            if effect.kind.expires_at_turn_start() {
                continue;
            }
            effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
            if effect.remaining_turns == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining_turns > 0);
        expired
    }

    /// Whether any active status forfeits the owner's turn.
    pub fn is_locked(&self) -> bool {
        self.effects.iter().any(|e| e.kind.locks_actions())
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
