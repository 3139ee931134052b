//! Battle event payloads.

use battle_core::{ActionKind, Element, MemberId, StatusKind};
use serde::{Deserialize, Serialize};

use super::bus::Topic;
use crate::manager::BattleOutcome;

/// Everything a battle announces to the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted {
        party: Vec<String>,
        enemies: Vec<String>,
    },
    TurnStarted {
        actor: MemberId,
        actor_name: String,
        round: u32,
    },
    ActionExecuted {
        actor: MemberId,
        action: ActionKind,
        damage: u32,
        weakness: bool,
        critical: bool,
    },
    WeaknessHit {
        attacker: MemberId,
        target: MemberId,
        element: Element,
    },
    OneMoreTriggered {
        actor: MemberId,
    },
    Knockdown {
        target: MemberId,
    },
    AllOutAttackReady {
        actor: MemberId,
    },
    BatonPassExecuted {
        from: MemberId,
        to: MemberId,
        pass_level: u8,
    },
    TechnicalDamage {
        attacker: MemberId,
        target: MemberId,
        combo: String,
    },
    ShowtimeTriggered {
        name: String,
        first: MemberId,
        second: MemberId,
    },
    StatusInflicted {
        target: MemberId,
        status: StatusKind,
    },
    StatusExpired {
        target: MemberId,
        status: StatusKind,
    },
    /// Turn-end damage from Burn or Poison.
    StatusTicked {
        target: MemberId,
        status: StatusKind,
        damage: u32,
    },
    MemberFell {
        member: MemberId,
    },
    BattleEnded {
        victory: bool,
        outcome: BattleOutcome,
    },
    BattleAborted {
        reason: String,
    },
}

impl BattleEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BattleEvent::BattleStarted { .. }
            | BattleEvent::MemberFell { .. }
            | BattleEvent::BattleEnded { .. }
            | BattleEvent::BattleAborted { .. } => Topic::Battle,
            BattleEvent::TurnStarted { .. }
            | BattleEvent::ActionExecuted { .. }
            | BattleEvent::StatusInflicted { .. }
            | BattleEvent::StatusExpired { .. }
            | BattleEvent::StatusTicked { .. } => Topic::Turn,
            BattleEvent::WeaknessHit { .. }
            | BattleEvent::OneMoreTriggered { .. }
            | BattleEvent::Knockdown { .. }
            | BattleEvent::AllOutAttackReady { .. }
            | BattleEvent::BatonPassExecuted { .. }
            | BattleEvent::TechnicalDamage { .. }
            | BattleEvent::ShowtimeTriggered { .. } => Topic::Combo,
        }
    }
}
