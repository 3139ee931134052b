//! Structured results of executed actions and finished battles.

use battle_core::{
    ActionKind, Affinity, CharacterId, Element, HitEffect, MemberId, Side, StatusKind,
};
use serde::{Deserialize, Serialize};

use super::BattleOutcome;

/// Coarse classification of an action, used by observers such as the AI's
/// player-pattern tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Attack,
    DamageSkill,
    Heal,
    Support,
    Guard,
    Item,
    Escape,
    Finisher,
}

/// One resolved hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitReport {
    pub target: MemberId,
    pub amount: u32,
    pub effect: HitEffect,
    /// Affinity revealed by the hit, if the hit exposes it.
    pub affinity: Option<Affinity>,
    pub critical: bool,
    pub missed: bool,
    pub technical: Option<String>,
    pub knocked_down: bool,
    pub fell: bool,
}

impl HitReport {
    pub fn miss(target: MemberId) -> Self {
        Self {
            target,
            amount: 0,
            effect: HitEffect::NoChange,
            affinity: None,
            critical: false,
            missed: true,
            technical: None,
            knocked_down: false,
            fell: false,
        }
    }

    pub fn effect(target: MemberId, effect: HitEffect, amount: u32) -> Self {
        Self {
            target,
            amount,
            effect,
            affinity: None,
            critical: false,
            missed: false,
            technical: None,
            knocked_down: false,
            fell: false,
        }
    }
}

/// Everything one `execute_action` call did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub actor: MemberId,
    pub kind: ActionKind,
    pub category: ActionCategory,
    pub element: Option<Element>,
    pub hits: Vec<HitReport>,
    pub total_damage: u32,
    pub weakness: bool,
    pub critical: bool,
    pub technicals: Vec<String>,
    pub statuses: Vec<(MemberId, StatusKind)>,
    /// Escape roll result, for escape actions.
    pub escaped: Option<bool>,
    pub one_more: bool,
    pub all_out_ready: bool,
    pub showtime: Option<String>,
    pub outcome: Option<BattleOutcome>,
    /// The submitted action referenced missing content and a basic attack ran instead.
    pub substituted: bool,
}

impl ActionReport {
    pub fn new(actor: MemberId, kind: ActionKind, category: ActionCategory) -> Self {
        Self {
            actor,
            kind,
            category,
            element: None,
            hits: Vec::new(),
            total_damage: 0,
            weakness: false,
            critical: false,
            technicals: Vec::new(),
            statuses: Vec::new(),
            escaped: None,
            one_more: false,
            all_out_ready: false,
            showtime: None,
            outcome: None,
            substituted: false,
        }
    }

    pub fn push_hit(&mut self, hit: HitReport) {
        if hit.effect == HitEffect::Damage {
            self.total_damage = self.total_damage.saturating_add(hit.amount);
        }
        if hit.critical {
            self.critical = true;
        }
        if let Some(combo) = &hit.technical {
            self.technicals.push(combo.clone());
        }
        self.hits.push(hit);
    }

    pub fn landed(&self) -> impl Iterator<Item = &HitReport> {
        self.hits.iter().filter(|hit| !hit.missed)
    }

    pub fn technical(&self) -> bool {
        !self.technicals.is_empty()
    }
}

/// Post-battle state of one member, for copy-back by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberResult {
    pub id: MemberId,
    pub template_id: CharacterId,
    pub side: Side,
    pub hp: u32,
    pub mp: u32,
    pub fallen: bool,
    pub escaped: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResults {
    /// `None` while the battle is still running.
    pub outcome: Option<BattleOutcome>,
    pub rounds: u32,
    pub members: Vec<MemberResult>,
}
