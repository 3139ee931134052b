//! Battle actions submitted to the executor.

use crate::item::ItemId;
use crate::member::MemberId;
use crate::skill::SkillId;

/// What the actor does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Attack,
    Skill(SkillId),
    Item(ItemId),
    Guard,
    Escape,
    AllOutAttack,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Skill(_) => "skill",
            ActionKind::Item(_) => "item",
            ActionKind::Guard => "guard",
            ActionKind::Escape => "escape",
            ActionKind::AllOutAttack => "all_out_attack",
        }
    }
}

/// One decision, consumed once by the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    pub actor: MemberId,
    pub kind: ActionKind,
    pub targets: Vec<MemberId>,
}

impl BattleAction {
    pub fn new(actor: MemberId, kind: ActionKind, targets: Vec<MemberId>) -> Self {
        Self {
            actor,
            kind,
            targets,
        }
    }

    pub fn attack(actor: MemberId, target: MemberId) -> Self {
        Self::new(actor, ActionKind::Attack, vec![target])
    }

    pub fn skill(actor: MemberId, skill: SkillId, targets: Vec<MemberId>) -> Self {
        Self::new(actor, ActionKind::Skill(skill), targets)
    }

    pub fn item(actor: MemberId, item: ItemId, targets: Vec<MemberId>) -> Self {
        Self::new(actor, ActionKind::Item(item), targets)
    }

    pub fn guard(actor: MemberId) -> Self {
        Self::new(actor, ActionKind::Guard, Vec::new())
    }

    pub fn escape(actor: MemberId) -> Self {
        Self::new(actor, ActionKind::Escape, Vec::new())
    }

    pub fn all_out_attack(actor: MemberId) -> Self {
        Self::new(actor, ActionKind::AllOutAttack, Vec::new())
    }
}
