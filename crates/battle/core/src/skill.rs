//! Skill definitions.
//!
//! Skills are immutable data shared by every battle. Their targeting, cost,
//! formula selection and side effects are all declared here and interpreted
//! by the battle manager.

use std::fmt;

use crate::combat::DamageFormula;
use crate::element::Element;
use crate::stats::BuffDelta;
use crate::status::StatusKind;

/// Stable identifier of a skill definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub u32);

impl SkillId {
    /// Reserved id of the built-in basic attack.
    pub const BASIC_ATTACK: SkillId = SkillId(0);
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

/// How many targets an action picks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetScope {
    Single,
    All,
    /// `n` hits on randomly drawn living candidates.
    Random(u8),
}

/// Which members an action may pick from, relative to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSide {
    Ally,
    Enemy,
    SelfOnly,
    Everyone,
    /// Fallen allies only (revival).
    DeadAlly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetShape {
    pub scope: TargetScope,
    pub side: TargetSide,
}

impl TargetShape {
    pub const SINGLE_ENEMY: TargetShape = TargetShape::new(TargetScope::Single, TargetSide::Enemy);
    pub const ALL_ENEMIES: TargetShape = TargetShape::new(TargetScope::All, TargetSide::Enemy);
    pub const SINGLE_ALLY: TargetShape = TargetShape::new(TargetScope::Single, TargetSide::Ally);
    pub const ALL_ALLIES: TargetShape = TargetShape::new(TargetScope::All, TargetSide::Ally);
    pub const SELF: TargetShape = TargetShape::new(TargetScope::Single, TargetSide::SelfOnly);
    pub const DEAD_ALLY: TargetShape = TargetShape::new(TargetScope::Single, TargetSide::DeadAlly);

    pub const fn new(scope: TargetScope, side: TargetSide) -> Self {
        Self { scope, side }
    }

    /// Whether the caller must name targets explicitly.
    pub fn needs_explicit_target(&self) -> bool {
        matches!(self.scope, TargetScope::Single) && !matches!(self.side, TargetSide::SelfOnly)
    }

    pub fn hits_opponents(&self) -> bool {
        matches!(self.side, TargetSide::Enemy | TargetSide::Everyone)
    }
}

/// Resource paid when the skill is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCost {
    #[default]
    None,
    Mp(u32),
    /// Percent of max HP; the user must survive paying it.
    HpPercent(u32),
    Gold(u32),
}

impl SkillCost {
    pub fn mp(&self) -> u32 {
        match self {
            SkillCost::Mp(amount) => *amount,
            _ => 0,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, SkillCost::None)
    }
}

/// How the skill's amount is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    Physical,
    Magical,
    /// `power × global multiplier`, no formula.
    Fixed,
    /// Percent of the target's max HP, no formula.
    Percentage,
    /// Healing.
    Recovery,
    /// No HP change; statuses and buffs only.
    Support,
}

impl DamageKind {
    pub fn is_damaging(self) -> bool {
        matches!(
            self,
            DamageKind::Physical | DamageKind::Magical | DamageKind::Fixed | DamageKind::Percentage
        )
    }

    /// Formula-based kinds roll for critical hits and variance.
    pub fn uses_formula(self) -> bool {
        matches!(self, DamageKind::Physical | DamageKind::Magical)
    }
}

/// Chance-based status infliction carried by a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInfliction {
    pub kind: StatusKind,
    /// Percent chance before resistance.
    pub chance: u32,
    pub duration: u8,
}

/// Immutable skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillData {
    pub id: SkillId,
    pub name: String,
    pub target: TargetShape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: SkillCost,
    #[cfg_attr(feature = "serde", serde(default))]
    pub formula: Option<DamageFormula>,
    pub damage_kind: DamageKind,
    pub power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default = "default_accuracy"))]
    pub accuracy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_rate: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_hits"))]
    pub hits: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StatusInfliction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffs: Vec<BuffDelta>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub knocks_down: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub revives: bool,
}

#[cfg(feature = "serde")]
fn default_accuracy() -> u32 {
    100
}

#[cfg(feature = "serde")]
fn default_hits() -> u8 {
    1
}

impl SkillData {
    /// Creates a single-target skill with neutral defaults.
    pub fn new(id: SkillId, name: impl Into<String>, damage_kind: DamageKind, power: u32) -> Self {
        Self {
            id,
            name: name.into(),
            target: TargetShape::SINGLE_ENEMY,
            cost: SkillCost::None,
            formula: None,
            damage_kind,
            power,
            element: Element::Physical,
            accuracy: 100,
            crit_rate: 0,
            hits: 1,
            statuses: Vec::new(),
            buffs: Vec::new(),
            knocks_down: false,
            revives: false,
        }
    }

    /// The built-in physical attack every member can use for free.
    pub fn basic_attack() -> Self {
        Self {
            accuracy: 95,
            crit_rate: 10,
            ..Self::new(SkillId::BASIC_ATTACK, "Attack", DamageKind::Physical, 50)
        }
    }

    pub fn with_target(mut self, target: TargetShape) -> Self {
        self.target = target;
        self
    }

    pub fn with_cost(mut self, cost: SkillCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_formula(mut self, formula: DamageFormula) -> Self {
        self.formula = Some(formula);
        self
    }

    pub fn with_status(mut self, kind: StatusKind, chance: u32, duration: u8) -> Self {
        self.statuses.push(StatusInfliction {
            kind,
            chance,
            duration,
        });
        self
    }

    pub fn with_buff(mut self, buff: BuffDelta) -> Self {
        self.buffs.push(buff);
        self
    }

    pub fn with_hits(mut self, hits: u8) -> Self {
        self.hits = hits.max(1);
        self
    }

    pub fn with_crit_rate(mut self, crit_rate: u32) -> Self {
        self.crit_rate = crit_rate;
        self
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn knocking_down(mut self) -> Self {
        self.knocks_down = true;
        self
    }

    pub fn reviving(mut self) -> Self {
        self.revives = true;
        self
    }

    /// Whether the skill inflicts the given status.
    pub fn inflicts(&self, kind: StatusKind) -> bool {
        self.statuses.iter().any(|s| s.kind == kind)
    }
}
