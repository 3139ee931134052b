use std::collections::BTreeMap;
use std::fmt;

use crate::ai::AiPattern;
use crate::element::AffinityTable;
use crate::item::{ItemData, ItemId};
use crate::skill::{SkillData, SkillId};
use crate::stats::{CharacterStats, StatModifiers};
use crate::status::StatusKind;

/// Stable identifier of a character template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// Template a battle member is instantiated from.
///
/// Party members and enemies share the same shape; a template with an AI
/// pattern is computer controlled.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterTemplate {
    pub id: CharacterId,
    pub name: String,
    pub stats: CharacterStats,
    pub affinities: AffinityTable,
    pub status_resistances: BTreeMap<StatusKind, u32>,
    pub skills: Vec<SkillId>,
    pub ai_pattern: Option<AiPattern>,
}

impl CharacterTemplate {
    pub fn new(id: CharacterId, name: impl Into<String>, stats: CharacterStats) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            affinities: AffinityTable::new(),
            status_resistances: BTreeMap::new(),
            skills: Vec::new(),
            ai_pattern: None,
        }
    }

    pub fn with_affinities(mut self, affinities: AffinityTable) -> Self {
        self.affinities = affinities;
        self
    }

    pub fn with_skills(mut self, skills: Vec<SkillId>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_resistance(mut self, kind: StatusKind, percent: u32) -> Self {
        self.status_resistances.insert(kind, percent.min(100));
        self
    }

    pub fn with_ai(mut self, pattern: AiPattern) -> Self {
        self.ai_pattern = Some(pattern);
        self
    }
}

/// Character template lookup.
pub trait CharacterOracle: Send + Sync {
    fn character(&self, id: CharacterId) -> Option<CharacterTemplate>;
}

/// Skill definition lookup.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<SkillData>;
}

/// Item definition lookup.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: ItemId) -> Option<ItemData>;
}

/// Party inventory: affordance checks and consumption.
pub trait InventoryOracle: Send + Sync {
    fn has_item(&self, id: ItemId) -> bool;

    /// Removes one unit; returns false when none was held.
    fn remove_item(&mut self, id: ItemId) -> bool;

    fn gold(&self) -> u32;

    /// Deducts gold; returns false (and deducts nothing) when short.
    fn remove_gold(&mut self, amount: u32) -> bool;
}

/// Flat stat bonuses derived from equipment, applied once at member creation.
pub trait EquipmentOracle: Send + Sync {
    fn bonuses(&self, template: CharacterId) -> StatModifiers;
}

/// Equipment oracle for battles without gear.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEquipment;

impl EquipmentOracle for NoEquipment {
    fn bonuses(&self, _template: CharacterId) -> StatModifiers {
        StatModifiers::default()
    }
}
