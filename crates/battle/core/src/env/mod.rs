//! Collaborators the battle consumes but does not own.
//!
//! Lookups are read-only oracles shared behind `Arc`; the inventory is the one
//! mutable collaborator and is held by the manager separately.
mod oracles;
mod rng;

use std::sync::Arc;

pub use oracles::{
    CharacterId, CharacterOracle, CharacterTemplate, EquipmentOracle, InventoryOracle, ItemOracle,
    NoEquipment, SkillOracle,
};
pub use rng::{PcgRng, RngOracle, RollKind, compute_seed, roll_context};

use crate::error::BattleError;
use crate::item::{ItemData, ItemId};
use crate::skill::{SkillData, SkillId};
use crate::stats::StatModifiers;

/// Aggregates the read-only oracles required to build and resolve a battle.
#[derive(Clone)]
pub struct BattleEnv {
    characters: Arc<dyn CharacterOracle>,
    skills: Arc<dyn SkillOracle>,
    items: Arc<dyn ItemOracle>,
    equipment: Arc<dyn EquipmentOracle>,
}

impl BattleEnv {
    pub fn new(
        characters: Arc<dyn CharacterOracle>,
        skills: Arc<dyn SkillOracle>,
        items: Arc<dyn ItemOracle>,
    ) -> Self {
        Self {
            characters,
            skills,
            items,
            equipment: Arc::new(NoEquipment),
        }
    }

    /// Uses one registry for characters, skills and items.
    pub fn from_registry<R>(registry: Arc<R>) -> Self
    where
        R: CharacterOracle + SkillOracle + ItemOracle + 'static,
    {
        Self::new(registry.clone(), registry.clone(), registry)
    }

    pub fn with_equipment(mut self, equipment: Arc<dyn EquipmentOracle>) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn character(&self, id: CharacterId) -> Result<CharacterTemplate, BattleError> {
        self.characters
            .character(id)
            .ok_or(BattleError::UnknownCharacter(id))
    }

    pub fn skill(&self, id: SkillId) -> Result<SkillData, BattleError> {
        if id == SkillId::BASIC_ATTACK {
            return Ok(self
                .skills
                .skill(id)
                .unwrap_or_else(SkillData::basic_attack));
        }
        self.skills.skill(id).ok_or(BattleError::UnknownSkill(id))
    }

    pub fn item(&self, id: ItemId) -> Result<ItemData, BattleError> {
        self.items.item(id).ok_or(BattleError::UnknownItem(id))
    }

    pub fn equipment(&self, template: CharacterId) -> StatModifiers {
        self.equipment.bonuses(template)
    }
}

impl std::fmt::Debug for BattleEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEnv").finish_non_exhaustive()
    }
}
