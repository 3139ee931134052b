//! Dual-character finishers.

use crate::element::Element;
use crate::env::CharacterId;
use crate::skill::{DamageKind, SkillData, SkillId, TargetShape};

/// Scripted attack performed by a specific pair of party characters.
///
/// Fires at most once per battle, after a party action, when both characters
/// are standing, some enemy is at or below `hp_threshold_percent`, and the
/// chance roll succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowtimeDefinition {
    pub name: String,
    pub first: CharacterId,
    pub second: CharacterId,
    pub power: u32,
    pub hits: u8,
    pub chance_percent: u32,
    pub hp_threshold_percent: u32,
}

impl ShowtimeDefinition {
    /// Reserved skill id for showtime hits in reports.
    pub const SKILL_ID: SkillId = SkillId(u32::MAX);

    pub fn involves(&self, character: CharacterId) -> bool {
        self.first == character || self.second == character
    }

    /// The fixed Almighty multi-hit the showtime resolves as.
    pub fn skill(&self) -> SkillData {
        SkillData::new(Self::SKILL_ID, self.name.clone(), DamageKind::Physical, self.power)
            .with_target(TargetShape::ALL_ENEMIES)
            .with_element(Element::Almighty)
            .with_hits(self.hits)
    }
}
