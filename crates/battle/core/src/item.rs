//! Consumable item definitions used in battle.

use std::fmt;

use crate::element::Element;
use crate::skill::TargetShape;
use crate::status::StatusKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// What an item does to each resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    HealHp(u32),
    HealMp(u32),
    /// Revives a fallen ally at the given percent of max HP.
    Revive(u32),
    Cure(StatusKind),
    /// Fixed elemental damage, subject to affinity.
    Damage { element: Element, power: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData {
    pub id: ItemId,
    pub name: String,
    pub target: TargetShape,
    pub effect: ItemEffect,
}

impl ItemData {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        target: TargetShape,
        effect: ItemEffect,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            target,
            effect,
        }
    }
}
